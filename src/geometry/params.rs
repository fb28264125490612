use crate::error::ParameterError;
use crate::math::Point2;

/// An RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Black, the colour used when none is supplied.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new colour. Channels are checked by [`Color::validate`].
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Checks that every channel lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::OutOfRange`] naming the first offending channel.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (parameter, value) in [("color.r", self.r), ("color.g", self.g), ("color.b", self.b)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParameterError::OutOfRange {
                    parameter,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        Ok(())
    }
}

/// Geometric and visual parameters of a single hypotrochoid.
///
/// A parameter set is never edited in place: restarting a curve replaces it
/// wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParameters {
    /// Radius `R` of the fixed outer circle.
    pub outer_radius: u32,
    /// Radius `r` of the rolling inner circle. Usually `r < R`, not enforced.
    pub inner_radius: u32,
    /// Pen offset `l` as a fraction of `r`. Usually in `(0, 1]`, not enforced.
    pub pen_ratio: f64,
    /// Centre of the outer circle.
    pub center: Point2,
    pub color: Color,
}

impl CurveParameters {
    /// Creates a parameter set centred on the origin, drawn in black.
    #[must_use]
    pub fn new(outer_radius: u32, inner_radius: u32, pen_ratio: f64) -> Self {
        Self {
            outer_radius,
            inner_radius,
            pen_ratio,
            center: Point2::origin(),
            color: Color::BLACK,
        }
    }

    /// Returns a copy placed at `center`.
    #[must_use]
    pub fn with_center(mut self, center: Point2) -> Self {
        self.center = center;
        self
    }

    /// Returns a copy drawn in `color`.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Checks what the curve model needs to evaluate points: positive radii,
    /// a finite pen ratio and a finite centre.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] describing the first invalid field.
    pub fn validate_geometry(&self) -> Result<(), ParameterError> {
        if self.outer_radius == 0 {
            return Err(ParameterError::NonPositiveRadius {
                name: "outer_radius",
                value: self.outer_radius,
            });
        }
        if self.inner_radius == 0 {
            return Err(ParameterError::NonPositiveRadius {
                name: "inner_radius",
                value: self.inner_radius,
            });
        }
        if !self.pen_ratio.is_finite() {
            return Err(ParameterError::NonFinite {
                parameter: "pen_ratio",
                value: self.pen_ratio,
            });
        }
        for (parameter, value) in [("center.x", self.center.x), ("center.y", self.center.y)] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { parameter, value });
            }
        }
        Ok(())
    }

    /// Full validation: geometry plus colour range.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.validate_geometry()?;
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_origin_and_black() {
        let p = CurveParameters::new(100, 25, 0.5);
        assert_eq!(p.center, Point2::origin());
        assert_eq!(p.color, Color::BLACK);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn zero_inner_radius_rejected() {
        let p = CurveParameters::new(100, 0, 0.5);
        assert_eq!(
            p.validate(),
            Err(ParameterError::NonPositiveRadius {
                name: "inner_radius",
                value: 0
            })
        );
    }

    #[test]
    fn zero_outer_radius_rejected() {
        let p = CurveParameters::new(0, 10, 0.5);
        assert!(matches!(
            p.validate(),
            Err(ParameterError::NonPositiveRadius { name: "outer_radius", .. })
        ));
    }

    #[test]
    fn inner_larger_than_outer_is_allowed() {
        assert!(CurveParameters::new(30, 70, 0.5).validate().is_ok());
    }

    #[test]
    fn nan_pen_ratio_rejected() {
        let p = CurveParameters::new(100, 25, f64::NAN);
        assert!(matches!(
            p.validate_geometry(),
            Err(ParameterError::NonFinite { parameter: "pen_ratio", .. })
        ));
    }

    #[test]
    fn infinite_center_rejected() {
        let p = CurveParameters::new(100, 25, 0.5).with_center(Point2::new(f64::INFINITY, 0.0));
        assert!(p.validate_geometry().is_err());
    }

    #[test]
    fn color_out_of_range_rejected() {
        let p = CurveParameters::new(100, 25, 0.5).with_color(Color::new(0.2, 1.5, 0.0));
        assert!(p.validate_geometry().is_ok());
        assert!(matches!(
            p.validate(),
            Err(ParameterError::OutOfRange { parameter: "color.g", .. })
        ));
    }
}
