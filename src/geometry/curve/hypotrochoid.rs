use crate::error::Result;
use crate::geometry::CurveParameters;
use crate::math::{gcd, Point2, Vector2};

use super::{Curve, CurveDomain};

/// The curve traced by a pen fixed inside a circle of radius `r` rolling
/// inside a fixed circle of radius `R`.
///
/// With `k = r / R` and pen ratio `l`, at rolling angle `a`:
///
/// ```text
/// x = R * ((1 - k) * cos(a) + l * k * cos(a / k - a))
/// y = R * ((1 - k) * sin(a) + l * k * sin(a / k - a))
/// ```
///
/// offset by the centre. Integer radii make `r / R` rational, so the curve
/// closes after `r / gcd(r, R)` full turns of `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hypotrochoid {
    center: Point2,
    outer_radius: f64,
    ratio: f64,
    pen_ratio: f64,
    period_count: u32,
}

impl Hypotrochoid {
    /// Builds the curve model for a parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`SpiroError::InvalidParameters`] if either radius is zero or
    /// the pen ratio or centre is not finite.
    pub fn new(params: &CurveParameters) -> Result<Self> {
        params.validate_geometry()?;
        let outer = params.outer_radius;
        let inner = params.inner_radius;
        Ok(Self {
            center: params.center,
            outer_radius: f64::from(outer),
            ratio: f64::from(inner) / f64::from(outer),
            pen_ratio: params.pen_ratio,
            period_count: inner / gcd(inner, outer),
        })
    }

    /// Number of full turns of the rolling angle before the curve closes.
    #[must_use]
    pub fn period_count(&self) -> u32 {
        self.period_count
    }

    /// Rolling angle, in degrees, at which the curve closes.
    #[must_use]
    pub fn closing_angle(&self) -> f64 {
        360.0 * f64::from(self.period_count)
    }

    /// Position on the curve at a rolling angle given in degrees.
    #[must_use]
    pub fn position_at(&self, angle_degrees: f64) -> Point2 {
        self.point(angle_degrees.to_radians())
    }

    fn point(&self, a: f64) -> Point2 {
        let k = self.ratio;
        let l = self.pen_ratio;
        let inner_angle = a / k - a;
        let x = self.outer_radius * ((1.0 - k) * a.cos() + l * k * inner_angle.cos());
        let y = self.outer_radius * ((1.0 - k) * a.sin() + l * k * inner_angle.sin());
        self.center + Vector2::new(x, y)
    }
}

impl Curve for Hypotrochoid {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        Ok(self.point(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.closing_angle().to_radians())
    }

    fn is_closed(&self) -> bool {
        true
    }
}

/// Position on the curve described by `params` at `angle_degrees`.
///
/// # Errors
///
/// Returns [`SpiroError::InvalidParameters`] for invalid radii, pen ratio or centre.
pub fn position_at(params: &CurveParameters, angle_degrees: f64) -> Result<Point2> {
    Ok(Hypotrochoid::new(params)?.position_at(angle_degrees))
}

/// `r / gcd(r, R)`: full turns needed before the curve closes.
///
/// # Errors
///
/// Returns [`SpiroError::InvalidParameters`] if either radius is zero.
pub fn period_count(params: &CurveParameters) -> Result<u32> {
    Ok(Hypotrochoid::new(params)?.period_count())
}
