use crate::error::{Result, SpiroError};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// A full circle in the plane.
///
/// `P(t) = center + radius * (cos t, sin t)` over `[0, 2*pi)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or not finite.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(SpiroError::Degenerate("circle radius must be positive"));
        }
        Ok(Self { center, radius })
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        Ok(self.center + Vector2::new(t.cos(), t.sin()) * self.radius)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
