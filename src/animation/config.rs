use std::time::Duration;

use crate::error::ParameterError;
use crate::sampling::MIN_OUTER_RADIUS;

use super::process::DEFAULT_STEP_DEGREES;

/// Size of the drawing surface in canvas units.
///
/// The origin sits at the centre of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Settings for an [`AnimationCoordinator`](super::AnimationCoordinator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Number of curves drawn at once.
    pub count: usize,
    /// Canvas the random parameters must fit.
    pub canvas: Canvas,
    /// Rolling-angle increment per tick, in degrees.
    pub step_degrees: f64,
    /// Cadence at which the host is expected to call `tick`.
    pub tick_interval: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            count: 4,
            canvas: Canvas::default(),
            step_degrees: DEFAULT_STEP_DEGREES,
            tick_interval: Duration::from_millis(10),
        }
    }
}

impl AnimationConfig {
    /// Checks the step angle and that the canvas can fit a sampled curve.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidStep`] or [`ParameterError::CanvasTooSmall`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.step_degrees.is_finite() || self.step_degrees <= 0.0 {
            return Err(ParameterError::InvalidStep(self.step_degrees));
        }
        let Canvas { width, height } = self.canvas;
        if width.min(height) / 2 < MIN_OUTER_RADIUS {
            return Err(ParameterError::CanvasTooSmall { width, height });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = AnimationConfig::default();
        assert_eq!(config.count, 4);
        assert_eq!(config.tick_interval, Duration::from_millis(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_step() {
        let config = AnimationConfig {
            step_degrees: -1.0,
            ..AnimationConfig::default()
        };
        assert_eq!(config.validate(), Err(ParameterError::InvalidStep(-1.0)));
    }

    #[test]
    fn rejects_small_canvas() {
        let config = AnimationConfig {
            canvas: Canvas::new(50, 50),
            ..AnimationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ParameterError::CanvasTooSmall {
                width: 50,
                height: 50
            })
        );
    }
}
