use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ParameterError, Result};
use crate::geometry::{Color, CurveParameters};
use crate::math::Point2;

/// Smallest outer radius the sampler will draw.
pub const MIN_OUTER_RADIUS: u32 = 50;

/// Smallest inner radius the sampler will draw.
pub const MIN_INNER_RADIUS: u32 = 10;

/// Draws random, valid curve parameters that fit a canvas.
///
/// The random source is injected, so a seeded generator gives reproducible
/// sequences of curves.
#[derive(Debug, Clone)]
pub struct ParameterSampler<G> {
    rng: G,
}

impl ParameterSampler<StdRng> {
    /// Sampler with a deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Sampler seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<G: Rng> ParameterSampler<G> {
    #[must_use]
    pub fn new(rng: G) -> Self {
        Self { rng }
    }

    /// Samples a parameter set for a `width` x `height` canvas.
    ///
    /// - outer radius uniform in `[50, min(width, height) / 2]`
    /// - inner radius uniform in `[10, 9 * R / 10]`
    /// - pen ratio uniform in `[0.1, 0.9]`
    /// - centre uniform in `[-width/4, width/4] x [-height/4, height/4]`
    /// - colour channels uniform in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::CanvasTooSmall`] if `min(width, height) / 2 < 50`.
    pub fn sample(&mut self, width: u32, height: u32) -> Result<CurveParameters> {
        let max_outer = width.min(height) / 2;
        if max_outer < MIN_OUTER_RADIUS {
            return Err(ParameterError::CanvasTooSmall { width, height }.into());
        }

        let outer_radius = self.rng.gen_range(MIN_OUTER_RADIUS..=max_outer);
        // R >= 50 keeps 9R/10 >= 45, above the inner minimum.
        let max_inner = u32::try_from(u64::from(outer_radius) * 9 / 10).unwrap_or(u32::MAX);
        let inner_radius = self.rng.gen_range(MIN_INNER_RADIUS..=max_inner);
        let pen_ratio = self.rng.gen_range(0.1..=0.9);

        let quarter_w = f64::from(width) / 4.0;
        let quarter_h = f64::from(height) / 4.0;
        let center = Point2::new(
            self.rng.gen_range(-quarter_w..=quarter_w),
            self.rng.gen_range(-quarter_h..=quarter_h),
        );
        let color = Color::new(
            self.rng.gen_range(0.0..=1.0),
            self.rng.gen_range(0.0..=1.0),
            self.rng.gen_range(0.0..=1.0),
        );

        Ok(CurveParameters {
            outer_radius,
            inner_radius,
            pen_ratio,
            center,
            color,
        })
    }
}
