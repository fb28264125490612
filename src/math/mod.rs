/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Greatest common divisor of two non-negative integers (Euclid).
///
/// `gcd(0, n) == n`, so callers that divide by the result must reject the
/// all-zero case themselves.
#[must_use]
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Largest step count accepted by [`steps_within`] and [`steps_to_reach`].
///
/// Every count up to this bound is exact as an `f64`.
pub const MAX_STEP_COUNT: u64 = 1 << 53;

/// Ratio `span / step` with the rounding noise allowed around it, or `None`
/// when the ratio is negative, not finite, or above [`MAX_STEP_COUNT`].
#[allow(clippy::cast_precision_loss)]
fn step_ratio(span: f64, step: f64) -> Option<(f64, f64)> {
    let ratio = span / step;
    if !ratio.is_finite() || ratio < 0.0 || ratio > MAX_STEP_COUNT as f64 {
        return None;
    }
    Some((ratio, ratio * 4.0 * f64::EPSILON))
}

/// Number of whole steps that fit in `span`, counting a step that lands on
/// `span` up to floating-point rounding.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn steps_within(span: f64, step: f64) -> Option<u64> {
    let (ratio, noise) = step_ratio(span, step)?;
    Some((ratio + noise).floor() as u64)
}

/// Number of steps needed to reach or pass `span`. A step that falls short
/// of `span` by more than rounding noise does not count as reaching it.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn steps_to_reach(span: f64, step: f64) -> Option<u64> {
    let (ratio, noise) = step_ratio(span, step)?;
    Some((ratio - noise).ceil().max(0.0) as u64)
}
