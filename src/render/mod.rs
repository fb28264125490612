//! The drawing surface seen from the engine's side.
//!
//! Hosts implement [`Renderer`] for whatever canvas they own; one renderer
//! instance acts as the pen of one curve.

mod recording;

pub use recording::{PenCommand, RecordingPen};

use crate::error::{ParameterError, Result};
use crate::geometry::{Color, Curve};
use crate::math::{steps_within, Point2};

/// A pen on a host-owned canvas.
///
/// Calls are assumed to succeed; a host whose surface can fail is expected
/// to stop scheduling ticks on its own.
pub trait Renderer {
    /// Lifts the pen and moves it to `point` without drawing.
    fn move_to(&mut self, point: Point2);

    /// Draws a straight segment from the current position to `point`.
    fn line_to(&mut self, point: Point2);

    fn set_color(&mut self, color: Color);

    /// Shows the pen cursor.
    fn show(&mut self);

    /// Hides the pen cursor. Drawing still takes effect while hidden.
    fn hide(&mut self);

    /// Erases everything this pen has drawn.
    fn clear(&mut self);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn move_to(&mut self, point: Point2) {
        (**self).move_to(point);
    }

    fn line_to(&mut self, point: Point2) {
        (**self).line_to(point);
    }

    fn set_color(&mut self, color: Color) {
        (**self).set_color(color);
    }

    fn show(&mut self) {
        (**self).show();
    }

    fn hide(&mut self) {
        (**self).hide();
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Draws any planar curve as a polyline of fixed angular steps.
///
/// Samples `t = 0, step, 2*step, ...` from the start of the curve's domain
/// while `t <= t_max + extra`, so passing a positive `extra_degrees` lets a
/// closed curve overlap its start. Returns the number of points drawn.
///
/// Nothing is drawn unless the arguments are valid.
///
/// # Errors
///
/// Returns an error if the step is not positive, `extra_degrees` is negative
/// or not finite, the domain needs too many steps, or a point cannot be
/// evaluated.
pub fn draw_curve<C, R>(
    curve: &C,
    pen: &mut R,
    step_degrees: f64,
    extra_degrees: f64,
) -> Result<usize>
where
    C: Curve + ?Sized,
    R: Renderer + ?Sized,
{
    if !step_degrees.is_finite() || step_degrees <= 0.0 {
        return Err(ParameterError::InvalidStep(step_degrees).into());
    }
    if !extra_degrees.is_finite() {
        return Err(ParameterError::NonFinite {
            parameter: "extra_degrees",
            value: extra_degrees,
        }
        .into());
    }
    if extra_degrees < 0.0 {
        return Err(ParameterError::OutOfRange {
            parameter: "extra_degrees",
            value: extra_degrees,
            min: 0.0,
            max: f64::INFINITY,
        }
        .into());
    }
    let domain = curve.domain();
    let step = step_degrees.to_radians();
    let span = domain.t_max - domain.t_min + extra_degrees.to_radians();
    let segments = steps_within(span, step).ok_or(ParameterError::TooManySteps {
        step: step_degrees,
        span: span.to_degrees(),
    })?;

    pen.move_to(curve.evaluate(domain.t_min)?);
    let mut drawn = 1;
    for i in 1..=segments {
        #[allow(clippy::cast_precision_loss)]
        let t = domain.t_min + i as f64 * step;
        pen.line_to(curve.evaluate(t)?);
        drawn += 1;
    }
    Ok(drawn)
}
