use crate::error::{ParameterError, Result};
use crate::geometry::{CurveParameters, Hypotrochoid};
use crate::math::{steps_to_reach, steps_within, Point2};
use crate::render::Renderer;

/// Default angular increment per step, in degrees.
pub const DEFAULT_STEP_DEGREES: f64 = 5.0;

/// Progress of a [`CurveProcess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Initialized or reset, nothing drawn yet.
    Idle,
    /// At least one step taken, closing angle not yet reached.
    Advancing,
    /// Closing angle reached. Further steps are no-ops.
    Complete,
}

/// Step-wise drawing of one hypotrochoid.
///
/// The rolling angle advances by a fixed step each call to [`step`](Self::step)
/// until it reaches `360 * period_count` degrees. The last step may overshoot
/// that angle when the step does not divide it evenly.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveProcess {
    params: CurveParameters,
    curve: Hypotrochoid,
    step_degrees: f64,
    steps_taken: u64,
    /// Steps after which the closing angle is reached.
    closing_steps: u64,
    /// Steps that fit within the closing angle, for the full trace.
    traced_steps: u64,
    complete: bool,
    start: Point2,
}

impl CurveProcess {
    /// Creates a process with the default 5 degree step.
    ///
    /// # Errors
    ///
    /// Returns [`SpiroError::InvalidParameters`](crate::SpiroError::InvalidParameters)
    /// if the radii, pen ratio, centre or colour are invalid.
    pub fn new(params: CurveParameters) -> Result<Self> {
        Self::with_step(params, DEFAULT_STEP_DEGREES)
    }

    /// Creates a process advancing `step_degrees` per step.
    ///
    /// # Errors
    ///
    /// Returns [`SpiroError::InvalidParameters`](crate::SpiroError::InvalidParameters)
    /// if the parameters are invalid, the step is not a positive finite angle,
    /// or the step is so small that the closing angle needs more than
    /// [`MAX_STEP_COUNT`](crate::math::MAX_STEP_COUNT) steps.
    pub fn with_step(params: CurveParameters, step_degrees: f64) -> Result<Self> {
        if !step_degrees.is_finite() || step_degrees <= 0.0 {
            return Err(ParameterError::InvalidStep(step_degrees).into());
        }
        params.validate()?;
        let curve = Hypotrochoid::new(&params)?;
        let span = curve.closing_angle();
        let (Some(closing_steps), Some(traced_steps)) =
            (steps_to_reach(span, step_degrees), steps_within(span, step_degrees))
        else {
            return Err(ParameterError::TooManySteps {
                step: step_degrees,
                span,
            }
            .into());
        };
        Ok(Self {
            params,
            curve,
            step_degrees,
            steps_taken: 0,
            closing_steps,
            traced_steps,
            complete: false,
            start: curve.position_at(0.0),
        })
    }

    /// Replaces the parameters and rewinds to angle zero.
    ///
    /// The new state is validated in full before anything is replaced, so on
    /// error the process is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SpiroError::InvalidParameters`](crate::SpiroError::InvalidParameters)
    /// if the new parameters are invalid.
    pub fn reset(&mut self, params: CurveParameters) -> Result<()> {
        *self = Self::with_step(params, self.step_degrees)?;
        Ok(())
    }

    /// Advances one step and returns the new pen position, or `None` once
    /// the process is complete.
    pub fn step(&mut self) -> Option<Point2> {
        if self.complete {
            return None;
        }
        self.steps_taken += 1;
        let angle = self.current_angle();
        if self.steps_taken >= self.closing_steps {
            self.complete = true;
        }
        Some(self.curve.position_at(angle))
    }

    /// Every point of the curve at multiples of the step, from 0 up to and
    /// including the closing angle. Independent of the current progress.
    #[must_use]
    pub fn trace_full(&self) -> Trace {
        Trace {
            curve: self.curve,
            step_degrees: self.step_degrees,
            next: 0,
            end: self.traced_steps + 1,
        }
    }

    /// Draws the whole curve in one go and hides the pen afterwards.
    ///
    /// Returns the number of points emitted, start point included.
    pub fn draw_full<R: Renderer + ?Sized>(&self, pen: &mut R) -> usize {
        pen.set_color(self.params.color);
        let mut trace = self.trace_full();
        let mut drawn = 0;
        if let Some(start) = trace.next() {
            pen.move_to(start);
            drawn += 1;
        }
        for point in trace {
            pen.line_to(point);
            drawn += 1;
        }
        pen.hide();
        drawn
    }

    /// Current rolling angle in degrees.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn current_angle(&self) -> f64 {
        self.steps_taken as f64 * self.step_degrees
    }

    /// Number of steps taken since the last reset.
    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub fn state(&self) -> ProcessState {
        if self.complete {
            ProcessState::Complete
        } else if self.steps_taken == 0 {
            ProcessState::Idle
        } else {
            ProcessState::Advancing
        }
    }

    /// Pen position at angle zero, where drawing starts.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.start
    }

    #[must_use]
    pub fn params(&self) -> &CurveParameters {
        &self.params
    }

    #[must_use]
    pub fn curve(&self) -> &Hypotrochoid {
        &self.curve
    }

    #[must_use]
    pub fn period_count(&self) -> u32 {
        self.curve.period_count()
    }

    #[must_use]
    pub fn step_degrees(&self) -> f64 {
        self.step_degrees
    }
}

/// Lazy full-resolution trace of a curve. See [`CurveProcess::trace_full`].
#[derive(Debug, Clone)]
pub struct Trace {
    curve: Hypotrochoid,
    step_degrees: f64,
    next: u64,
    end: u64,
}

impl Iterator for Trace {
    type Item = Point2;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Point2> {
        if self.next >= self.end {
            return None;
        }
        let angle = self.next as f64 * self.step_degrees;
        self.next += 1;
        Some(self.curve.position_at(angle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Trace {}
