use rand::rngs::StdRng;
use rand::Rng;
use slotmap::SlotMap;
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::render::Renderer;
use crate::sampling::ParameterSampler;

use super::{AnimationConfig, CurveProcess};

slotmap::new_key_type! {
    /// Stable handle to a curve owned by an [`AnimationCoordinator`].
    ///
    /// Stays valid across restarts.
    pub struct CurveKey;
}

/// A curve together with the pen that draws it.
#[derive(Debug)]
struct Track<R> {
    process: CurveProcess,
    pen: R,
    visible: bool,
}

impl<R: Renderer> Track<R> {
    /// Wipes the previous drawing and lifts the pen to the start point.
    fn place_pen(&mut self) {
        self.pen.clear();
        self.pen.set_color(self.process.params().color);
        self.pen.move_to(self.process.start_point());
        if self.visible {
            self.pen.show();
        }
    }
}

/// What a single [`AnimationCoordinator::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Curves that drew a new segment.
    pub advanced: usize,
    /// Curves that reached their closing angle on this tick.
    pub completed: usize,
    /// Whether every curve was complete and all were restarted.
    pub restarted: bool,
}

/// Drives many curves in lockstep.
///
/// Each [`tick`](Self::tick) advances every curve by one step. Once all of
/// them are complete they are restarted together, each with freshly sampled
/// parameters. The coordinator never schedules itself: the host calls
/// `tick` at [`AnimationConfig::tick_interval`].
#[derive(Debug)]
pub struct AnimationCoordinator<R, G = StdRng> {
    tracks: SlotMap<CurveKey, Track<R>>,
    sampler: ParameterSampler<G>,
    config: AnimationConfig,
    cycles: u64,
}

impl<R: Renderer, G: Rng> AnimationCoordinator<R, G> {
    /// Creates `config.count` curves with parameters drawn from `sampler`.
    ///
    /// `new_pen` is called once per curve to obtain its renderer; each pen is
    /// coloured and moved to its curve's start point before returning.
    ///
    /// # Errors
    ///
    /// Returns [`SpiroError::InvalidParameters`](crate::SpiroError::InvalidParameters)
    /// if the configuration is invalid or the canvas is too small to sample from.
    pub fn new<F>(config: AnimationConfig, mut sampler: ParameterSampler<G>, mut new_pen: F) -> Result<Self>
    where
        F: FnMut(CurveKey) -> R,
    {
        config.validate()?;
        let mut tracks = SlotMap::with_capacity_and_key(config.count);
        for _ in 0..config.count {
            let params = sampler.sample(config.canvas.width, config.canvas.height)?;
            let process = CurveProcess::with_step(params, config.step_degrees)?;
            let key = tracks.insert_with_key(|key| Track {
                process,
                pen: new_pen(key),
                visible: true,
            });
            if let Some(track) = tracks.get_mut(key) {
                track.place_pen();
            }
        }
        debug!(count = config.count, "animation initialized");
        Ok(Self {
            tracks,
            sampler,
            config,
            cycles: 0,
        })
    }

    /// Advances every curve by one step, then restarts all of them if they
    /// are all complete.
    ///
    /// # Errors
    ///
    /// Only fails if resampling fails, which a validated configuration rules out.
    pub fn tick(&mut self) -> Result<TickReport> {
        let mut report = TickReport::default();
        for track in self.tracks.values_mut() {
            let Some(point) = track.process.step() else {
                continue;
            };
            track.pen.line_to(point);
            report.advanced += 1;
            if track.process.is_complete() {
                track.pen.hide();
                report.completed += 1;
            }
        }
        trace!(advanced = report.advanced, completed = report.completed, "tick");

        if self.all_complete() {
            info!(cycle = self.cycles, curves = self.tracks.len(), "all curves complete");
            self.restart_all()?;
            report.restarted = true;
        }
        Ok(report)
    }

    /// Restarts every curve from angle zero with independently sampled
    /// parameters.
    ///
    /// Every replacement process is built before any curve is touched, so
    /// on error all curves and pens are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`SpiroError::InvalidParameters`](crate::SpiroError::InvalidParameters)
    /// if sampling fails or a sampled curve cannot be stepped at the
    /// configured step.
    pub fn restart_all(&mut self) -> Result<()> {
        let (width, height) = (self.config.canvas.width, self.config.canvas.height);
        let step = self.config.step_degrees;
        let fresh = (0..self.tracks.len())
            .map(|_| CurveProcess::with_step(self.sampler.sample(width, height)?, step))
            .collect::<Result<Vec<_>>>()?;

        for (track, process) in self.tracks.values_mut().zip(fresh) {
            track.process = process;
            track.place_pen();
        }
        self.cycles += 1;
        debug!(cycle = self.cycles, "curves restarted");
        Ok(())
    }

    /// Flips the visibility of every pen.
    ///
    /// Hidden curves keep advancing; only the pen cursor is affected.
    pub fn toggle_visibility(&mut self) {
        for track in self.tracks.values_mut() {
            track.visible = !track.visible;
            if track.visible {
                track.pen.show();
            } else {
                track.pen.hide();
            }
        }
    }
}

impl<R, G> AnimationCoordinator<R, G> {
    /// True when there is at least one curve and every curve is complete.
    #[must_use]
    pub fn all_complete(&self) -> bool {
        !self.tracks.is_empty() && self.tracks.values().all(|t| t.process.is_complete())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Curve handles in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = CurveKey> + '_ {
        self.tracks.keys()
    }

    #[must_use]
    pub fn process(&self, key: CurveKey) -> Option<&CurveProcess> {
        self.tracks.get(key).map(|t| &t.process)
    }

    #[must_use]
    pub fn pen(&self, key: CurveKey) -> Option<&R> {
        self.tracks.get(key).map(|t| &t.pen)
    }

    #[must_use]
    pub fn is_visible(&self, key: CurveKey) -> Option<bool> {
        self.tracks.get(key).map(|t| t.visible)
    }

    /// Iterates over curves and their pens in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (CurveKey, &CurveProcess, &R)> + '_ {
        self.tracks.iter().map(|(k, t)| (k, &t.process, &t.pen))
    }

    /// Number of synchronized restarts so far.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::animation::{Canvas, ProcessState};
    use crate::error::{ParameterError, SpiroError};
    use crate::render::{PenCommand, RecordingPen};

    fn coordinator(count: usize, seed: u64) -> AnimationCoordinator<RecordingPen> {
        let config = AnimationConfig {
            count,
            ..AnimationConfig::default()
        };
        AnimationCoordinator::new(config, ParameterSampler::seeded(seed), |_| RecordingPen::new()).unwrap()
    }

    fn steps_to_close(p: &CurveProcess) -> u64 {
        let closing = p.curve().closing_angle();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (closing / p.step_degrees()).ceil() as u64;
        steps
    }

    fn longest_run(c: &AnimationCoordinator<RecordingPen>) -> u64 {
        c.iter().map(|(_, p, _)| steps_to_close(p)).max().unwrap()
    }

    #[test]
    fn initializes_count_curves_with_placed_pens() {
        let c = coordinator(4, 11);
        assert_eq!(c.len(), 4);
        for (_, process, pen) in c.iter() {
            assert_eq!(process.state(), ProcessState::Idle);
            assert_eq!(
                pen.commands(),
                &[
                    PenCommand::SetColor(process.params().color),
                    PenCommand::MoveTo(process.start_point()),
                    PenCommand::Show,
                ]
            );
        }
    }

    #[test]
    fn tick_steps_every_curve_once() {
        let mut c = coordinator(3, 5);
        let report = c.tick().unwrap();
        assert_eq!(report.advanced, 3);
        assert!(!report.restarted);
        for (_, process, pen) in c.iter() {
            assert_eq!(process.steps_taken(), 1);
            assert_eq!(pen.segment_count(), 1);
        }
    }

    #[test]
    fn finished_curves_wait_for_the_rest() {
        let mut c = coordinator(4, 21);
        let shortest = c.iter().map(|(_, p, _)| steps_to_close(p)).min().unwrap();
        if shortest == longest_run(&c) {
            return;
        }
        for _ in 0..shortest {
            c.tick().unwrap();
        }
        let finished: Vec<_> = c
            .iter()
            .filter(|(_, p, _)| p.is_complete())
            .map(|(k, p, _)| (k, p.current_angle()))
            .collect();
        assert!(!finished.is_empty());
        assert!(!c.all_complete());

        c.tick().unwrap();
        for (key, angle) in finished {
            let p = c.process(key).unwrap();
            assert_eq!(p.state(), ProcessState::Complete);
            assert!((p.current_angle() - angle).abs() < f64::EPSILON);
            assert!(!c.pen(key).unwrap().is_visible());
        }
    }

    #[test]
    fn restarts_once_all_complete() {
        let mut c = coordinator(3, 99);
        let keys: Vec<_> = c.keys().collect();
        let old: Vec<_> = c.iter().map(|(_, p, _)| *p.params()).collect();
        let longest = longest_run(&c);

        for _ in 0..longest - 1 {
            let report = c.tick().unwrap();
            assert!(!report.restarted);
        }
        let report = c.tick().unwrap();
        assert!(report.restarted);
        assert_eq!(c.cycles(), 1);

        // Same handles, fresh state.
        assert_eq!(c.keys().collect::<Vec<_>>(), keys);
        for ((_, p, pen), previous) in c.iter().zip(old) {
            assert_eq!(p.state(), ProcessState::Idle);
            assert_ne!(*p.params(), previous);
            assert_eq!(pen.clears(), 2);
            assert_eq!(pen.commands()[1], PenCommand::MoveTo(p.start_point()));
            assert_eq!(pen.segment_count(), 0);
        }
    }

    #[test]
    fn never_left_all_complete() {
        // R = 50 on this canvas, so no curve needs more than 43 turns.
        let config = AnimationConfig {
            count: 2,
            canvas: Canvas::new(100, 100),
            ..AnimationConfig::default()
        };
        let mut c =
            AnimationCoordinator::new(config, ParameterSampler::seeded(8), |_| RecordingPen::new()).unwrap();
        for _ in 0..5_000 {
            c.tick().unwrap();
            assert!(!c.all_complete());
            assert!(c.iter().any(|(_, p, _)| p.state() != ProcessState::Complete));
        }
        assert!(c.cycles() >= 1);
    }

    #[test]
    fn restarted_pen_is_shown_again() {
        let mut c = coordinator(1, 4);
        let key = c.keys().next().unwrap();
        let steps = longest_run(&c);
        for _ in 0..steps - 1 {
            c.tick().unwrap();
        }
        assert!(c.pen(key).unwrap().is_visible());
        // The last step completes, hides, then restarts and shows again.
        let report = c.tick().unwrap();
        assert_eq!(report.completed, 1);
        assert!(report.restarted);
        assert!(c.pen(key).unwrap().is_visible());
    }

    #[test]
    fn manual_restart_mid_draw() {
        let mut c = coordinator(2, 13);
        for _ in 0..10 {
            c.tick().unwrap();
        }
        c.restart_all().unwrap();
        for (_, p, pen) in c.iter() {
            assert_eq!(p.steps_taken(), 0);
            assert_eq!(pen.segment_count(), 0);
        }
        assert_eq!(c.cycles(), 1);
    }

    #[test]
    fn failed_restart_leaves_every_curve_untouched() {
        // On a 100x100 canvas R is 50. A step this small fits periods up to 9
        // in the step counter, so most sampled curves cannot be stepped.
        let config = AnimationConfig {
            count: 1,
            canvas: Canvas::new(100, 100),
            step_degrees: 4e-13,
            ..AnimationConfig::default()
        };
        let mut failures = 0;
        for seed in 0..200 {
            let Ok(mut c) =
                AnimationCoordinator::new(config, ParameterSampler::seeded(seed), |_| RecordingPen::new())
            else {
                continue;
            };
            c.tick().unwrap();
            let before: Vec<_> = c.iter().map(|(k, p, pen)| (k, p.clone(), pen.commands().to_vec())).collect();
            let Err(err) = c.restart_all() else {
                continue;
            };
            assert!(matches!(
                err,
                SpiroError::InvalidParameters(ParameterError::TooManySteps { .. })
            ));
            let after: Vec<_> = c.iter().map(|(k, p, pen)| (k, p.clone(), pen.commands().to_vec())).collect();
            assert_eq!(before, after);
            assert_eq!(c.cycles(), 0);
            failures += 1;
        }
        assert!(failures > 0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = coordinator(3, 77);
        let mut b = coordinator(3, 77);
        for _ in 0..300 {
            a.tick().unwrap();
            b.tick().unwrap();
        }
        a.restart_all().unwrap();
        b.restart_all().unwrap();
        let pa: Vec<_> = a.iter().map(|(_, p, _)| *p.params()).collect();
        let pb: Vec<_> = b.iter().map(|(_, p, _)| *p.params()).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn toggle_visibility_keeps_stepping() {
        let mut c = coordinator(2, 3);
        c.toggle_visibility();
        for key in c.keys().collect::<Vec<_>>() {
            assert_eq!(c.is_visible(key), Some(false));
            assert!(!c.pen(key).unwrap().is_visible());
        }
        let report = c.tick().unwrap();
        assert_eq!(report.advanced, 2);

        c.toggle_visibility();
        for key in c.keys().collect::<Vec<_>>() {
            assert_eq!(c.is_visible(key), Some(true));
            assert!(c.pen(key).unwrap().is_visible());
        }
    }

    #[test]
    fn hidden_curves_stay_hidden_on_restart() {
        let mut c = coordinator(2, 3);
        c.toggle_visibility();
        c.restart_all().unwrap();
        for (_, _, pen) in c.iter() {
            assert!(!pen.commands().contains(&PenCommand::Show));
        }
    }

    #[derive(Debug)]
    struct KeyedPen(CurveKey);

    impl Renderer for KeyedPen {
        fn move_to(&mut self, _point: crate::math::Point2) {}
        fn line_to(&mut self, _point: crate::math::Point2) {}
        fn set_color(&mut self, _color: crate::geometry::Color) {}
        fn show(&mut self) {}
        fn hide(&mut self) {}
        fn clear(&mut self) {}
    }

    #[test]
    fn pens_receive_their_key() {
        let config = AnimationConfig {
            count: 3,
            ..AnimationConfig::default()
        };
        let c = AnimationCoordinator::new(config, ParameterSampler::seeded(1), KeyedPen).unwrap();
        for key in c.keys() {
            assert_eq!(c.pen(key).unwrap().0, key);
        }
    }

    #[test]
    fn small_canvas_rejected() {
        let config = AnimationConfig {
            canvas: Canvas::new(50, 50),
            ..AnimationConfig::default()
        };
        let err = AnimationCoordinator::new(config, ParameterSampler::seeded(1), |_| RecordingPen::new()).unwrap_err();
        assert!(matches!(
            err,
            SpiroError::InvalidParameters(ParameterError::CanvasTooSmall { .. })
        ));
    }

    #[test]
    fn empty_coordinator_never_restarts() {
        let mut c = coordinator(0, 1);
        assert!(c.is_empty());
        let report = c.tick().unwrap();
        assert_eq!(report, TickReport::default());
        assert_eq!(c.cycles(), 0);
    }
}
