//! Timer-driven drawing of many curves at once.
//!
//! A [`CurveProcess`] walks one curve a step at a time. An
//! [`AnimationCoordinator`] owns a set of them, advances all on each host
//! tick and restarts them together once every curve has closed.

mod config;
mod coordinator;
mod process;

pub use config::{AnimationConfig, Canvas};
pub use coordinator::{AnimationCoordinator, CurveKey, TickReport};
pub use process::{CurveProcess, ProcessState, Trace, DEFAULT_STEP_DEGREES};
