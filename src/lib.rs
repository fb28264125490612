pub mod animation;
pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod sampling;

pub use error::{ParameterError, Result, SpiroError};
