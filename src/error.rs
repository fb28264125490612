use thiserror::Error;

/// Top-level error type for the spirograph engine.
#[derive(Debug, Error)]
pub enum SpiroError {
    #[error(transparent)]
    InvalidParameters(#[from] ParameterError),

    #[error("degenerate geometry: {0}")]
    Degenerate(&'static str),

    /// Failure reported by a rendering surface or scheduler.
    ///
    /// The engine never constructs this itself; hosts use it to surface
    /// their own failures through the same error type.
    #[error("host integration failed: {0}")]
    Host(String),
}

/// Rejected curve, step, or canvas parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{name} must be a positive integer, got {value}")]
    NonPositiveRadius { name: &'static str, value: u32 },

    #[error("{parameter} must be finite, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("step angle must be a positive number of degrees, got {0}")]
    InvalidStep(f64),

    #[error("step of {step} degrees is too small to cover {span} degrees")]
    TooManySteps { step: f64, span: f64 },

    #[error("canvas {width}x{height} is too small to sample an outer radius of at least 50")]
    CanvasTooSmall { width: u32, height: u32 },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Convenience type alias for results using [`SpiroError`].
pub type Result<T> = std::result::Result<T, SpiroError>;
