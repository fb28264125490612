pub mod curve;
mod params;

pub use curve::{Circle, Curve, CurveDomain, Hypotrochoid};
pub use params::{Color, CurveParameters};
