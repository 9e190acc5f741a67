// Modules that transform the output (or the input point) of their sources.
// Parameter-free combiners (Add, Blend, Displace, ...) have no type of their
// own; their rule lives in the graph evaluator.
mod cache;
mod clamp;
mod curve;
mod exponent;
mod scale_bias;
mod select;
mod terrace;
mod transform;
mod turbulence;

pub use cache::Cache;
pub use clamp::Clamp;
pub use curve::{ControlPoint, Curve};
pub use exponent::Exponent;
pub use scale_bias::ScaleBias;
pub use select::Select;
pub use terrace::Terrace;
pub use transform::{RotatePoint, RotationAngles, ScalePoint, TranslatePoint};
pub use turbulence::{Turbulence, TurbulenceParams};

/// Blend weight for a control value in [-1, 1]: 0 selects source 0, 1
/// selects source 1. Values outside the range are clamped.
pub fn blend_alpha(control: f64) -> f64 {
    ((control + 1.0) / 2.0).clamp(0.0, 1.0)
}
