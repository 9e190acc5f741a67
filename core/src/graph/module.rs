use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::generators::{
    Billow, Checkerboard, Constant, Cylinders, Perlin, RidgedMulti, Spheres, Voronoi,
};
use crate::modifiers::{
    Cache, Clamp, Curve, Exponent, RotatePoint, ScaleBias, ScalePoint, Select, Terrace,
    TranslatePoint, Turbulence,
};

/// User-supplied leaf generator. Not serializable.
#[derive(Clone)]
pub struct CustomGenerator(pub Arc<dyn NoiseGenerator + Send + Sync>);

impl fmt::Debug for CustomGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomGenerator")
    }
}

/// Every kind of node the graph can hold, with its parameters.
///
/// The number of sources a node needs is fixed by its kind, see
/// [`Module::source_count`]. Sources are addressed by slot:
///
/// | kind | slots |
/// |---|---|
/// | `Blend` | 0, 1 blended; 2 control |
/// | `Select` | 0 outside bounds; 1 inside; 2 control |
/// | `Displace` | 0 sampled; 1, 2, 3 x/y/z displacement |
/// | binary ops | 0 left, 1 right |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Module {
    // generators
    Billow(Billow),
    Checkerboard,
    Constant(Constant),
    Cylinders(Cylinders),
    Perlin(Perlin),
    RidgedMulti(RidgedMulti),
    Spheres(Spheres),
    Voronoi(Voronoi),
    #[serde(skip)]
    Custom(CustomGenerator),

    // combiners and modifiers
    Abs,
    Add,
    Blend,
    Cache(Cache),
    Clamp(Clamp),
    Curve(Curve),
    Displace,
    Exponent(Exponent),
    Invert,
    Max,
    Min,
    Multiply,
    Power,
    RotatePoint(RotatePoint),
    ScaleBias(ScaleBias),
    ScalePoint(ScalePoint),
    Select(Select),
    Subtract,
    Terrace(Terrace),
    TranslatePoint(TranslatePoint),
    Turbulence(Turbulence),
}

impl Module {
    /// Wraps any generator as a leaf module.
    pub fn custom(generator: impl NoiseGenerator + Send + Sync + 'static) -> Self {
        Module::Custom(CustomGenerator(Arc::new(generator)))
    }

    /// Number of source modules that must be connected before evaluation.
    pub fn source_count(&self) -> usize {
        match self {
            Module::Billow(_)
            | Module::Checkerboard
            | Module::Constant(_)
            | Module::Cylinders(_)
            | Module::Perlin(_)
            | Module::RidgedMulti(_)
            | Module::Spheres(_)
            | Module::Voronoi(_)
            | Module::Custom(_) => 0,
            Module::Abs
            | Module::Cache(_)
            | Module::Clamp(_)
            | Module::Curve(_)
            | Module::Exponent(_)
            | Module::Invert
            | Module::RotatePoint(_)
            | Module::ScaleBias(_)
            | Module::ScalePoint(_)
            | Module::Terrace(_)
            | Module::TranslatePoint(_)
            | Module::Turbulence(_) => 1,
            Module::Add
            | Module::Max
            | Module::Min
            | Module::Multiply
            | Module::Power
            | Module::Subtract => 2,
            Module::Blend | Module::Select(_) => 3,
            Module::Displace => 4,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Module::Billow(_) => "Billow",
            Module::Checkerboard => "Checkerboard",
            Module::Constant(_) => "Constant",
            Module::Cylinders(_) => "Cylinders",
            Module::Perlin(_) => "Perlin",
            Module::RidgedMulti(_) => "RidgedMulti",
            Module::Spheres(_) => "Spheres",
            Module::Voronoi(_) => "Voronoi",
            Module::Custom(_) => "Custom",
            Module::Abs => "Abs",
            Module::Add => "Add",
            Module::Blend => "Blend",
            Module::Cache(_) => "Cache",
            Module::Clamp(_) => "Clamp",
            Module::Curve(_) => "Curve",
            Module::Displace => "Displace",
            Module::Exponent(_) => "Exponent",
            Module::Invert => "Invert",
            Module::Max => "Max",
            Module::Min => "Min",
            Module::Multiply => "Multiply",
            Module::Power => "Power",
            Module::RotatePoint(_) => "RotatePoint",
            Module::ScaleBias(_) => "ScaleBias",
            Module::ScalePoint(_) => "ScalePoint",
            Module::Select(_) => "Select",
            Module::Subtract => "Subtract",
            Module::Terrace(_) => "Terrace",
            Module::TranslatePoint(_) => "TranslatePoint",
            Module::Turbulence(_) => "Turbulence",
        }
    }

    /// Whether the node can take part in a 6D evaluation. Custom generators
    /// are trusted to implement `get6`.
    pub fn supports_6d(&self) -> bool {
        !matches!(
            self,
            Module::Checkerboard
                | Module::Cylinders(_)
                | Module::Spheres(_)
                | Module::Voronoi(_)
                | Module::Displace
                | Module::RotatePoint(_)
                | Module::ScalePoint(_)
                | Module::TranslatePoint(_)
                | Module::Turbulence(_)
        )
    }

    pub fn as_cache(&self) -> Option<&Cache> {
        match self {
            Module::Cache(cache) => Some(cache),
            _ => None,
        }
    }

    // Parameter invariants; setters enforce them, deserialized modules are
    // checked here.
    pub(crate) fn validate(&self) -> Result<(), NoiseError> {
        match self {
            Module::Billow(m) => m.validate(),
            Module::Perlin(m) => m.validate(),
            Module::RidgedMulti(m) => m.validate(),
            Module::Clamp(m) => m.validate(),
            Module::Curve(m) => m.validate(),
            Module::Select(m) => m.validate(),
            Module::Terrace(m) => m.validate(),
            Module::Turbulence(m) => m.validate(),
            _ => Ok(()),
        }
    }
}

macro_rules! impl_from_module {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Module {
                fn from(m: $ty) -> Self {
                    Module::$ty(m)
                }
            }
        )*
    };
}

impl_from_module!(
    Billow,
    Constant,
    Cylinders,
    Perlin,
    RidgedMulti,
    Spheres,
    Voronoi,
    Cache,
    Clamp,
    Curve,
    Exponent,
    RotatePoint,
    ScaleBias,
    ScalePoint,
    Select,
    Terrace,
    TranslatePoint,
    Turbulence,
);

impl From<Checkerboard> for Module {
    fn from(_: Checkerboard) -> Self {
        Module::Checkerboard
    }
}

#[cfg(test)]
mod tests {
    use super::Module;
    use crate::generators::{Constant, Perlin, Voronoi};
    use crate::modifiers::{Cache, Select};

    #[test]
    fn arities() {
        assert_eq!(Module::from(Perlin::default()).source_count(), 0);
        assert_eq!(Module::Abs.source_count(), 1);
        assert_eq!(Module::from(Cache::new()).source_count(), 1);
        assert_eq!(Module::Power.source_count(), 2);
        assert_eq!(Module::from(Select::default()).source_count(), 3);
        assert_eq!(Module::Blend.source_count(), 3);
        assert_eq!(Module::Displace.source_count(), 4);
    }

    #[test]
    fn six_d_support() {
        assert!(Module::from(Perlin::default()).supports_6d());
        assert!(Module::from(Constant::new(1.0)).supports_6d());
        assert!(Module::Blend.supports_6d());
        assert!(!Module::from(Voronoi::default()).supports_6d());
        assert!(!Module::Displace.supports_6d());
    }

    #[test]
    fn kind_names() {
        assert_eq!(Module::Subtract.kind(), "Subtract");
        assert_eq!(Module::from(Voronoi::default()).kind(), "Voronoi");
    }
}
