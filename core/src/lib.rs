// noisegraph: coherent noise kernel, generators and the module graph that wires them together
pub mod builder;
pub mod error;
pub mod generators;
pub mod graph;
pub mod kernel;
pub mod map;
pub mod model;
pub mod modifiers;
pub mod render;
mod vectors;

pub use builder::{CylinderMapBuilder, NoiseMapBuilder, PlaneMapBuilder, SphereMapBuilder};
pub use error::NoiseError;
pub use generators::{
    Billow, Checkerboard, Constant, Cylinders, DistanceFunction, Perlin, RidgedMulti, Spheres,
    Voronoi,
};
pub use graph::{GraphModule, Module, NodeId, NoiseGraph};
pub use kernel::NoiseQuality;
pub use map::NoiseMap;
pub use render::ColorGradient;

/// Highest octave count any fractal generator accepts.
pub const MAX_OCTAVE: usize = 30;

// Noise source that can be sampled in 3D or 6D.
// 3D-only implementations keep the default `get6(...)`, which panics.
pub trait NoiseGenerator {
    // Sample noise at (x, y, z).
    fn get3(&self, x: f64, y: f64, z: f64) -> f64;

    // Sample noise at (x, y, z, w, u, v).
    #[allow(unused_variables)]
    fn get6(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        panic!("get6 not implemented for this generator");
    }
}

impl<T: NoiseGenerator + ?Sized> NoiseGenerator for &T {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).get3(x, y, z)
    }

    fn get6(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        (**self).get6(x, y, z, w, u, v)
    }
}
