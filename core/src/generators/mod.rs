// Leaf modules: generators need no source modules.
mod billow;
mod checkerboard;
mod constant;
mod cylinders;
mod perlin;
mod ridged_multi;
mod spheres;
mod voronoi;

pub use billow::Billow;
pub use checkerboard::Checkerboard;
pub use constant::Constant;
pub use cylinders::Cylinders;
pub use perlin::Perlin;
pub use ridged_multi::{RidgedMulti, RidgedMultiParams};
pub use spheres::Spheres;
pub use voronoi::{DistanceFunction, Voronoi, closest};

use crate::MAX_OCTAVE;
use crate::error::NoiseError;

pub(crate) fn check_octave_count(count: usize) -> Result<(), NoiseError> {
    if (1..=MAX_OCTAVE).contains(&count) {
        Ok(())
    } else {
        Err(NoiseError::InvalidOctaveCount {
            count,
            max: MAX_OCTAVE,
        })
    }
}
