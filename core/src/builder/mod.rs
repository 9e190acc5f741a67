//! Fill a [`NoiseMap`] by sampling a generator over a surface.
mod cylinder;
mod plane;
mod sphere;

pub use cylinder::CylinderMapBuilder;
pub use plane::PlaneMapBuilder;
pub use sphere::SphereMapBuilder;

use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::map::NoiseMap;

pub trait NoiseMapBuilder {
    /// Destination size as (width, height).
    fn size(&self) -> (usize, usize);

    /// Samples `source` once per cell. `progress` is called with the index
    /// of each row after it is written.
    fn build_with_progress(
        &self,
        source: &dyn NoiseGenerator,
        progress: &mut dyn FnMut(usize),
    ) -> Result<NoiseMap, NoiseError>;

    fn build(&self, source: &dyn NoiseGenerator) -> Result<NoiseMap, NoiseError> {
        self.build_with_progress(source, &mut |_| {})
    }
}

pub(crate) fn check_size(width: usize, height: usize) -> Result<(), NoiseError> {
    if width == 0 || height == 0 {
        return Err(NoiseError::InvalidMapSize { width, height });
    }
    Ok(())
}

pub(crate) fn check_bounds(lower: f64, upper: f64) -> Result<(), NoiseError> {
    if lower < upper {
        Ok(())
    } else {
        Err(NoiseError::InvalidBounds { lower, upper })
    }
}
