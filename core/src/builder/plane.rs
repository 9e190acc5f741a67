use log::{debug, trace};

use super::{NoiseMapBuilder, check_bounds, check_size};
use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::kernel::linear_interp;
use crate::map::NoiseMap;
use crate::model;

/// Samples the y = 0 plane over an x/z rectangle.
///
/// With seamless tiling on, every cell blends the four copies of the
/// rectangle that meet at it, so opposite edges of the map match.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneMapBuilder {
    width: usize,
    height: usize,
    x_bounds: (f64, f64),
    z_bounds: (f64, f64),
    seamless: bool,
}

impl PlaneMapBuilder {
    /// Builder for a `width` x `height` map over [-1, 1] x [-1, 1].
    pub fn new(width: usize, height: usize) -> Result<Self, NoiseError> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            x_bounds: (-1.0, 1.0),
            z_bounds: (-1.0, 1.0),
            seamless: false,
        })
    }

    pub fn with_bounds(
        mut self,
        lower_x: f64,
        upper_x: f64,
        lower_z: f64,
        upper_z: f64,
    ) -> Result<Self, NoiseError> {
        self.set_bounds(lower_x, upper_x, lower_z, upper_z)?;
        Ok(self)
    }

    pub fn with_seamless(mut self, seamless: bool) -> Self {
        self.seamless = seamless;
        self
    }

    pub fn set_bounds(
        &mut self,
        lower_x: f64,
        upper_x: f64,
        lower_z: f64,
        upper_z: f64,
    ) -> Result<(), NoiseError> {
        check_bounds(lower_x, upper_x)?;
        check_bounds(lower_z, upper_z)?;
        self.x_bounds = (lower_x, upper_x);
        self.z_bounds = (lower_z, upper_z);
        Ok(())
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        self.x_bounds
    }

    pub fn z_bounds(&self) -> (f64, f64) {
        self.z_bounds
    }

    pub fn is_seamless(&self) -> bool {
        self.seamless
    }

    fn sample(&self, source: &dyn NoiseGenerator, x: f64, z: f64) -> f64 {
        if !self.seamless {
            return model::plane(source, x, z);
        }
        let (lower_x, upper_x) = self.x_bounds;
        let (lower_z, upper_z) = self.z_bounds;
        let x_extent = upper_x - lower_x;
        let z_extent = upper_z - lower_z;

        let sw = model::plane(source, x, z);
        let se = model::plane(source, x + x_extent, z);
        let nw = model::plane(source, x, z + z_extent);
        let ne = model::plane(source, x + x_extent, z + z_extent);
        let x_blend = 1.0 - (x - lower_x) / x_extent;
        let z_blend = 1.0 - (z - lower_z) / z_extent;
        let z0 = linear_interp(sw, se, x_blend);
        let z1 = linear_interp(nw, ne, x_blend);
        linear_interp(z0, z1, z_blend)
    }
}

impl NoiseMapBuilder for PlaneMapBuilder {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn build_with_progress(
        &self,
        source: &dyn NoiseGenerator,
        progress: &mut dyn FnMut(usize),
    ) -> Result<NoiseMap, NoiseError> {
        debug!(
            "building {}x{} plane map over x {:?} z {:?} (seamless: {})",
            self.width, self.height, self.x_bounds, self.z_bounds, self.seamless
        );
        let mut map = NoiseMap::new(self.width, self.height)?;
        let (lower_x, upper_x) = self.x_bounds;
        let (lower_z, upper_z) = self.z_bounds;
        let x_delta = (upper_x - lower_x) / self.width as f64;
        let z_delta = (upper_z - lower_z) / self.height as f64;

        let mut z = lower_z;
        for row in 0..self.height {
            let mut x = lower_x;
            for cell in map.row_mut(row) {
                *cell = self.sample(source, x, z);
                x += x_delta;
            }
            z += z_delta;
            trace!("plane row {row} done");
            progress(row);
        }
        Ok(map)
    }
}
