use log::{debug, trace};

use super::{NoiseMapBuilder, check_bounds, check_size};
use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::map::NoiseMap;
use crate::model;

/// Samples a unit cylinder around the y axis. Columns run over the angle
/// (degrees), rows over the height.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderMapBuilder {
    width: usize,
    height: usize,
    angle_bounds: (f64, f64),
    height_bounds: (f64, f64),
}

impl CylinderMapBuilder {
    /// Builder for a full turn, -180° to 180°, over heights [-1, 1].
    pub fn new(width: usize, height: usize) -> Result<Self, NoiseError> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            angle_bounds: (-180.0, 180.0),
            height_bounds: (-1.0, 1.0),
        })
    }

    pub fn with_bounds(
        mut self,
        lower_angle: f64,
        upper_angle: f64,
        lower_height: f64,
        upper_height: f64,
    ) -> Result<Self, NoiseError> {
        self.set_bounds(lower_angle, upper_angle, lower_height, upper_height)?;
        Ok(self)
    }

    pub fn set_bounds(
        &mut self,
        lower_angle: f64,
        upper_angle: f64,
        lower_height: f64,
        upper_height: f64,
    ) -> Result<(), NoiseError> {
        check_bounds(lower_angle, upper_angle)?;
        check_bounds(lower_height, upper_height)?;
        self.angle_bounds = (lower_angle, upper_angle);
        self.height_bounds = (lower_height, upper_height);
        Ok(())
    }

    pub fn angle_bounds(&self) -> (f64, f64) {
        self.angle_bounds
    }

    pub fn height_bounds(&self) -> (f64, f64) {
        self.height_bounds
    }
}

impl NoiseMapBuilder for CylinderMapBuilder {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn build_with_progress(
        &self,
        source: &dyn NoiseGenerator,
        progress: &mut dyn FnMut(usize),
    ) -> Result<NoiseMap, NoiseError> {
        debug!(
            "building {}x{} cylinder map over angle {:?} height {:?}",
            self.width, self.height, self.angle_bounds, self.height_bounds
        );
        let mut map = NoiseMap::new(self.width, self.height)?;
        let (lower_angle, upper_angle) = self.angle_bounds;
        let (lower_height, upper_height) = self.height_bounds;
        let angle_delta = (upper_angle - lower_angle) / self.width as f64;
        let height_delta = (upper_height - lower_height) / self.height as f64;

        let mut h = lower_height;
        for row in 0..self.height {
            let mut angle = lower_angle;
            for cell in map.row_mut(row) {
                *cell = model::cylinder(source, angle, h);
                angle += angle_delta;
            }
            h += height_delta;
            trace!("cylinder row {row} done");
            progress(row);
        }
        Ok(map)
    }
}
