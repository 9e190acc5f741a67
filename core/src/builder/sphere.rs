use log::{debug, trace};

use super::{NoiseMapBuilder, check_bounds, check_size};
use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::map::NoiseMap;
use crate::model;

/// Samples the unit sphere. Columns run over longitude from west to east,
/// rows over latitude from south to north, all in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereMapBuilder {
    width: usize,
    height: usize,
    lat_bounds: (f64, f64),
    lon_bounds: (f64, f64),
}

impl SphereMapBuilder {
    /// Builder for the whole globe.
    pub fn new(width: usize, height: usize) -> Result<Self, NoiseError> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            lat_bounds: (-90.0, 90.0),
            lon_bounds: (-180.0, 180.0),
        })
    }

    pub fn with_bounds(
        mut self,
        south: f64,
        north: f64,
        west: f64,
        east: f64,
    ) -> Result<Self, NoiseError> {
        self.set_bounds(south, north, west, east)?;
        Ok(self)
    }

    pub fn set_bounds(
        &mut self,
        south: f64,
        north: f64,
        west: f64,
        east: f64,
    ) -> Result<(), NoiseError> {
        check_bounds(south, north)?;
        check_bounds(west, east)?;
        self.lat_bounds = (south, north);
        self.lon_bounds = (west, east);
        Ok(())
    }

    pub fn lat_bounds(&self) -> (f64, f64) {
        self.lat_bounds
    }

    pub fn lon_bounds(&self) -> (f64, f64) {
        self.lon_bounds
    }
}

impl NoiseMapBuilder for SphereMapBuilder {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn build_with_progress(
        &self,
        source: &dyn NoiseGenerator,
        progress: &mut dyn FnMut(usize),
    ) -> Result<NoiseMap, NoiseError> {
        debug!(
            "building {}x{} sphere map over lat {:?} lon {:?}",
            self.width, self.height, self.lat_bounds, self.lon_bounds
        );
        let mut map = NoiseMap::new(self.width, self.height)?;
        let (south, north) = self.lat_bounds;
        let (west, east) = self.lon_bounds;
        let lon_delta = (east - west) / self.width as f64;
        let lat_delta = (north - south) / self.height as f64;

        let mut lat = south;
        for row in 0..self.height {
            let mut lon = west;
            for cell in map.row_mut(row) {
                *cell = model::sphere(source, lat, lon);
                lon += lon_delta;
            }
            lat += lat_delta;
            trace!("sphere row {row} done");
            progress(row);
        }
        Ok(map)
    }
}
