use image::{GrayImage, Luma};

use crate::error::NoiseError;

/// Dense 2D buffer of noise values, stored row by row.
///
/// Reads outside the map return the border value; writes outside it are
/// ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoiseMap {
    width: usize,
    height: usize,
    border_value: f64,
    values: Vec<f64>,
}

impl NoiseMap {
    pub fn new(width: usize, height: usize) -> Result<Self, NoiseError> {
        let mut map = Self::default();
        map.set_size(width, height)?;
        Ok(map)
    }

    /// Resizes the map. Existing contents are discarded and every cell is
    /// reset to 0.0.
    pub fn set_size(&mut self, width: usize, height: usize) -> Result<(), NoiseError> {
        if width == 0 || height == 0 {
            return Err(NoiseError::InvalidMapSize { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(NoiseError::InvalidMapSize { width, height })?;
        self.width = width;
        self.height = height;
        self.values.clear();
        self.values.resize(len, 0.0);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn border_value(&self) -> f64 {
        self.border_value
    }

    pub fn set_border_value(&mut self, border_value: f64) {
        self.border_value = border_value;
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    pub fn get(&self, x: i32, y: i32) -> f64 {
        match self.index(x, y) {
            Some(i) => self.values[i],
            None => self.border_value,
        }
    }

    pub fn set(&mut self, x: i32, y: i32, value: f64) {
        if let Some(i) = self.index(x, y) {
            self.values[i] = value;
        }
    }

    pub fn clear(&mut self, value: f64) {
        self.values.fill(value);
    }

    pub fn row(&self, y: usize) -> &[f64] {
        &self.values[y * self.width..(y + 1) * self.width]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [f64] {
        &mut self.values[y * self.width..(y + 1) * self.width]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest and largest value, or `None` for an empty map.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Grayscale image with the map's own range stretched to 0..=255. A flat
    /// map comes out mid-gray.
    pub fn to_gray_image(&self) -> GrayImage {
        let (min, max) = self.min_max().unwrap_or((0.0, 0.0));
        let mut img = GrayImage::new(self.width as u32, self.height as u32);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let v = self.values[y as usize * self.width + x as usize];
            let norm = if (max - min).abs() < f64::EPSILON {
                0.5
            } else {
                (v - min) / (max - min)
            };
            *pixel = Luma([(norm * 255.0).round() as u8]);
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::NoiseMap;
    use crate::error::NoiseError;

    #[test]
    fn size_must_be_positive() {
        assert!(matches!(
            NoiseMap::new(0, 4),
            Err(NoiseError::InvalidMapSize { width: 0, height: 4 })
        ));
        assert!(NoiseMap::new(3, 0).is_err());
    }

    #[test]
    fn border_value_outside() {
        let mut map = NoiseMap::new(4, 3).unwrap();
        map.set_border_value(-9.0);
        map.set(1, 2, 0.5);
        assert_eq!(map.get(1, 2), 0.5);
        assert_eq!(map.get(-1, 0), -9.0);
        assert_eq!(map.get(4, 0), -9.0);
        assert_eq!(map.get(0, 3), -9.0);
        // Out-of-range writes are dropped.
        map.set(10, 10, 1.0);
        assert_eq!(map.values().iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn rows_are_contiguous() {
        let mut map = NoiseMap::new(3, 2).unwrap();
        map.set(0, 1, 1.0);
        map.set(2, 1, 3.0);
        assert_eq!(map.row(1), &[1.0, 0.0, 3.0]);
        assert_eq!(map.row(0), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn resize_resets() {
        let mut map = NoiseMap::new(2, 2).unwrap();
        map.clear(7.0);
        map.set_size(3, 1).unwrap();
        assert_eq!(map.values(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn gray_image_stretches_range() {
        let mut map = NoiseMap::new(2, 1).unwrap();
        map.set(0, 0, -1.0);
        map.set(1, 0, 3.0);
        assert_eq!(map.min_max(), Some((-1.0, 3.0)));
        let img = map.to_gray_image();
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [255]);
    }

    #[test]
    fn flat_map_is_mid_gray() {
        let map = NoiseMap::new(2, 2).unwrap();
        assert_eq!(map.to_gray_image().get_pixel(1, 1).0, [128]);
    }
}
