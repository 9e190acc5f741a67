use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;
use palette::{Gradient, LinSrgb};

use crate::error::NoiseError;
use crate::map::NoiseMap;

/// Maps noise values onto colors.
///
/// Points are kept sorted by position; positions are unique. Values below
/// the first point or above the last take that point's color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorGradient {
    points: Vec<(f64, LinSrgb)>,
}

fn rgb8(r: u8, g: u8, b: u8) -> LinSrgb {
    LinSrgb::<u8>::new(r, g, b).into_format()
}

impl ColorGradient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Black at -1, white at 1.
    pub fn grayscale() -> Self {
        Self {
            points: vec![(-1.0, rgb8(0, 0, 0)), (1.0, rgb8(255, 255, 255))],
        }
    }

    /// Deep water through beach, grass and rock up to snow, with sea level
    /// at 0.
    pub fn terrain() -> Self {
        Self {
            points: vec![
                (-1.00, rgb8(0, 0, 128)),
                (-0.20, rgb8(32, 64, 128)),
                (-0.04, rgb8(64, 96, 192)),
                (-0.02, rgb8(192, 192, 128)),
                (0.00, rgb8(0, 192, 0)),
                (0.25, rgb8(192, 192, 0)),
                (0.50, rgb8(160, 96, 64)),
                (0.75, rgb8(128, 255, 255)),
                (1.00, rgb8(255, 255, 255)),
            ],
        }
    }

    pub fn add_point(&mut self, position: f64, color: LinSrgb) -> Result<(), NoiseError> {
        match self.points.binary_search_by(|(p, _)| p.total_cmp(&position)) {
            Ok(_) => Err(NoiseError::DuplicateControlPoint(position)),
            Err(index) => {
                self.points.insert(index, (position, color));
                Ok(())
            }
        }
    }

    pub fn with_point(mut self, position: f64, color: LinSrgb) -> Result<Self, NoiseError> {
        self.add_point(position, color)?;
        Ok(self)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[(f64, LinSrgb)] {
        &self.points
    }

    fn gradient(&self) -> Option<Gradient<LinSrgb>> {
        if self.points.is_empty() {
            return None;
        }
        Some(Gradient::with_domain(
            self.points.iter().map(|&(p, c)| (p as f32, c)).collect(),
        ))
    }

    /// Color for a single value; black when the gradient has no points.
    pub fn color(&self, value: f64) -> LinSrgb {
        match self.gradient() {
            Some(gradient) => gradient.get(value as f32),
            None => LinSrgb::new(0.0, 0.0, 0.0),
        }
    }
}

/// Colors every cell of `map` through `gradient`.
pub fn render_image(map: &NoiseMap, gradient: &ColorGradient) -> RgbImage {
    let mut img = RgbImage::new(map.width() as u32, map.height() as u32);
    let palette = gradient.gradient();
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let col = match &palette {
            Some(palette) => palette.get(map.get(x as i32, y as i32) as f32),
            None => LinSrgb::new(0.0, 0.0, 0.0),
        };
        let rgb = col.into_format::<u8>();
        *pixel = Rgb([rgb.red, rgb.green, rgb.blue]);
    }
    img
}

/// Renders `map` and saves it as a PNG at `path`.
pub fn write_png(
    map: &NoiseMap,
    gradient: &ColorGradient,
    path: impl AsRef<Path>,
) -> Result<(), NoiseError> {
    let path = path.as_ref();
    render_image(map, gradient).save_with_format(path, image::ImageFormat::Png)?;
    info!("saved {}x{} map to {}", map.width(), map.height(), path.display());
    Ok(())
}
