use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::generators::check_octave_count;
use crate::kernel::{
    NoiseQuality, gradient_coherent_noise_3d, gradient_coherent_noise_6d, make_int32_range,
};

// Like Perlin, but every octave is folded through 2|s| - 1, which turns the
// zero crossings into rounded "billowy" lumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Billow {
    frequency: f64,
    lacunarity: f64,
    persistence: f64,
    octave_count: usize,
    quality: NoiseQuality,
    seed: i32,
}

impl Default for Billow {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
            octave_count: 6,
            quality: NoiseQuality::Standard,
            seed: 0,
        }
    }
}

impl Billow {
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_octave_count(mut self, octave_count: usize) -> Result<Self, NoiseError> {
        self.set_octave_count(octave_count)?;
        Ok(self)
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn lacunarity(&self) -> f64 {
        self.lacunarity
    }

    pub fn persistence(&self) -> f64 {
        self.persistence
    }

    pub fn octave_count(&self) -> usize {
        self.octave_count
    }

    pub fn quality(&self) -> NoiseQuality {
        self.quality
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn set_lacunarity(&mut self, lacunarity: f64) {
        self.lacunarity = lacunarity;
    }

    pub fn set_persistence(&mut self, persistence: f64) {
        self.persistence = persistence;
    }

    pub fn set_quality(&mut self, quality: NoiseQuality) {
        self.quality = quality;
    }

    pub fn set_seed(&mut self, seed: i32) {
        self.seed = seed;
    }

    pub fn set_octave_count(&mut self, octave_count: usize) -> Result<(), NoiseError> {
        check_octave_count(octave_count)?;
        self.octave_count = octave_count;
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), NoiseError> {
        check_octave_count(self.octave_count)
    }
}

impl NoiseGenerator for Billow {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let (mut x, mut y, mut z) = (x * self.frequency, y * self.frequency, z * self.frequency);

        for octave in 0..self.octave_count {
            let seed = self.seed.wrapping_add(octave as i32);
            let signal = gradient_coherent_noise_3d(
                make_int32_range(x),
                make_int32_range(y),
                make_int32_range(z),
                seed,
                self.quality,
            );
            value += (2.0 * signal.abs() - 1.0) * amplitude;

            x *= self.lacunarity;
            y *= self.lacunarity;
            z *= self.lacunarity;
            amplitude *= self.persistence;
        }

        value + 0.5
    }

    fn get6(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut p = [x, y, z, w, u, v].map(|c| c * self.frequency);

        for octave in 0..self.octave_count {
            let seed = self.seed.wrapping_add(octave as i32);
            let signal = gradient_coherent_noise_6d(&p.map(make_int32_range), seed, self.quality);
            value += (2.0 * signal.abs() - 1.0) * amplitude;

            p = p.map(|c| c * self.lacunarity);
            amplitude *= self.persistence;
        }

        value + 0.5
    }
}

#[cfg(test)]
mod tests {
    use crate::NoiseGenerator;

    use super::Billow;

    #[test]
    fn billow_determinism() {
        let b = Billow::new(99);
        assert_eq!(b.get3(0.1, 0.2, 0.3).to_bits(), b.get3(0.1, 0.2, 0.3).to_bits());
    }

    #[test]
    fn billow_single_octave_at_lattice() {
        // Signal is zero on the lattice, so one octave gives 2*0 - 1 + 0.5.
        let b = Billow::default().with_octave_count(1).unwrap();
        assert_eq!(b.get3(2.0, -3.0, 4.0), -0.5);
    }

    #[test]
    fn billow_is_folded_perlin() {
        use crate::Perlin;
        let b = Billow::new(3).with_octave_count(1).unwrap();
        let p = Perlin::new(3).with_octave_count(1).unwrap();
        let (x, y, z) = (0.37, 1.91, -2.4);
        let expected = 2.0 * p.get3(x, y, z).abs() - 1.0 + 0.5;
        assert_eq!(b.get3(x, y, z), expected);
    }

    #[test]
    fn billow_rejects_bad_octaves() {
        assert!(Billow::default().with_octave_count(0).is_err());
        assert!(Billow::default().with_octave_count(31).is_err());
    }
}
