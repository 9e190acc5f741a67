use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::generators::check_octave_count;
use crate::kernel::{
    NoiseQuality, gradient_coherent_noise_3d, gradient_coherent_noise_6d, make_int32_range,
};

// Fractal sum of gradient noise: each octave doubles (by lacunarity) the
// frequency and scales the amplitude by persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Perlin {
    frequency: f64,   // frequency of the first octave
    lacunarity: f64,  // frequency multiplier between octaves
    persistence: f64, // amplitude multiplier between octaves
    octave_count: usize,
    quality: NoiseQuality,
    seed: i32,
}

impl Default for Perlin {
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

impl Perlin {
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

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_quality(mut self, quality: NoiseQuality) -> Self {
        self.quality = quality;
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

    // Rejects counts outside [1, MAX_OCTAVE]; the previous count is kept.
    pub fn set_octave_count(&mut self, octave_count: usize) -> Result<(), NoiseError> {
        check_octave_count(octave_count)?;
        self.octave_count = octave_count;
        Ok(())
    }

    // For owners that check the count themselves before evaluating.
    pub(crate) fn set_octave_count_unchecked(&mut self, octave_count: usize) {
        self.octave_count = octave_count;
    }

    pub(crate) fn validate(&self) -> Result<(), NoiseError> {
        check_octave_count(self.octave_count)
    }
}

impl NoiseGenerator for Perlin {
    // Sum of octaves; roughly within [-1, 1] for the default persistence
    // but not bounded in general.
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
            value += signal * amplitude;

            x *= self.lacunarity;
            y *= self.lacunarity;
            z *= self.lacunarity;
            amplitude *= self.persistence;
        }

        value
    }

    fn get6(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut p = [x, y, z, w, u, v].map(|c| c * self.frequency);

        for octave in 0..self.octave_count {
            let seed = self.seed.wrapping_add(octave as i32);
            let signal = gradient_coherent_noise_6d(&p.map(make_int32_range), seed, self.quality);
            value += signal * amplitude;

            p = p.map(|c| c * self.lacunarity);
            amplitude *= self.persistence;
        }

        value
    }
}
