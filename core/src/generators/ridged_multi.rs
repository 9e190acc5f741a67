use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::generators::check_octave_count;
use crate::kernel::{
    NoiseQuality, gradient_coherent_noise_3d, gradient_coherent_noise_6d, make_int32_range,
};
use crate::{MAX_OCTAVE, NoiseGenerator};

/// Serializable parameters of a [`RidgedMulti`]; the spectral weights are
/// derived from them on load. The octave count is checked when the module
/// is validated, like every other generator's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgedMultiParams {
    pub frequency: f64,
    pub lacunarity: f64,
    pub exponent: f64,
    pub offset: f64,
    pub gain: f64,
    pub octave_count: usize,
    pub quality: NoiseQuality,
    pub seed: i32,
}

impl Default for RidgedMultiParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            lacunarity: 2.0,
            exponent: 1.0,
            offset: 1.0,
            gain: 2.0,
            octave_count: 6,
            quality: NoiseQuality::Standard,
            seed: 0,
        }
    }
}

/// Ridged multifractal noise.
///
/// Each octave is sharpened into a ridge (`(offset - |s|)^2`) and weighted by
/// the previous octave's ridge, so detail gathers along the ridge lines.
/// Octaves are summed with spectral weights `f_i^-exponent`, which are
/// precomputed and refreshed whenever `lacunarity` or `exponent` change.
///
/// With a single octave the output lies in `[-1.0, 0.25]`: the ridge term is
/// within `[0, 1]` and the result is scaled by `1.25` and shifted by `-1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RidgedMultiParams", into = "RidgedMultiParams")]
pub struct RidgedMulti {
    params: RidgedMultiParams,
    spectral_weights: [f64; MAX_OCTAVE],
}

impl Default for RidgedMulti {
    fn default() -> Self {
        Self::from_params(RidgedMultiParams::default())
    }
}

impl From<RidgedMultiParams> for RidgedMulti {
    fn from(params: RidgedMultiParams) -> Self {
        Self::from_params(params)
    }
}

impl From<RidgedMulti> for RidgedMultiParams {
    fn from(ridged: RidgedMulti) -> Self {
        ridged.params
    }
}

impl RidgedMulti {
    pub fn new(seed: i32) -> Self {
        Self::from_params(RidgedMultiParams {
            seed,
            ..RidgedMultiParams::default()
        })
    }

    fn from_params(params: RidgedMultiParams) -> Self {
        let mut ridged = Self {
            params,
            spectral_weights: [0.0; MAX_OCTAVE],
        };
        ridged.calc_spectral_weights();
        ridged
    }

    // The running frequency is local; `params.frequency` is left untouched.
    fn calc_spectral_weights(&mut self) {
        let mut frequency = 1.0f64;
        for weight in self.spectral_weights.iter_mut() {
            *weight = frequency.powf(-self.params.exponent);
            frequency *= self.params.lacunarity;
        }
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.params.frequency = frequency;
        self
    }

    pub fn with_octave_count(mut self, octave_count: usize) -> Result<Self, NoiseError> {
        self.set_octave_count(octave_count)?;
        Ok(self)
    }

    pub fn params(&self) -> &RidgedMultiParams {
        &self.params
    }

    pub fn frequency(&self) -> f64 {
        self.params.frequency
    }

    pub fn lacunarity(&self) -> f64 {
        self.params.lacunarity
    }

    pub fn exponent(&self) -> f64 {
        self.params.exponent
    }

    pub fn octave_count(&self) -> usize {
        self.params.octave_count
    }

    pub fn seed(&self) -> i32 {
        self.params.seed
    }

    pub fn spectral_weights(&self) -> &[f64] {
        &self.spectral_weights[..self.params.octave_count.min(MAX_OCTAVE)]
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.params.frequency = frequency;
    }

    pub fn set_lacunarity(&mut self, lacunarity: f64) {
        self.params.lacunarity = lacunarity;
        self.calc_spectral_weights();
    }

    pub fn set_exponent(&mut self, exponent: f64) {
        self.params.exponent = exponent;
        self.calc_spectral_weights();
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.params.offset = offset;
    }

    pub fn set_gain(&mut self, gain: f64) {
        self.params.gain = gain;
    }

    pub fn set_quality(&mut self, quality: NoiseQuality) {
        self.params.quality = quality;
    }

    pub fn set_seed(&mut self, seed: i32) {
        self.params.seed = seed;
    }

    pub fn set_octave_count(&mut self, octave_count: usize) -> Result<(), NoiseError> {
        check_octave_count(octave_count)?;
        self.params.octave_count = octave_count;
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), NoiseError> {
        check_octave_count(self.params.octave_count)
    }

    // Folds one octave's signal into the running sum; returns the new weight.
    #[inline]
    fn accumulate(&self, signal: f64, weight: f64, octave: usize, value: &mut f64) -> f64 {
        let mut signal = self.params.offset - signal.abs();
        signal *= signal;
        signal *= weight;
        *value += signal * self.spectral_weights[octave];
        (signal * self.params.gain).clamp(0.0, 1.0)
    }
}

impl NoiseGenerator for RidgedMulti {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = &self.params;
        let (mut x, mut y, mut z) = (x * p.frequency, y * p.frequency, z * p.frequency);
        let mut value = 0.0;
        let mut weight = 1.0;

        for octave in 0..p.octave_count.min(MAX_OCTAVE) {
            let seed = p.seed.wrapping_add(octave as i32);
            let signal = gradient_coherent_noise_3d(
                make_int32_range(x),
                make_int32_range(y),
                make_int32_range(z),
                seed,
                p.quality,
            );
            weight = self.accumulate(signal, weight, octave, &mut value);

            x *= p.lacunarity;
            y *= p.lacunarity;
            z *= p.lacunarity;
        }

        value * 1.25 - 1.0
    }

    fn get6(&self, x: f64, y: f64, z: f64, w: f64, u: f64, v: f64) -> f64 {
        let p = &self.params;
        let mut point = [x, y, z, w, u, v].map(|c| c * p.frequency);
        let mut value = 0.0;
        let mut weight = 1.0;

        for octave in 0..p.octave_count.min(MAX_OCTAVE) {
            let seed = p.seed.wrapping_add(octave as i32);
            let signal = gradient_coherent_noise_6d(&point.map(make_int32_range), seed, p.quality);
            weight = self.accumulate(signal, weight, octave, &mut value);
            point = point.map(|c| c * p.lacunarity);
        }

        value * 1.25 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::{RidgedMulti, RidgedMultiParams};
    use crate::NoiseGenerator;
    use crate::error::NoiseError;

    #[test]
    fn ridged_determinism() {
        let r = RidgedMulti::new(12);
        assert_eq!(r.get3(3.3, 2.2, 1.1).to_bits(), r.get3(3.3, 2.2, 1.1).to_bits());
    }

    #[test]
    fn single_octave_range() {
        let r = RidgedMulti::new(5).with_octave_count(1).unwrap();
        for i in 0..30 {
            for j in 0..30 {
                let v = r.get3(i as f64 * 0.173, j as f64 * 0.291, 0.5);
                assert!((-1.0..=0.25).contains(&v), "value {v} out of range");
            }
        }
        // On the lattice the ridge term is exactly 1.
        assert_eq!(r.get3(1.0, 2.0, 3.0), 0.25);
    }

    #[test]
    fn weights_follow_lacunarity_and_exponent() {
        let mut r = RidgedMulti::default();
        assert_eq!(r.spectral_weights()[..3], [1.0, 0.5, 0.25]);
        r.set_lacunarity(3.0);
        assert!((r.spectral_weights()[1] - 1.0 / 3.0).abs() < 1e-15);
        r.set_exponent(2.0);
        assert!((r.spectral_weights()[1] - 1.0 / 9.0).abs() < 1e-15);
    }

    #[test]
    fn weight_refresh_leaves_frequency_alone() {
        let mut r = RidgedMulti::default().with_frequency(0.75);
        r.set_lacunarity(2.5);
        r.set_exponent(0.9);
        assert_eq!(r.frequency(), 0.75);
    }

    #[test]
    fn params_reject_bad_octaves() {
        let params = RidgedMultiParams {
            octave_count: 40,
            ..RidgedMultiParams::default()
        };
        assert!(matches!(
            RidgedMulti::from(params).validate(),
            Err(NoiseError::InvalidOctaveCount { count: 40, .. })
        ));
    }

    #[test]
    fn serde_rebuilds_weights() {
        let mut r = RidgedMulti::new(8);
        r.set_lacunarity(1.5);
        let json = serde_json::to_string(&r).unwrap();
        let back: RidgedMulti = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
        assert_eq!(back.get3(0.4, 0.5, 0.6), r.get3(0.4, 0.5, 0.6));
    }
}
