use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::generators::{Perlin, check_octave_count};

// Fractional offsets (k / 65536) added before sampling each distortion
// module, so the three axes never hit lattice points together.
const X_OFFSETS: [f64; 3] = [12414.0 / 65536.0, 65124.0 / 65536.0, 31337.0 / 65536.0];
const Y_OFFSETS: [f64; 3] = [26519.0 / 65536.0, 18128.0 / 65536.0, 60493.0 / 65536.0];
const Z_OFFSETS: [f64; 3] = [53820.0 / 65536.0, 11213.0 / 65536.0, 44845.0 / 65536.0];

/// Serializable parameters of a [`Turbulence`]. The three distortion
/// modules are rebuilt from them on load, so their seeds always stay
/// `seed`, `seed + 1` and `seed + 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurbulenceParams {
    pub seed: i32,
    pub frequency: f64,
    pub power: f64,
    pub roughness: usize,
}

impl Default for TurbulenceParams {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: 1.0,
            power: 1.0,
            roughness: 3,
        }
    }
}

/// Randomly displaces the input point with three internal Perlin modules
/// before sampling the source.
///
/// The distortion modules use seeds `seed`, `seed + 1` and `seed + 2` so the
/// axes move independently. `power` scales the displacement and `roughness`
/// is the octave count of the distortion noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TurbulenceParams", into = "TurbulenceParams")]
pub struct Turbulence {
    params: TurbulenceParams,
    distortions: [Perlin; 3],
}

impl Default for Turbulence {
    fn default() -> Self {
        Self::from(TurbulenceParams::default())
    }
}

impl From<TurbulenceParams> for Turbulence {
    fn from(params: TurbulenceParams) -> Self {
        Self {
            params,
            distortions: distortions(&params),
        }
    }
}

impl From<Turbulence> for TurbulenceParams {
    fn from(turbulence: Turbulence) -> Self {
        turbulence.params
    }
}

// The roughness is taken as is; `Turbulence::validate` reports a bad one.
fn distortions(params: &TurbulenceParams) -> [Perlin; 3] {
    [0, 1, 2].map(|axis| {
        let mut perlin =
            Perlin::new(params.seed.wrapping_add(axis)).with_frequency(params.frequency);
        perlin.set_octave_count_unchecked(params.roughness);
        perlin
    })
}

impl Turbulence {
    pub fn new(seed: i32) -> Self {
        Self::from(TurbulenceParams {
            seed,
            ..TurbulenceParams::default()
        })
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.set_frequency(frequency);
        self
    }

    pub fn with_power(mut self, power: f64) -> Self {
        self.params.power = power;
        self
    }

    pub fn with_roughness(mut self, roughness: usize) -> Result<Self, NoiseError> {
        self.set_roughness(roughness)?;
        Ok(self)
    }

    pub fn params(&self) -> &TurbulenceParams {
        &self.params
    }

    pub fn power(&self) -> f64 {
        self.params.power
    }

    pub fn frequency(&self) -> f64 {
        self.params.frequency
    }

    pub fn roughness(&self) -> usize {
        self.params.roughness
    }

    pub fn seed(&self) -> i32 {
        self.params.seed
    }

    pub fn set_power(&mut self, power: f64) {
        self.params.power = power;
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.params.frequency = frequency;
        self.distortions = distortions(&self.params);
    }

    pub fn set_roughness(&mut self, roughness: usize) -> Result<(), NoiseError> {
        check_octave_count(roughness)?;
        self.params.roughness = roughness;
        self.distortions = distortions(&self.params);
        Ok(())
    }

    pub fn set_seed(&mut self, seed: i32) {
        self.params.seed = seed;
        self.distortions = distortions(&self.params);
    }

    pub(crate) fn validate(&self) -> Result<(), NoiseError> {
        check_octave_count(self.params.roughness)
    }

    /// The displaced point the source is sampled at.
    pub fn apply(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        let sample = |perlin: &Perlin, [ox, oy, oz]: [f64; 3]| {
            perlin.get3(x + ox, y + oy, z + oz) * self.params.power
        };
        let [dx, dy, dz] = &self.distortions;
        [
            x + sample(dx, X_OFFSETS),
            y + sample(dy, Y_OFFSETS),
            z + sample(dz, Z_OFFSETS),
        ]
    }
}
