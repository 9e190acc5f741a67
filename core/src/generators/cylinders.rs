use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;

// Concentric cylinders around the y axis. Output is 1.0 on each shell and
// falls to -1.0 halfway between shells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cylinders {
    pub frequency: f64,
}

impl Default for Cylinders {
    fn default() -> Self {
        Self { frequency: 1.0 }
    }
}

impl Cylinders {
    pub fn new(frequency: f64) -> Self {
        Self { frequency }
    }
}

pub(crate) fn shell_value(dist: f64) -> f64 {
    let inner = dist - dist.floor();
    let outer = 1.0 - inner;
    1.0 - inner.min(outer) * 4.0
}

impl NoiseGenerator for Cylinders {
    fn get3(&self, x: f64, _y: f64, z: f64) -> f64 {
        let x = x * self.frequency;
        let z = z * self.frequency;
        shell_value((x * x + z * z).sqrt())
    }
}
