use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::generators::cylinders::shell_value;

// Concentric spheres around the origin; 1.0 on each shell, -1.0 between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spheres {
    pub frequency: f64,
}

impl Default for Spheres {
    fn default() -> Self {
        Self { frequency: 1.0 }
    }
}

impl Spheres {
    pub fn new(frequency: f64) -> Self {
        Self { frequency }
    }
}

impl NoiseGenerator for Spheres {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x, y, z) = (x * self.frequency, y * self.frequency, z * self.frequency);
        shell_value((x * x + y * y + z * z).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use crate::NoiseGenerator;

    use super::Spheres;

    #[test]
    fn shells_and_gaps() {
        let s = Spheres::default();
        assert_eq!(s.get3(0.0, 0.0, 0.0), 1.0);
        assert_eq!(s.get3(0.0, 3.0, 0.0), 1.0);
        assert_eq!(s.get3(0.0, 0.0, 1.5), -1.0);
    }

    #[test]
    fn frequency_scales_radius() {
        let s = Spheres::new(2.0);
        assert_eq!(s.get3(0.25, 0.0, 0.0), -1.0);
        assert_eq!(s.get3(0.5, 0.0, 0.0), 1.0);
    }
}
