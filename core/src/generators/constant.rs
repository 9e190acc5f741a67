use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;

// Outputs the same value everywhere; useful as a control or terrace input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Constant {
    pub value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl NoiseGenerator for Constant {
    fn get3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.value
    }

    fn get6(&self, _x: f64, _y: f64, _z: f64, _w: f64, _u: f64, _v: f64) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use crate::NoiseGenerator;

    use super::Constant;

    #[test]
    fn constant_everywhere() {
        let c = Constant::new(-0.25);
        assert_eq!(c.get3(1.0, 2.0, 3.0), -0.25);
        assert_eq!(c.get6(9.0, 8.0, 7.0, 6.0, 5.0, 4.0), -0.25);
        assert_eq!(Constant::default().get3(0.0, 0.0, 0.0), 0.0);
    }
}
