use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::kernel::make_int32_range;

// Unit cubes alternating between -1 and +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Checkerboard;

impl NoiseGenerator for Checkerboard {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let ix = make_int32_range(x).floor() as i32;
        let iy = make_int32_range(y).floor() as i32;
        let iz = make_int32_range(z).floor() as i32;
        if (ix & 1) ^ (iy & 1) ^ (iz & 1) != 0 {
            -1.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::NoiseGenerator;

    use super::Checkerboard;

    #[test]
    fn alternates_per_cube() {
        let c = Checkerboard;
        assert_eq!(c.get3(0.5, 0.5, 0.5), 1.0);
        assert_eq!(c.get3(1.5, 0.5, 0.5), -1.0);
        assert_eq!(c.get3(1.5, 1.5, 0.5), 1.0);
        assert_eq!(c.get3(-0.5, 0.5, 0.5), -1.0);
        assert_eq!(c.get3(-0.5, -0.5, -0.5), -1.0);
    }

    #[test]
    fn far_coordinates_still_checker() {
        let v = Checkerboard.get3(3.0e12, 0.5, 0.5);
        assert!(v == 1.0 || v == -1.0);
    }

    #[test]
    #[should_panic]
    fn checkerboard_get6_panic() {
        let _ = Checkerboard.get6(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    }
}
