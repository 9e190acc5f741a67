use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::kernel::cubic_interp;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub input: f64,
    pub output: f64,
}

// Remaps its source's output along a cubic curve through (input, output)
// control points. Needs at least four points; inputs are unique and sorted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Curve {
    control_points: Vec<ControlPoint>,
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn add_control_point(&mut self, input: f64, output: f64) -> Result<(), NoiseError> {
        match self
            .control_points
            .binary_search_by(|p| p.input.total_cmp(&input))
        {
            Ok(_) => Err(NoiseError::DuplicateControlPoint(input)),
            Err(index) => {
                self.control_points.insert(index, ControlPoint { input, output });
                Ok(())
            }
        }
    }

    pub fn clear_control_points(&mut self) {
        self.control_points.clear();
    }

    pub(crate) fn validate(&self) -> Result<(), NoiseError> {
        if self.control_points.len() < 4 {
            return Err(NoiseError::NotEnoughControlPoints {
                needed: 4,
                count: self.control_points.len(),
            });
        }
        for pair in self.control_points.windows(2) {
            if !(pair[0].input < pair[1].input) {
                return Err(NoiseError::DuplicateControlPoint(pair[1].input));
            }
        }
        Ok(())
    }

    pub fn apply(&self, value: f64) -> f64 {
        let points = &self.control_points;
        assert!(
            points.len() >= 4,
            "curve needs at least four control points, has {}",
            points.len()
        );

        let index = points.partition_point(|p| p.input <= value);
        let last = points.len() as isize - 1;
        let at = |offset: isize| (index as isize + offset).clamp(0, last) as usize;
        let (i0, i1, i2, i3) = (at(-2), at(-1), at(0), at(1));
        if i1 == i2 {
            return points[i1].output;
        }

        let input0 = points[i1].input;
        let input1 = points[i2].input;
        let alpha = (value - input0) / (input1 - input0);
        cubic_interp(
            points[i0].output,
            points[i1].output,
            points[i2].output,
            points[i3].output,
            alpha,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Curve;

    fn linear_curve() -> Curve {
        let mut c = Curve::new();
        for x in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            c.add_control_point(x, x * 2.0).unwrap();
        }
        c
    }

    #[test]
    fn passes_through_control_points() {
        let c = linear_curve();
        for p in c.control_points() {
            assert!((c.apply(p.input) - p.output).abs() < 1e-12);
        }
    }

    #[test]
    fn linear_points_give_linear_curve_inside() {
        let c = linear_curve();
        assert!((c.apply(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside() {
        let c = linear_curve();
        assert_eq!(c.apply(-9.0), -2.0);
        assert_eq!(c.apply(9.0), 2.0);
    }

    #[test]
    fn rejects_duplicate_inputs() {
        let mut c = linear_curve();
        assert!(c.add_control_point(0.5, 3.0).is_err());
        assert!(c.validate().is_ok());
        c.clear_control_points();
        assert!(c.validate().is_err());
    }
}
