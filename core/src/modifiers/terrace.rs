use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::kernel::linear_interp;

/// Maps its source's output onto a terrace-forming curve.
///
/// Between two neighbouring control points the output rises along `alpha²`,
/// so it is flat just above each control point and steep just below the
/// next one. Inverting swaps that shape within each bracket. Control points
/// are kept sorted with unique positions; at least two are needed before the
/// module can be evaluated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Terrace {
    control_points: Vec<f64>,
    invert: bool,
}

impl Terrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn control_points(&self) -> &[f64] {
        &self.control_points
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    pub fn invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    /// Inserts `value` in sorted position; rejects a position that already
    /// exists.
    pub fn add_control_point(&mut self, value: f64) -> Result<(), NoiseError> {
        match self.control_points.binary_search_by(|p| p.total_cmp(&value)) {
            Ok(_) => Err(NoiseError::DuplicateControlPoint(value)),
            Err(index) => {
                self.control_points.insert(index, value);
                Ok(())
            }
        }
    }

    pub fn clear_control_points(&mut self) {
        self.control_points.clear();
    }

    /// Replaces the control points with `count` equally spaced terraces
    /// covering [-1, 1].
    pub fn make_control_points(&mut self, count: usize) -> Result<(), NoiseError> {
        if count < 2 {
            return Err(NoiseError::NotEnoughControlPoints { needed: 2, count });
        }
        self.clear_control_points();
        let step = 2.0 / (count as f64 - 1.0);
        let mut value = -1.0;
        for _ in 0..count {
            self.add_control_point(value)?;
            value += step;
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), NoiseError> {
        if self.control_points.len() < 2 {
            return Err(NoiseError::NotEnoughControlPoints {
                needed: 2,
                count: self.control_points.len(),
            });
        }
        for pair in self.control_points.windows(2) {
            if !(pair[0] < pair[1]) {
                return Err(NoiseError::DuplicateControlPoint(pair[1]));
            }
        }
        Ok(())
    }

    pub fn apply(&self, value: f64) -> f64 {
        let points = &self.control_points;
        assert!(
            points.len() >= 2,
            "terrace needs at least two control points, has {}",
            points.len()
        );

        // First control point above the value.
        let index = points.partition_point(|&p| p <= value);
        let last = points.len() - 1;
        let i0 = index.saturating_sub(1).min(last);
        let i1 = index.min(last);
        if i0 == i1 {
            return points[i1];
        }

        let (mut v0, mut v1) = (points[i0], points[i1]);
        let mut alpha = (value - v0) / (v1 - v0);
        if self.invert {
            alpha = 1.0 - alpha;
            std::mem::swap(&mut v0, &mut v1);
        }
        alpha *= alpha;
        linear_interp(v0, v1, alpha)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::NoiseError;

    use super::Terrace;

    #[test]
    fn make_control_points_spacing() {
        let mut t = Terrace::new();
        t.make_control_points(5).unwrap();
        let points = t.control_points();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], -1.0);
        assert_eq!(points[2], 0.0);
        assert!((points[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn control_points_are_exact() {
        for invert in [false, true] {
            let mut t = Terrace::new().with_inverted(invert);
            t.make_control_points(7).unwrap();
            for &p in t.control_points() {
                assert_eq!(t.apply(p), p);
            }
        }
    }

    #[test]
    fn plateau_shape() {
        let mut t = Terrace::new();
        t.add_control_point(0.0).unwrap();
        t.add_control_point(1.0).unwrap();
        assert_eq!(t.apply(0.5), 0.25);
        t.invert(true);
        assert_eq!(t.apply(0.5), 0.75);
    }

    #[test]
    fn outside_the_curve_clamps_to_ends() {
        let mut t = Terrace::new();
        t.make_control_points(3).unwrap();
        assert_eq!(t.apply(-5.0), -1.0);
        assert_eq!(t.apply(5.0), t.control_points()[2]);
    }

    #[test]
    fn insertion_keeps_order_and_rejects_duplicates() {
        let mut t = Terrace::new();
        for p in [0.5, -0.5, 0.0, 1.0] {
            t.add_control_point(p).unwrap();
        }
        assert_eq!(t.control_points(), &[-0.5, 0.0, 0.5, 1.0]);
        assert!(matches!(
            t.add_control_point(0.5),
            Err(NoiseError::DuplicateControlPoint(v)) if v == 0.5
        ));
        assert_eq!(t.control_points().len(), 4);
    }

    #[test]
    fn too_few_points() {
        let mut t = Terrace::new();
        assert!(t.make_control_points(1).is_err());
        t.add_control_point(0.0).unwrap();
        assert!(t.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "at least two control points")]
    fn evaluating_without_points_panics() {
        let _ = Terrace::new().apply(0.0);
    }
}
