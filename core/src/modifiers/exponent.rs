use serde::{Deserialize, Serialize};

// Maps the source output from [-1, 1] onto [0, 1], raises it to `exponent`
// and maps it back, which bends the curve while keeping its end points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exponent {
    pub exponent: f64,
}

impl Default for Exponent {
    fn default() -> Self {
        Self { exponent: 1.0 }
    }
}

impl Exponent {
    pub fn new(exponent: f64) -> Self {
        Self { exponent }
    }

    pub fn apply(&self, value: f64) -> f64 {
        ((value + 1.0) / 2.0).abs().powf(self.exponent) * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::Exponent;

    #[test]
    fn keeps_end_points() {
        let e = Exponent::new(3.0);
        assert_eq!(e.apply(-1.0), -1.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert_eq!(e.apply(0.0), 0.125 * 2.0 - 1.0);
    }

    #[test]
    fn identity_exponent() {
        assert_eq!(Exponent::default().apply(0.5), 0.5);
    }
}
