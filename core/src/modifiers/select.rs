use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::kernel::{linear_interp, s_curve3};

/// Chooses between two sources by the output of a control source.
///
/// Control values inside `[lower, upper]` select source 1, values outside
/// select source 0. With a positive edge falloff the switch is smoothed by a
/// cubic S-curve over `[bound - falloff, bound + falloff]` at each bound. The
/// falloff is capped at half the bound range so the two windows never
/// overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Select {
    lower_bound: f64,
    upper_bound: f64,
    edge_falloff: f64,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            lower_bound: -1.0,
            upper_bound: 1.0,
            edge_falloff: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Region {
    Source0,
    Source1,
    // blend from source 0 to source 1
    LowerEdge(f64),
    // blend from source 1 to source 0
    UpperEdge(f64),
}

impl Select {
    pub fn new(lower_bound: f64, upper_bound: f64) -> Result<Self, NoiseError> {
        let mut select = Self::default();
        select.set_bounds(lower_bound, upper_bound)?;
        Ok(select)
    }

    pub fn with_edge_falloff(mut self, edge_falloff: f64) -> Self {
        self.set_edge_falloff(edge_falloff);
        self
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn edge_falloff(&self) -> f64 {
        self.edge_falloff
    }

    pub fn set_bounds(&mut self, lower_bound: f64, upper_bound: f64) -> Result<(), NoiseError> {
        if !(lower_bound < upper_bound) {
            return Err(NoiseError::InvalidBounds {
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        // Narrower bounds may shrink the allowed falloff.
        self.set_edge_falloff(self.edge_falloff);
        Ok(())
    }

    pub fn set_edge_falloff(&mut self, edge_falloff: f64) {
        let half = (self.upper_bound - self.lower_bound) / 2.0;
        self.edge_falloff = edge_falloff.min(half);
    }

    pub(crate) fn validate(&self) -> Result<(), NoiseError> {
        if !(self.lower_bound < self.upper_bound) {
            return Err(NoiseError::InvalidBounds {
                lower: self.lower_bound,
                upper: self.upper_bound,
            });
        }
        Ok(())
    }

    fn region(&self, control: f64) -> Region {
        let (lower, upper, falloff) = (self.lower_bound, self.upper_bound, self.edge_falloff);
        if falloff > 0.0 {
            if control < lower - falloff {
                Region::Source0
            } else if control < lower + falloff {
                let (lo, hi) = (lower - falloff, lower + falloff);
                Region::LowerEdge(s_curve3((control - lo) / (hi - lo)))
            } else if control < upper - falloff {
                Region::Source1
            } else if control < upper + falloff {
                let (lo, hi) = (upper - falloff, upper + falloff);
                Region::UpperEdge(s_curve3((control - lo) / (hi - lo)))
            } else {
                Region::Source0
            }
        } else if control < lower || control > upper {
            Region::Source0
        } else {
            Region::Source1
        }
    }

    /// Output for `control`; each source closure is called at most once and
    /// only when its value contributes.
    pub fn select(
        &self,
        control: f64,
        source0: impl FnOnce() -> f64,
        source1: impl FnOnce() -> f64,
    ) -> f64 {
        match self.region(control) {
            Region::Source0 => source0(),
            Region::Source1 => source1(),
            Region::LowerEdge(alpha) => {
                let v0 = source0();
                linear_interp(v0, source1(), alpha)
            }
            Region::UpperEdge(alpha) => {
                let v1 = source1();
                linear_interp(v1, source0(), alpha)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Select;

    fn pick(s: &Select, control: f64) -> f64 {
        s.select(control, || 10.0, || 20.0)
    }

    #[test]
    fn hard_switch_without_falloff() {
        let s = Select::new(0.0, 0.5).unwrap();
        assert_eq!(pick(&s, -0.1), 10.0);
        assert_eq!(pick(&s, 0.0), 20.0);
        assert_eq!(pick(&s, 0.5), 20.0);
        assert_eq!(pick(&s, 0.6), 10.0);
    }

    #[test]
    fn falloff_regions() {
        let s = Select::new(0.5, 0.8).unwrap().with_edge_falloff(0.1);
        assert_eq!(pick(&s, 0.3), 10.0);
        assert_eq!(pick(&s, 0.65), 20.0);
        // Entering the lower window is continuous with source 0.
        assert_eq!(pick(&s, 0.4), 10.0);
        let mid = pick(&s, 0.5);
        assert!((mid - 15.0).abs() < 1e-9);
        let upper_mid = pick(&s, 0.8);
        assert!((upper_mid - 15.0).abs() < 1e-9);
        assert_eq!(pick(&s, 0.95), 10.0);
    }

    #[test]
    fn falloff_capped_at_half_range() {
        let s = Select::new(0.0, 1.0).unwrap().with_edge_falloff(2.0);
        assert_eq!(s.edge_falloff(), 0.5);
        let mut s = Select::default().with_edge_falloff(0.4);
        s.set_bounds(0.0, 0.2).unwrap();
        assert!((s.edge_falloff() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(Select::new(1.0, 1.0).is_err());
        assert!(Select::new(2.0, -2.0).is_err());
        let mut s = Select::default();
        assert!(s.set_bounds(0.5, 0.1).is_err());
        assert_eq!(s.lower_bound(), -1.0);
    }

    #[test]
    fn unused_source_is_not_evaluated() {
        let s = Select::new(-0.5, 0.5).unwrap();
        let v = s.select(0.0, || panic!("source 0 evaluated"), || 1.0);
        assert_eq!(v, 1.0);
    }
}
