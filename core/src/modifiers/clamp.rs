use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

// Hard-clamps its source's output to [lower_bound, upper_bound].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clamp {
    lower_bound: f64,
    upper_bound: f64,
}

impl Default for Clamp {
    fn default() -> Self {
        Self {
            lower_bound: -1.0,
            upper_bound: 1.0,
        }
    }
}

impl Clamp {
    pub fn new(lower_bound: f64, upper_bound: f64) -> Result<Self, NoiseError> {
        let mut clamp = Self::default();
        clamp.set_bounds(lower_bound, upper_bound)?;
        Ok(clamp)
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
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
        Ok(())
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

    pub fn apply(&self, value: f64) -> f64 {
        if value < self.lower_bound {
            self.lower_bound
        } else if value > self.upper_bound {
            self.upper_bound
        } else {
            value
        }
    }
}
