use serde::{Deserialize, Serialize};

// source * scale + bias
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleBias {
    pub scale: f64,
    pub bias: f64,
}

impl Default for ScaleBias {
    fn default() -> Self {
        Self {
            scale: 1.0,
            bias: 0.0,
        }
    }
}

impl ScaleBias {
    pub fn new(scale: f64, bias: f64) -> Self {
        Self { scale, bias }
    }

    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.bias
    }
}
