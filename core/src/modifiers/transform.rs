// Point transformers: they rewrite the input coordinate and pass it on to
// their single source.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalePoint {
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
}

impl Default for ScalePoint {
    fn default() -> Self {
        Self {
            x_scale: 1.0,
            y_scale: 1.0,
            z_scale: 1.0,
        }
    }
}

impl ScalePoint {
    pub fn new(x_scale: f64, y_scale: f64, z_scale: f64) -> Self {
        Self {
            x_scale,
            y_scale,
            z_scale,
        }
    }

    pub fn uniform(scale: f64) -> Self {
        Self::new(scale, scale, scale)
    }

    pub fn apply(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        [x * self.x_scale, y * self.y_scale, z * self.z_scale]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatePoint {
    pub x_translation: f64,
    pub y_translation: f64,
    pub z_translation: f64,
}

impl TranslatePoint {
    pub fn new(x_translation: f64, y_translation: f64, z_translation: f64) -> Self {
        Self {
            x_translation,
            y_translation,
            z_translation,
        }
    }

    pub fn apply(&self, [x, y, z]: [f64; 3]) -> [f64; 3] {
        [
            x + self.x_translation,
            y + self.y_translation,
            z + self.z_translation,
        ]
    }
}

/// Serializable angles of a [`RotatePoint`], in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationAngles {
    pub x_angle: f64,
    pub y_angle: f64,
    pub z_angle: f64,
}

/// Rotates the input point around the origin before sampling the source.
/// The rotation matrix is rebuilt whenever the angles change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RotationAngles", into = "RotationAngles")]
pub struct RotatePoint {
    angles: RotationAngles,
    matrix: [[f64; 3]; 3],
}

impl Default for RotatePoint {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<RotationAngles> for RotatePoint {
    fn from(angles: RotationAngles) -> Self {
        Self::new(angles.x_angle, angles.y_angle, angles.z_angle)
    }
}

impl From<RotatePoint> for RotationAngles {
    fn from(rotate: RotatePoint) -> Self {
        rotate.angles
    }
}

impl RotatePoint {
    pub fn new(x_angle: f64, y_angle: f64, z_angle: f64) -> Self {
        let mut rotate = Self {
            angles: RotationAngles::default(),
            matrix: [[0.0; 3]; 3],
        };
        rotate.set_angles(x_angle, y_angle, z_angle);
        rotate
    }

    pub fn angles(&self) -> RotationAngles {
        self.angles
    }

    pub fn set_angles(&mut self, x_angle: f64, y_angle: f64, z_angle: f64) {
        let (x_sin, x_cos) = x_angle.to_radians().sin_cos();
        let (y_sin, y_cos) = y_angle.to_radians().sin_cos();
        let (z_sin, z_cos) = z_angle.to_radians().sin_cos();

        self.matrix = [
            [
                y_sin * x_sin * z_sin + y_cos * z_cos,
                x_cos * z_sin,
                y_sin * z_cos - y_cos * x_sin * z_sin,
            ],
            [
                y_sin * x_sin * z_cos - y_cos * z_sin,
                x_cos * z_cos,
                -y_cos * x_sin * z_cos - y_sin * z_sin,
            ],
            [-y_sin * x_cos, x_sin, y_cos * x_cos],
        ];
        self.angles = RotationAngles {
            x_angle,
            y_angle,
            z_angle,
        };
    }

    pub fn apply(&self, p: [f64; 3]) -> [f64; 3] {
        self.matrix
            .map(|row| row[0] * p[0] + row[1] * p[1] + row[2] * p[2])
    }
}
