use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::kernel::value_noise_3d;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Distance metric used to find the nearest seed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceFunction {
    #[default]
    Euclidean,
    EuclideanSquared,
    Manhattan,
    Chebyshev,
    // x² + y² + z² + xy + xz + yz
    Quadratic,
}

impl DistanceFunction {
    pub fn distance(self, dx: f64, dy: f64, dz: f64) -> f64 {
        match self {
            DistanceFunction::Euclidean => (dx * dx + dy * dy + dz * dz).sqrt(),
            DistanceFunction::EuclideanSquared => dx * dx + dy * dy + dz * dz,
            DistanceFunction::Manhattan => dx.abs() + dy.abs() + dz.abs(),
            DistanceFunction::Chebyshev => dx.abs().max(dy.abs()).max(dz.abs()),
            DistanceFunction::Quadratic => {
                dx * dx + dy * dy + dz * dz + dx * dy + dx * dz + dy * dz
            }
        }
    }

    // Key the nearest-seed search sorts by. Euclidean compares squared
    // lengths, which orders candidates the same way without the sqrt.
    #[inline]
    fn search_key(self, dx: f64, dy: f64, dz: f64) -> f64 {
        match self {
            DistanceFunction::Euclidean => dx * dx + dy * dy + dz * dz,
            other => other.distance(dx, dy, dz),
        }
    }
}

// Cellular noise. Space is cut into unit cubes, each holding one seed point
// jittered by value noise; the output is constant inside each seed's cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Voronoi {
    frequency: f64,
    displacement: f64, // scale of the per-cell random value
    enable_distance: bool,
    distance_function: DistanceFunction,
    seed: i32,
}

impl Default for Voronoi {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            displacement: 1.0,
            enable_distance: false,
            distance_function: DistanceFunction::Euclidean,
            seed: 0,
        }
    }
}

impl Voronoi {
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_displacement(mut self, displacement: f64) -> Self {
        self.displacement = displacement;
        self
    }

    pub fn with_distance(mut self, enable: bool) -> Self {
        self.enable_distance = enable;
        self
    }

    pub fn with_distance_function(mut self, distance_function: DistanceFunction) -> Self {
        self.distance_function = distance_function;
        self
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    pub fn distance_enabled(&self) -> bool {
        self.enable_distance
    }

    pub fn distance_function(&self) -> DistanceFunction {
        self.distance_function
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn set_displacement(&mut self, displacement: f64) {
        self.displacement = displacement;
    }

    pub fn enable_distance(&mut self, enable: bool) {
        self.enable_distance = enable;
    }

    pub fn set_distance_function(&mut self, distance_function: DistanceFunction) {
        self.distance_function = distance_function;
    }

    pub fn set_seed(&mut self, seed: i32) {
        self.seed = seed;
    }

    // Seed point of the cube with lower corner (cx, cy, cz); three seed
    // channels give independent offsets per axis.
    fn seed_point(&self, cx: i32, cy: i32, cz: i32) -> [f64; 3] {
        [
            cx as f64 + value_noise_3d(cx, cy, cz, self.seed),
            cy as f64 + value_noise_3d(cx, cy, cz, self.seed.wrapping_add(1)),
            cz as f64 + value_noise_3d(cx, cy, cz, self.seed.wrapping_add(2)),
        ]
    }

    /// Nearest seed point to the (frequency-scaled) point `p`, scanning the
    /// 5×5×5 block of cubes around it with z outermost, then y, then x, each
    /// from -2 to +2.
    pub fn nearest_seed(&self, p: [f64; 3]) -> [f64; 3] {
        let [xi, yi, zi] = p.map(|c| c.floor() as i32);
        let candidates = (-2..=2).flat_map(move |dz| {
            (-2..=2).flat_map(move |dy| {
                (-2..=2).map(move |dx| {
                    self.seed_point(
                        xi.wrapping_add(dx),
                        yi.wrapping_add(dy),
                        zi.wrapping_add(dz),
                    )
                })
            })
        });
        closest(candidates, p, self.distance_function).unwrap_or(p)
    }
}

/// First candidate with the smallest distance to `p`. Ties keep the earlier
/// candidate, so the result depends only on iteration order.
pub fn closest(
    candidates: impl IntoIterator<Item = [f64; 3]>,
    p: [f64; 3],
    metric: DistanceFunction,
) -> Option<[f64; 3]> {
    let mut best = None;
    let mut best_key = f64::MAX;
    for c in candidates {
        let key = metric.search_key(c[0] - p[0], c[1] - p[1], c[2] - p[2]);
        if key < best_key {
            best_key = key;
            best = Some(c);
        }
    }
    best
}

impl NoiseGenerator for Voronoi {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = [x * self.frequency, y * self.frequency, z * self.frequency];
        let seed = self.nearest_seed(p);

        let value = if self.enable_distance {
            let d = self
                .distance_function
                .distance(seed[0] - p[0], seed[1] - p[1], seed[2] - p[2]);
            d * SQRT_3 - 1.0
        } else {
            0.0
        };

        // The cell value is looked up with seed 0 so cell colours stay put
        // when only the seed-point layout changes.
        let [cx, cy, cz] = seed.map(|c| c.floor() as i32);
        value + self.displacement * value_noise_3d(cx, cy, cz, 0)
    }
}
