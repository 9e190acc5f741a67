//! Coherent-noise kernel: lattice hashing, interpolation curves and the
//! gradient/value noise primitives every generator is built from.
//!
//! All hashing uses `i32` arithmetic with explicit wraparound so results are
//! identical on every platform.

use serde::{Deserialize, Serialize};

use crate::vectors::{RANDOM_VECTORS_3D, RANDOM_VECTORS_6D};

const X_NOISE_GEN: i32 = 1619;
const Y_NOISE_GEN: i32 = 31337;
const Z_NOISE_GEN: i32 = 6971;
const W_NOISE_GEN: i32 = 1999;
const U_NOISE_GEN: i32 = 2083;
const V_NOISE_GEN: i32 = 2281;
const SEED_NOISE_GEN: i32 = 1013;
const SHIFT_NOISE_GEN: u32 = 8;

// Scales a gradient dot product to roughly [-1, 1].
const GRADIENT_SCALE: f64 = 2.12;

const INT32_RANGE: f64 = 1_073_741_824.0;

/// Interpolation curve applied to the fractional position inside a lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoiseQuality {
    /// Raw offset; the derivative is discontinuous at cell boundaries.
    Fast,
    /// Cubic S-curve; continuous first derivative.
    #[default]
    Standard,
    /// Quintic S-curve; continuous first and second derivatives.
    Best,
}

impl NoiseQuality {
    #[inline]
    pub fn weight(self, a: f64) -> f64 {
        match self {
            NoiseQuality::Fast => a,
            NoiseQuality::Standard => s_curve3(a),
            NoiseQuality::Best => s_curve5(a),
        }
    }
}

/// `(1 - a) * n0 + a * n1`; returns `n0` exactly at `a == 0` and `n1` at `a == 1`.
#[inline]
pub fn linear_interp(n0: f64, n1: f64, a: f64) -> f64 {
    (1.0 - a) * n0 + a * n1
}

/// Cubic interpolation between `n1` and `n2`, using `n0` and `n3` as the
/// outer neighbours.
#[inline]
pub fn cubic_interp(n0: f64, n1: f64, n2: f64, n3: f64, a: f64) -> f64 {
    let p = (n3 - n2) - (n0 - n1);
    let q = (n0 - n1) - p;
    let r = n2 - n0;
    let s = n1;
    p * a * a * a + q * a * a + r * a + s
}

// 3a^2 - 2a^3
#[inline]
pub fn s_curve3(a: f64) -> f64 {
    a * a * (3.0 - 2.0 * a)
}

// 6a^5 - 15a^4 + 10a^3
#[inline]
pub fn s_curve5(a: f64) -> f64 {
    let a3 = a * a * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    6.0 * a5 - 15.0 * a4 + 10.0 * a3
}

/// Folds a coordinate into `(-2^30, 2^30)` so it can be truncated to `i32`
/// without overflow. Coordinates already inside the range pass through.
#[inline]
pub fn make_int32_range(n: f64) -> f64 {
    if n >= INT32_RANGE {
        2.0 * (n % INT32_RANGE) - INT32_RANGE
    } else if n <= -INT32_RANGE {
        2.0 * (n % INT32_RANGE) + INT32_RANGE
    } else {
        n
    }
}

#[inline]
fn lattice(n: f64) -> i32 {
    n.floor() as i32
}

#[inline]
fn hash_index(hash: i32) -> usize {
    let hash = hash ^ (hash >> SHIFT_NOISE_GEN);
    (hash & 0xff) as usize
}

#[inline]
fn seed_term(seed: i32) -> i32 {
    SEED_NOISE_GEN.wrapping_mul(seed)
}

/// Gradient contribution of lattice point `(ix, iy, iz)` at `(fx, fy, fz)`.
pub fn gradient_noise_3d(fx: f64, fy: f64, fz: f64, ix: i32, iy: i32, iz: i32, seed: i32) -> f64 {
    let hash = X_NOISE_GEN
        .wrapping_mul(ix)
        .wrapping_add(Y_NOISE_GEN.wrapping_mul(iy))
        .wrapping_add(Z_NOISE_GEN.wrapping_mul(iz))
        .wrapping_add(seed_term(seed));
    let g = &RANDOM_VECTORS_3D[hash_index(hash)];

    let dx = fx - ix as f64;
    let dy = fy - iy as f64;
    let dz = fz - iz as f64;
    (g[0] * dx + g[1] * dy + g[2] * dz) * GRADIENT_SCALE
}

/// Gradient noise at `(x, y, z)`; roughly within [-1, 1] and exactly zero on
/// integer lattice points.
pub fn gradient_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    let x0 = lattice(x);
    let y0 = lattice(y);
    let z0 = lattice(z);
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);
    let z1 = z0.wrapping_add(1);

    let xs = quality.weight(x - x0 as f64);
    let ys = quality.weight(y - y0 as f64);
    let zs = quality.weight(z - z0 as f64);

    let n0 = gradient_noise_3d(x, y, z, x0, y0, z0, seed);
    let n1 = gradient_noise_3d(x, y, z, x1, y0, z0, seed);
    let ix0 = linear_interp(n0, n1, xs);
    let n0 = gradient_noise_3d(x, y, z, x0, y1, z0, seed);
    let n1 = gradient_noise_3d(x, y, z, x1, y1, z0, seed);
    let ix1 = linear_interp(n0, n1, xs);
    let iy0 = linear_interp(ix0, ix1, ys);

    let n0 = gradient_noise_3d(x, y, z, x0, y0, z1, seed);
    let n1 = gradient_noise_3d(x, y, z, x1, y0, z1, seed);
    let ix0 = linear_interp(n0, n1, xs);
    let n0 = gradient_noise_3d(x, y, z, x0, y1, z1, seed);
    let n1 = gradient_noise_3d(x, y, z, x1, y1, z1, seed);
    let ix1 = linear_interp(n0, n1, xs);
    let iy1 = linear_interp(ix0, ix1, ys);

    linear_interp(iy0, iy1, zs)
}

/// 31-bit pseudo-random integer for a lattice point.
pub fn int_value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> i32 {
    let n = X_NOISE_GEN
        .wrapping_mul(x)
        .wrapping_add(Y_NOISE_GEN.wrapping_mul(y))
        .wrapping_add(Z_NOISE_GEN.wrapping_mul(z))
        .wrapping_add(seed_term(seed))
        & 0x7fff_ffff;
    scramble(n)
}

#[inline]
fn scramble(n: i32) -> i32 {
    let n = (n >> 13) ^ n;
    n.wrapping_mul(n.wrapping_mul(n).wrapping_mul(60493).wrapping_add(19_990_303))
        .wrapping_add(1_376_312_589)
        & 0x7fff_ffff
}

/// Pseudo-random value in [-1, 1] for a lattice point.
pub fn value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> f64 {
    1.0 - int_value_noise_3d(x, y, z, seed) as f64 / INT32_RANGE
}

/// Value noise at `(x, y, z)`: interpolated lattice scalars in [-1, 1].
pub fn value_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    let x0 = lattice(x);
    let y0 = lattice(y);
    let z0 = lattice(z);
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);
    let z1 = z0.wrapping_add(1);

    let xs = quality.weight(x - x0 as f64);
    let ys = quality.weight(y - y0 as f64);
    let zs = quality.weight(z - z0 as f64);

    let ix0 = linear_interp(value_noise_3d(x0, y0, z0, seed), value_noise_3d(x1, y0, z0, seed), xs);
    let ix1 = linear_interp(value_noise_3d(x0, y1, z0, seed), value_noise_3d(x1, y1, z0, seed), xs);
    let iy0 = linear_interp(ix0, ix1, ys);
    let ix0 = linear_interp(value_noise_3d(x0, y0, z1, seed), value_noise_3d(x1, y0, z1, seed), xs);
    let ix1 = linear_interp(value_noise_3d(x0, y1, z1, seed), value_noise_3d(x1, y1, z1, seed), xs);
    let iy1 = linear_interp(ix0, ix1, ys);

    linear_interp(iy0, iy1, zs)
}

const GEN_6D: [i32; 6] = [
    X_NOISE_GEN,
    Y_NOISE_GEN,
    Z_NOISE_GEN,
    W_NOISE_GEN,
    U_NOISE_GEN,
    V_NOISE_GEN,
];

#[inline]
fn hash_6d(corner: &[i32; 6], seed: i32) -> i32 {
    corner
        .iter()
        .zip(GEN_6D)
        .fold(seed_term(seed), |acc, (&c, g)| acc.wrapping_add(g.wrapping_mul(c)))
}

/// Gradient contribution of a 6D lattice point at `p`.
pub fn gradient_noise_6d(p: &[f64; 6], corner: &[i32; 6], seed: i32) -> f64 {
    let g = &RANDOM_VECTORS_6D[hash_index(hash_6d(corner, seed))];
    let dot: f64 = (0..6).map(|i| g[i] * (p[i] - corner[i] as f64)).sum();
    dot * GRADIENT_SCALE
}

/// Pseudo-random value in [-1, 1] for a 6D lattice point.
pub fn value_noise_6d(corner: &[i32; 6], seed: i32) -> f64 {
    let n = scramble(hash_6d(corner, seed) & 0x7fff_ffff);
    1.0 - n as f64 / INT32_RANGE
}

// Interpolates the 64 corners of a 6D cell, one axis at a time. Corner `i`
// takes the upper lattice coordinate on axis `a` when bit `a` of `i` is set.
fn coherent_noise_6d(
    p: &[f64; 6],
    quality: NoiseQuality,
    corner_value: impl Fn(&[i32; 6]) -> f64,
) -> f64 {
    let mut base = [0i32; 6];
    let mut weights = [0.0; 6];
    for axis in 0..6 {
        base[axis] = lattice(p[axis]);
        weights[axis] = quality.weight(p[axis] - base[axis] as f64);
    }

    let mut values = [0.0; 64];
    for (i, value) in values.iter_mut().enumerate() {
        let mut corner = base;
        for (axis, c) in corner.iter_mut().enumerate() {
            if i & (1 << axis) != 0 {
                *c = c.wrapping_add(1);
            }
        }
        *value = corner_value(&corner);
    }

    let mut len = 64;
    for w in weights {
        len /= 2;
        for i in 0..len {
            values[i] = linear_interp(values[2 * i], values[2 * i + 1], w);
        }
    }
    values[0]
}

/// 6D gradient noise; zero on integer lattice points.
pub fn gradient_coherent_noise_6d(p: &[f64; 6], seed: i32, quality: NoiseQuality) -> f64 {
    coherent_noise_6d(p, quality, |corner| gradient_noise_6d(p, corner, seed))
}

/// 6D value noise in [-1, 1].
pub fn value_coherent_noise_6d(p: &[f64; 6], seed: i32, quality: NoiseQuality) -> f64 {
    coherent_noise_6d(p, quality, |corner| value_noise_6d(corner, seed))
}
