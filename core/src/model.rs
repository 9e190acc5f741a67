//! Surface models: map 2D surface coordinates onto 3D points and sample a
//! generator there.

use crate::NoiseGenerator;

/// Samples the plane y = 0.
pub fn plane(source: &dyn NoiseGenerator, x: f64, z: f64) -> f64 {
    source.get3(x, 0.0, z)
}

/// Samples a unit-radius cylinder around the y axis. `angle` is in degrees.
pub fn cylinder(source: &dyn NoiseGenerator, angle: f64, height: f64) -> f64 {
    let [x, y, z] = cylinder_point(angle, height);
    source.get3(x, y, z)
}

/// Samples the unit sphere at latitude `lat` and longitude `lon`, both in
/// degrees.
pub fn sphere(source: &dyn NoiseGenerator, lat: f64, lon: f64) -> f64 {
    let [x, y, z] = sphere_point(lat, lon);
    source.get3(x, y, z)
}

pub fn cylinder_point(angle: f64, height: f64) -> [f64; 3] {
    let a = angle.to_radians();
    [a.cos(), height, a.sin()]
}

pub fn sphere_point(lat: f64, lon: f64) -> [f64; 3] {
    let (lat, lon) = (lat.to_radians(), lon.to_radians());
    let r = lat.cos();
    [r * lon.cos(), lat.sin(), r * lon.sin()]
}
