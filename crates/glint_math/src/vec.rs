//! Free-standing vector helpers that glam doesn't provide.

use crate::DVec3;
use std::f64::consts::PI;

/// Scale `v` to unit length.
///
/// Unlike `DVec3::normalize` this does not debug-assert on a zero vector;
/// callers get the IEEE result (NaN components) instead.
#[inline]
pub fn unit_vector(v: DVec3) -> DVec3 {
    v / v.length()
}

/// True when every component is within `1e-8` of zero.
#[inline]
pub fn near_zero(v: DVec3) -> bool {
    const S: f64 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices. The parallel
/// component uses `|1 - |r_perp|^2|` so a tiny negative residue never
/// produces a NaN.
#[inline]
pub fn refract(uv: DVec3, n: DVec3, etai_over_etat: f64) -> DVec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}
