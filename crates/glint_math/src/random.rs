//! Random sampling helpers.
//!
//! Every function takes the generator explicitly so callers decide whether
//! it is a per-pixel seeded `StdRng` or a thread-local one. The `?Sized`
//! bound lets `&mut dyn RngCore` through.

use crate::DVec3;
use rand::Rng;

/// Uniform in `[0, 1)`.
#[inline]
pub fn random_f64<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Uniform in `[min, max)`.
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Uniform in the unit cube `[0, 1)^3`.
pub fn random_vec<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    DVec3::new(random_f64(rng), random_f64(rng), random_f64(rng))
}

/// Uniform in the cube `[min, max)^3`.
pub fn random_vec_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> DVec3 {
    DVec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Uniform inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    loop {
        let p = random_vec_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform on the unit sphere surface.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    loop {
        let p = random_vec_range(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        // Reject the tiny core as well so the division stays well conditioned
        if len_sq > 1e-160 && len_sq < 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform in the hemisphere around `normal`.
pub fn random_in_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: DVec3) -> DVec3 {
    let in_unit_sphere = random_in_unit_sphere(rng);
    if in_unit_sphere.dot(normal) > 0.0 {
        in_unit_sphere
    } else {
        -in_unit_sphere
    }
}

/// Uniform inside the unit disk on the z = 0 plane (rejection sampling).
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    loop {
        let p = DVec3::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
