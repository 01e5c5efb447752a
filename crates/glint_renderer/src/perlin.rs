//! Gradient (Perlin) noise with turbulence.

use glint_math::{random::random_vec_range, unit_vector, DVec3, Point3};
use rand::seq::SliceRandom;
use rand::Rng;

const POINT_COUNT: usize = 256;

/// Octaves summed by [`Perlin::turb`] when no depth is given.
pub const DEFAULT_TURBULENCE_DEPTH: u32 = 7;

/// Lattice gradient noise.
///
/// Random unit gradients sit on the integer lattice; a point's value is the
/// Hermite-smoothed trilinear blend of the dot products with its 8
/// surrounding corners. Output lies roughly in `[-1, 1]`.
#[derive(Clone, Debug)]
pub struct Perlin {
    ranvec: Vec<DVec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let ranvec = (0..POINT_COUNT)
            .map(|_| unit_vector(random_vec_range(rng, -1.0, 1.0)))
            .collect();

        Self {
            ranvec,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    pub fn noise(&self, p: Point3) -> f64 {
        let floor = p.floor();
        let (u, v, w) = (p.x - floor.x, p.y - floor.y, p.z - floor.z);
        let (i, j, k) = (floor.x as i64, floor.y as i64, floor.z as i64);

        let mut c = [[[DVec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let idx = self.perm_x[lattice(i, di)]
                        ^ self.perm_y[lattice(j, dj)]
                        ^ self.perm_z[lattice(k, dk)];
                    *corner = self.ranvec[idx];
                }
            }
        }

        perlin_interp(&c, u, v, w)
    }

    /// Sum of `depth` octaves, each at double the frequency and half the
    /// weight of the previous one. Always non-negative.
    pub fn turb(&self, p: Point3, depth: u32) -> f64 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

/// Wrap a lattice coordinate into the permutation table.
#[inline]
fn lattice(base: i64, offset: usize) -> usize {
    ((base + offset as i64) & (POINT_COUNT as i64 - 1)) as usize
}

fn generate_perm<R: Rng + ?Sized>(rng: &mut R) -> Vec<usize> {
    let mut p: Vec<usize> = (0..POINT_COUNT).collect();
    p.shuffle(rng);
    p
}

fn perlin_interp(c: &[[[DVec3; 2]; 2]; 2], u: f64, v: f64, w: f64) -> f64 {
    // Hermite smoothing
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, corner) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f64, j as f64, k as f64);
                let weight_v = DVec3::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * corner.dot(weight_v);
            }
        }
    }
    accum
}
