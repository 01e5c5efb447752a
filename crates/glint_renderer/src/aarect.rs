//! Axis-aligned rectangles.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glint_math::{DVec3, Interval};

/// Which plane a rectangle lies in. The missing axis is held fixed at `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectPlane {
    /// Spans x and y at z = k.
    Xy,
    /// Spans x and z at y = k.
    Xz,
    /// Spans y and z at x = k.
    Yz,
}

impl RectPlane {
    /// Component indices `(a, b, fixed)`.
    #[inline]
    fn axes(self) -> (usize, usize, usize) {
        match self {
            RectPlane::Xy => (0, 1, 2),
            RectPlane::Xz => (0, 2, 1),
            RectPlane::Yz => (1, 2, 0),
        }
    }

    /// Unit vector along the fixed axis.
    fn normal(self) -> DVec3 {
        match self {
            RectPlane::Xy => DVec3::Z,
            RectPlane::Xz => DVec3::Y,
            RectPlane::Yz => DVec3::X,
        }
    }
}

/// A rectangle `[a0, a1] x [b0, b1]` in one of the axis planes.
pub struct AaRect {
    plane: RectPlane,
    a0: f64,
    a1: f64,
    b0: f64,
    b1: f64,
    k: f64,
    material: Arc<dyn Material>,
}

impl AaRect {
    pub fn new(
        plane: RectPlane,
        (a0, a1): (f64, f64),
        (b0, b1): (f64, f64),
        k: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            plane,
            a0,
            a1,
            b0,
            b1,
            k,
            material,
        }
    }

    /// Rectangle `[x0, x1] x [y0, y1]` at `z = k`.
    pub fn xy(x: (f64, f64), y: (f64, f64), k: f64, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Xy, x, y, k, material)
    }

    /// Rectangle `[x0, x1] x [z0, z1]` at `y = k`.
    pub fn xz(x: (f64, f64), z: (f64, f64), k: f64, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Xz, x, z, k, material)
    }

    /// Rectangle `[y0, y1] x [z0, z1]` at `x = k`.
    pub fn yz(y: (f64, f64), z: (f64, f64), k: f64, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Yz, y, z, k, material)
    }
}

impl Hittable for AaRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let (ia, ib, ik) = self.plane.axes();
        let origin = ray.origin();
        let dir = ray.direction();

        // Parallel rays give +-inf or NaN here and fall out of the interval test
        let t = (self.k - origin[ik]) / dir[ik];
        if !ray_t.surrounds(t) {
            return None;
        }

        let a = origin[ia] + t * dir[ia];
        let b = origin[ib] + t * dir[ib];
        if !Interval::new(self.a0, self.a1).contains(a)
            || !Interval::new(self.b0, self.b1).contains(b)
        {
            return None;
        }

        let uv = (
            (a - self.a0) / (self.a1 - self.a0),
            (b - self.b0) / (self.b1 - self.b0),
        );
        Some(HitRecord::new(
            ray,
            t,
            self.plane.normal(),
            uv,
            self.material.as_ref(),
        ))
    }
}
