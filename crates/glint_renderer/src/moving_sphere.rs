//! Sphere whose center moves linearly over a time range.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    sphere::hit_sphere,
    Material, Ray,
};
use glint_math::{Interval, Point3};

/// A sphere that travels from `center0` at `time0` to `center1` at `time1`.
///
/// Rays are tested against the center at their own `time`, which is what
/// produces motion blur when the camera shutter is open over a range.
pub struct MovingSphere {
    center0: Point3,
    center1: Point3,
    time0: f64,
    time1: f64,
    radius: f64,
    material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(
        (center0, center1): (Point3, Point3),
        (time0, time1): (f64, f64),
        radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Center at `time`, extrapolated linearly outside the keyframes.
    pub fn center(&self, time: f64) -> Point3 {
        let span = self.time1 - self.time0;
        if span == 0.0 {
            return self.center0;
        }
        self.center0 + ((time - self.time0) / span) * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere(
            self.center(ray.time()),
            self.radius,
            self.material.as_ref(),
            ray,
            ray_t,
        )
    }
}
