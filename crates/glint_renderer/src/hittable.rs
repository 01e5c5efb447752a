//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use crate::{Material, Ray};
use glint_math::{DVec3, Interval, Point3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: DVec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f64,
    pub v: f64,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at parameter `t`.
    ///
    /// `outward_normal` must be unit length; it is flipped as needed so the
    /// stored normal opposes the ray.
    pub fn new(
        ray: &Ray,
        t: f64,
        outward_normal: DVec3,
        (u, v): (f64, f64),
        material: &'a dyn Material,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u,
            v,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: DVec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// An ordered collection of hittables, scanned linearly.
///
/// Members are tested in insertion order; when two report the same `t`
/// the earlier one wins because later hits must land strictly inside the
/// narrowed interval.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the end of the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl From<Arc<dyn Hittable>> for HittableList {
    fn from(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffuseLight, Lambertian, Sphere};
    use glint_math::Color;

    fn sphere(center: DVec3, radius: f64, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(center, radius, material))
    }

    const FULL: Interval = Interval::new(0.001, f64::INFINITY);

    #[test]
    fn test_face_normal_orientation() {
        let mat = Lambertian::new(Color::ONE);
        let ray = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        let front = HitRecord::new(&ray, 1.0, DVec3::Z, (0.0, 0.0), &mat);
        assert!(front.front_face);
        assert_eq!(front.normal, DVec3::Z);
        assert_eq!(front.p, DVec3::new(0.0, 0.0, -1.0));

        let back = HitRecord::new(&ray, 1.0, -DVec3::Z, (0.0, 0.0), &mat);
        assert!(!back.front_face);
        assert_eq!(back.normal, DVec3::Z);
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new_simple(DVec3::ZERO, DVec3::X);
        assert!(world.hit(&ray, FULL).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let near: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(1.0, 0.0, 0.0)));
        let far: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(0.0, 0.0, 1.0)));
        let ray = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        for near_first in [true, false] {
            let mut world = HittableList::new();
            let a = sphere(DVec3::new(0.0, 0.0, -2.0), 0.5, near.clone());
            let b = sphere(DVec3::new(0.0, 0.0, -2.6), 0.5, far.clone());
            if near_first {
                world.add(a);
                world.add(b);
            } else {
                world.add(b);
                world.add(a);
            }

            let rec = world.hit(&ray, FULL).unwrap();
            assert!((rec.t - 1.5).abs() < 1e-9);
            assert_eq!(
                rec.material.emitted(rec.u, rec.v, rec.p),
                Color::new(1.0, 0.0, 0.0)
            );
        }
    }

    #[test]
    fn test_identical_t_prefers_first_inserted() {
        let first: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(1.0, 1.0, 0.0)));
        let second: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(0.0, 1.0, 1.0)));

        let mut world = HittableList::new();
        world.add(sphere(DVec3::new(0.0, 0.0, -3.0), 1.0, first));
        world.add(sphere(DVec3::new(0.0, 0.0, -3.0), 1.0, second));

        let ray = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let rec = world.hit(&ray, FULL).unwrap();
        assert_eq!(
            rec.material.emitted(rec.u, rec.v, rec.p),
            Color::new(1.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_respects_interval_max() {
        let mat: Arc<dyn Material> = Arc::new(Lambertian::new(Color::ONE));
        let world = HittableList::from(sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, mat));
        let ray = Ray::new_simple(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        assert!(world.hit(&ray, Interval::new(0.001, 3.0)).is_none());
        assert!(world.hit(&ray, Interval::new(0.001, 4.5)).is_some());
    }
}
