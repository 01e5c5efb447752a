//! Material trait for surface scattering.

use std::sync::Arc;

use glint_math::random::{random_f64, random_in_unit_sphere, random_unit_vector};
use glint_math::{near_zero, reflect, refract, unit_vector, Color, Point3};
use rand::RngCore;

use crate::texture::{SolidColor, Texture};
use crate::{hittable::HitRecord, Ray};

/// Outcome of a scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel energy kept by the bounce
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter>;

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with a constant albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(Scatter {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let reflected = reflect(unit_vector(ray_in.direction()), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the ray below the surface; absorb it then
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(Scatter {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy)]
pub struct Dielectric {
    /// Index of refraction
    ior: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f64) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    pub fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
        let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = unit_vector(ray_in.direction());
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > random_f64(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(Scatter {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

/// Diffuse light emitter.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn from_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<Scatter> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, u: f64, v: f64, p: Point3) -> Color {
        self.emit.value(u, v, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::CheckerTexture;
    use glint_math::DVec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Hit on the z = 0 plane at the origin, ray arriving along `dir`.
    fn hit_with<'a>(material: &'a dyn Material, dir: DVec3, outward: DVec3) -> (Ray, HitRecord<'a>) {
        let ray = Ray::new(-dir, dir, 0.25);
        let rec = HitRecord::new(&ray, 1.0, outward, (0.5, 0.5), material);
        (ray, rec)
    }

    #[test]
    fn test_lambertian_always_scatters_outward() {
        let mat = Lambertian::new(Color::new(0.4, 0.2, 0.1));
        let (ray, rec) = hit_with(&mat, DVec3::new(0.3, 0.0, -1.0), DVec3::Z);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let s = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(s.attenuation, Color::new(0.4, 0.2, 0.1));
            assert!(s.scattered.direction().dot(rec.normal) >= 0.0);
            assert_eq!(s.scattered.origin(), rec.p);
            assert_eq!(s.scattered.time(), 0.25);
        }
    }

    #[test]
    fn test_lambertian_samples_texture_at_hit() {
        let checker = CheckerTexture::from_colors(Color::ONE, Color::ZERO);
        let mat = Lambertian::from_texture(Arc::new(checker));
        let ray = Ray::new_simple(DVec3::new(0.1, 0.1, 1.1), DVec3::new(0.0, 0.0, -1.0));
        // p = (0.1, 0.1, 0.1): every sine positive
        let rec = HitRecord::new(&ray, 1.0, DVec3::Z, (0.0, 0.0), &mat);

        let s = mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(s.attenuation, Color::ONE);
    }

    #[test]
    fn test_perfect_mirror() {
        let mat = Metal::new(Color::new(0.7, 0.6, 0.5), 0.0);
        let dir = DVec3::new(1.0, 0.0, -1.0);
        let (ray, rec) = hit_with(&mat, dir, DVec3::Z);

        let s = mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(3)).unwrap();
        let expected = unit_vector(DVec3::new(1.0, 0.0, 1.0));
        assert!((s.scattered.direction() - expected).length() < 1e-12);
        assert_eq!(s.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz, 1.0);
        assert_eq!(Metal::new(Color::ONE, 0.3).fuzz, 0.3);
    }

    #[test]
    fn test_fuzzy_metal_never_scatters_into_surface() {
        let mat = Metal::new(Color::ONE, 1.0);
        // Grazing incidence so fuzz regularly pushes below the surface
        let (ray, rec) = hit_with(&mat, DVec3::new(1.0, 0.0, -0.05), DVec3::Z);
        let mut rng = StdRng::seed_from_u64(4);

        let mut absorbed = 0;
        for _ in 0..500 {
            match mat.scatter(&ray, &rec, &mut rng) {
                Some(s) => assert!(s.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_is_untinted() {
        let mat = Dielectric::new(1.5);
        let (ray, rec) = hit_with(&mat, DVec3::new(0.2, 0.1, -1.0), DVec3::Z);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let s = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(s.attenuation, Color::ONE);
            assert!(s.scattered.direction().is_finite());
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Dielectric::new(1.5);
        // Leaving glass at a grazing angle: back face, ratio 1.5
        let dir = DVec3::new(1.0, 0.0, 0.2);
        let (ray, rec) = hit_with(&mat, dir, DVec3::Z);
        assert!(!rec.front_face);

        let mut rng = StdRng::seed_from_u64(6);
        let expected = reflect(unit_vector(dir), rec.normal);
        for _ in 0..100 {
            let s = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert!((s.scattered.direction() - expected).length() < 1e-12);
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        // Normal incidence on glass: ((1 - 1.5) / 2.5)^2 = 0.04
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-12);
        // Grazing incidence reflects everything
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diffuse_light() {
        let mat = DiffuseLight::new(Color::splat(4.0));
        let (ray, rec) = hit_with(&mat, DVec3::new(0.0, 0.0, -1.0), DVec3::Z);

        assert!(mat.scatter(&ray, &rec, &mut StdRng::seed_from_u64(7)).is_none());
        assert_eq!(mat.emitted(rec.u, rec.v, rec.p), Color::splat(4.0));
    }

    #[test]
    fn test_non_emitters_are_black() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(Lambertian::new(Color::ONE).emitted(0.1, 0.2, p), Color::ZERO);
        assert_eq!(Metal::new(Color::ONE, 0.0).emitted(0.1, 0.2, p), Color::ZERO);
        assert_eq!(Dielectric::new(1.5).emitted(0.1, 0.2, p), Color::ZERO);
    }
}
