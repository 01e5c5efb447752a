//! Built-in scene presets.

use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use glint_math::random::{random_f64, random_range, random_vec, random_vec_range};
use glint_renderer::{
    AaRect, CameraSettings, CheckerTexture, Color, Dielectric, DiffuseLight, Hittable,
    HittableList, ImageTexture, Lambertian, Material, Metal, MovingSphere, NoiseTexture, Point3,
    Sphere, DVec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Everything a preset hands to the renderer.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraSettings,
    pub background: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// Field of small random spheres around three large ones
    RandomSpheres,
    /// The random field with bouncing diffuse spheres and a shutter
    BouncingSpheres,
    /// Two large checkered spheres
    TwoSpheres,
    /// Marble-textured sphere on a marble ground
    PerlinSpheres,
    /// Image-mapped globe
    Earth,
    /// Noise spheres lit by a rectangular emitter
    SimpleLight,
    /// Empty Cornell box with a ceiling light
    CornellBox,
}

impl ScenePreset {
    /// Build the preset. `seed` drives the random placement and the noise
    /// tables; `texture` is the image the earth preset maps.
    pub fn build(self, seed: u64, texture: &Path) -> Scene {
        let mut rng = StdRng::seed_from_u64(seed);
        match self {
            Self::RandomSpheres => random_spheres(&mut rng, false),
            Self::BouncingSpheres => random_spheres(&mut rng, true),
            Self::TwoSpheres => two_spheres(),
            Self::PerlinSpheres => perlin_spheres(&mut rng),
            Self::Earth => earth(texture),
            Self::SimpleLight => simple_light(&mut rng),
            Self::CornellBox => cornell_box(),
        }
    }
}

const SKY: Color = Color::new(0.7, 0.8, 1.0);

fn sphere(center: Point3, radius: f64, material: Arc<dyn Material>) -> Arc<dyn Hittable> {
    Arc::new(Sphere::new(center, radius, material))
}

/// The outdoor camera shared by the sphere presets.
fn outdoor_camera(aperture: f64) -> CameraSettings {
    CameraSettings::new()
        .with_position(DVec3::new(13.0, 2.0, 3.0), Point3::ZERO, DVec3::Y)
        .with_lens(20.0, aperture, 10.0)
        .with_aspect_ratio(16.0 / 9.0)
}

fn random_spheres(rng: &mut StdRng, bouncing: bool) -> Scene {
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = if bouncing {
        Arc::new(Lambertian::from_texture(Arc::new(CheckerTexture::from_colors(
            Color::new(0.2, 0.3, 0.1),
            Color::new(0.9, 0.9, 0.9),
        ))))
    } else {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    };
    world.add(sphere(DVec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );

            // Keep the area around the big metal sphere clear
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_vec(rng) * random_vec(rng);
                let material: Arc<dyn Material> = Arc::new(Lambertian::new(albedo));
                if bouncing {
                    let center1 = center + DVec3::new(0.0, random_range(rng, 0.0, 0.5), 0.0);
                    world.add(Arc::new(MovingSphere::new(
                        (center, center1),
                        (0.0, 1.0),
                        0.2,
                        material,
                    )));
                } else {
                    world.add(sphere(center, 0.2, material));
                }
            } else if choose_mat < 0.95 {
                let albedo = random_vec_range(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                world.add(sphere(center, 0.2, Arc::new(Metal::new(albedo, fuzz))));
            } else {
                world.add(sphere(center, 0.2, Arc::new(Dielectric::new(1.5))));
            }
        }
    }

    world.add(sphere(DVec3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5))));
    world.add(sphere(
        DVec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(sphere(
        DVec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    let camera = if bouncing {
        outdoor_camera(0.0).with_shutter(0.0, 1.0)
    } else {
        outdoor_camera(0.1)
    };

    Scene {
        world,
        camera,
        background: SKY,
    }
}

fn two_spheres() -> Scene {
    let checker: Arc<dyn Material> = Arc::new(Lambertian::from_texture(Arc::new(
        CheckerTexture::from_colors(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9)),
    )));

    let mut world = HittableList::new();
    world.add(sphere(DVec3::new(0.0, -10.0, 0.0), 10.0, checker.clone()));
    world.add(sphere(DVec3::new(0.0, 10.0, 0.0), 10.0, checker));

    Scene {
        world,
        camera: outdoor_camera(0.0),
        background: SKY,
    }
}

fn perlin_spheres(rng: &mut StdRng) -> Scene {
    let marble: Arc<dyn Material> =
        Arc::new(Lambertian::from_texture(Arc::new(NoiseTexture::new(4.0, rng))));

    let mut world = HittableList::new();
    world.add(sphere(DVec3::new(0.0, -1000.0, 0.0), 1000.0, marble.clone()));
    world.add(sphere(DVec3::new(0.0, 2.0, 0.0), 2.0, marble));

    Scene {
        world,
        camera: outdoor_camera(0.0),
        background: SKY,
    }
}

fn earth(texture: &Path) -> Scene {
    let surface = Arc::new(Lambertian::from_texture(Arc::new(ImageTexture::open(texture))));

    let mut world = HittableList::new();
    world.add(sphere(Point3::ZERO, 2.0, surface));

    Scene {
        world,
        camera: outdoor_camera(0.0),
        background: SKY,
    }
}

fn simple_light(rng: &mut StdRng) -> Scene {
    let marble: Arc<dyn Material> =
        Arc::new(Lambertian::from_texture(Arc::new(NoiseTexture::new(4.0, rng))));

    let mut world = HittableList::new();
    world.add(sphere(DVec3::new(0.0, -1000.0, 0.0), 1000.0, marble));
    world.add(sphere(
        DVec3::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Lambertian::new(Color::new(0.0, 0.7, 1.0))),
    ));
    world.add(Arc::new(AaRect::xy(
        (3.0, 5.0),
        (1.0, 3.0),
        -2.0,
        Arc::new(DiffuseLight::new(Color::splat(4.0))),
    )));

    let camera = CameraSettings::new()
        .with_position(DVec3::new(26.0, 3.0, 6.0), DVec3::new(0.0, 2.0, 0.0), DVec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_aspect_ratio(16.0 / 9.0);

    Scene {
        world,
        camera,
        background: Color::ZERO,
    }
}

/// Box edge length.
const CORNELL_SIZE: f64 = 1110.0;

fn cornell_box() -> Scene {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let s = CORNELL_SIZE;
    let mut world = HittableList::new();
    world.add(Arc::new(AaRect::yz((0.0, s), (0.0, s), s, green)));
    world.add(Arc::new(AaRect::yz((0.0, s), (0.0, s), 0.0, red)));
    world.add(Arc::new(AaRect::xz((426.0, 686.0), (454.0, 664.0), s - 2.0, light)));
    world.add(Arc::new(AaRect::xz((0.0, s), (0.0, s), 0.0, white.clone())));
    world.add(Arc::new(AaRect::xz((0.0, s), (0.0, s), s, white.clone())));
    world.add(Arc::new(AaRect::xy((0.0, s), (0.0, s), s, white)));

    let center = s / 2.0 + 1.0;
    let camera = CameraSettings::new()
        .with_position(
            DVec3::new(center, center, -1600.0),
            DVec3::new(center, center, 0.0),
            DVec3::Y,
        )
        .with_lens(35.0, 0.0, 10.0)
        .with_aspect_ratio(1.0);

    Scene {
        world,
        camera,
        background: Color::ZERO,
    }
}
