//! Built-in scenes.

use std::ops::Range;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use lumen_renderer::{
    Color, Material, MaterialId, Primitive, Rect, Scene, SceneError, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneName {
    /// No geometry, only the sky
    Empty,
    /// Colored metal walls around a glass sphere
    Nice,
    /// Random primitives and materials
    Random,
    /// A 50x50 grid of glass spheres
    #[value(alias = "irreg")]
    IrregularGrid,
}

/// A scene plus where the camera should look from.
pub struct SceneSetup {
    pub scene: Scene,
    pub look_from: Vec3,
    pub look_at: Vec3,
}

/// Build the named scene. `seed` only affects the random scene, which is
/// otherwise seeded from the wall clock.
pub fn build(name: SceneName, seed: Option<u64>) -> Result<SceneSetup, SceneError> {
    match name {
        SceneName::Empty => Ok(empty_scene()),
        SceneName::Nice => nice_scene(),
        SceneName::Random => {
            let seed = seed.unwrap_or_else(wall_clock_seed);
            log::info!("Random scene seed: {seed}");
            random_scene(&mut StdRng::seed_from_u64(seed))
        }
        SceneName::IrregularGrid => irregular_grid_scene(),
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn empty_scene() -> SceneSetup {
    SceneSetup {
        scene: Scene::new(),
        look_from: Vec3::new(0.0, 2.0, 3.0),
        look_at: Vec3::ZERO,
    }
}

fn nice_scene() -> Result<SceneSetup, SceneError> {
    let mut scene = Scene::new();
    let red = scene.add_material(Material::metal(Color::new(1.0, 0.0, 0.0), 0.9))?;
    let green = scene.add_material(Material::metal(Color::new(0.0, 1.0, 0.0), 0.9))?;
    let blue = scene.add_material(Material::metal(Color::new(0.0, 0.0, 1.0), 0.9))?;
    let glass = scene.add_material(Material::dielectric(2.0))?;

    // Side walls
    scene.add(Rect::yz((-5.0, 0.0), (-5.0, 5.0), -4.0, red))?;
    scene.add(Rect::yz((-5.0, 0.0), (-5.0, 5.0), 4.0, green))?;

    scene.add(Sphere::new(Vec3::new(4.0, 0.0, -6.0), 2.0, glass))?;

    // Back wall
    scene.add(Rect::xy((-4.0, 4.0), (-5.0, 0.0), -5.0, blue))?;

    Ok(SceneSetup {
        scene,
        look_from: Vec3::new(0.0, 3.0, 3.0),
        look_at: Vec3::ZERO,
    })
}

const RANDOM_MATERIALS: usize = 10;
const RANDOM_OBJECTS: usize = 30;

fn random_scene(rng: &mut StdRng) -> Result<SceneSetup, SceneError> {
    let mut scene = Scene::new();
    let materials = (0..RANDOM_MATERIALS)
        .map(|_| scene.add_material(random_material(rng)))
        .collect::<Result<Vec<_>, _>>()?;

    for _ in 0..RANDOM_OBJECTS {
        let material = materials[rng.gen_range(0..materials.len())];
        scene.add(random_primitive(rng, material))?;
    }

    Ok(SceneSetup {
        scene,
        look_from: Vec3::new(0.0, 2.0, 3.0),
        look_at: Vec3::ZERO,
    })
}

fn random_color(rng: &mut StdRng) -> Color {
    Color::new(rng.gen(), rng.gen(), rng.gen())
}

fn random_material(rng: &mut StdRng) -> Material {
    match rng.gen_range(0..3) {
        0 => Material::lambertian(random_color(rng)),
        1 => {
            let albedo = random_color(rng);
            Material::metal(albedo, rng.gen())
        }
        _ => Material::dielectric(rng.gen_range(0.1..2.0)),
    }
}

fn random_primitive(rng: &mut StdRng, material: MaterialId) -> Primitive {
    match rng.gen_range(0..4) {
        0 => {
            let center = Vec3::new(
                rng.gen_range(-10.0..-8.0),
                rng.gen_range(-26.0..=0.0),
                rng.gen_range(-15.0..-13.0),
            );
            Sphere::new(center, rng.gen_range(0.05..5.0), material).into()
        }
        1 => {
            let x = random_span(rng, -10.0..-8.0, 4.0);
            let y = random_span(rng, -10.0..-8.0, 4.0);
            Rect::xy(x, y, rng.gen_range(-5.0..-3.0), material).into()
        }
        2 => {
            let x = random_span(rng, -10.0..-8.0, 8.0);
            let z = random_span(rng, -10.0..-8.0, 8.0);
            Rect::xz(x, z, rng.gen_range(-5.0..-3.0), material).into()
        }
        _ => {
            let y = random_span(rng, -10.0..-8.0, 8.0);
            let z = random_span(rng, -10.0..-8.0, 8.0);
            Rect::yz(y, z, rng.gen_range(-5.0..-3.0), material).into()
        }
    }
}

/// Lower bound plus a non-negative extent, so bounds are never inverted.
fn random_span(rng: &mut StdRng, lo: Range<f64>, extent: f64) -> (f64, f64) {
    let start = rng.gen_range(lo);
    (start, start + rng.gen::<f64>() * extent)
}

fn irregular_grid_scene() -> Result<SceneSetup, SceneError> {
    const N: u32 = 50;
    const EXTENT: f64 = 600.0;
    let cell = EXTENT / f64::from(N);
    let start = -EXTENT / 2.0;

    let mut scene = Scene::new();
    let glass = scene.add_material(Material::dielectric(1.0))?;
    for x in 0..N {
        for z in 0..N {
            let center = Vec3::new(start + cell * f64::from(x), 0.0, start + cell * f64::from(z));
            scene.add(Sphere::new(center, cell / 2.0, glass))?;
        }
    }

    Ok(SceneSetup {
        scene,
        look_from: Vec3::new(0.0, 12.0, 30.0),
        look_at: Vec3::new(0.0, 10.0, -1.0),
    })
}
