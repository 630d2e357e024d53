//! End-to-end render scenarios.

use lumen_renderer::{
    render, render_sequential, render_with_control, sky_color, CameraSettings, CancelToken, Color,
    Material, Rect, RenderConfig, RenderControl, RenderError, Scene, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn unpack(rgb: u32) -> [u8; 3] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}

fn luminance(rgb: u32) -> u32 {
    let [r, g, b] = unpack(rgb);
    u32::from(r) + u32::from(g) + u32::from(b)
}

fn mixed_scene() -> Scene {
    let mut scene = Scene::new();
    let red = scene.add_material(Material::metal(Color::new(1.0, 0.0, 0.0), 0.9)).unwrap();
    let glass = scene.add_material(Material::dielectric(1.5)).unwrap();
    let grey = scene.add_material(Material::lambertian(Color::splat(0.5))).unwrap();
    scene.add(Rect::yz((-5.0, 0.0), (-5.0, 5.0), -4.0, red)).unwrap();
    scene.add(Sphere::new(Vec3::new(1.0, 0.0, -4.0), 1.0, glass)).unwrap();
    scene.add(Rect::xz((-10.0, 10.0), (-10.0, 10.0), -1.0, grey)).unwrap();
    scene
}

#[test]
fn identical_parameters_give_identical_images() {
    let scene = mixed_scene();
    let camera = CameraSettings::new()
        .with_position(Vec3::new(0.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_resolution(24, 16)
        .build();
    let config = RenderConfig::new(24, 16, 3).with_bucket_size(5);

    let first = render(&camera, &scene, &config).unwrap();
    let second = render(&camera, &scene, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_matches_sequential() {
    let scene = mixed_scene();
    let camera = CameraSettings::new()
        .with_position(Vec3::new(0.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_resolution(20, 12)
        .build();
    let config = RenderConfig::new(20, 12, 2).with_bucket_size(7).with_threads(3);

    let parallel = render(&camera, &scene, &config).unwrap();
    let sequential = render_sequential(&camera, &scene, &config).unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn empty_scene_renders_only_sky() {
    let (width, height) = (16u32, 12u32);
    let settings = CameraSettings::new()
        .with_position(Vec3::new(0.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_resolution(width, height);
    let camera = settings.build();
    let image = render(&camera, &Scene::new(), &RenderConfig::new(width, height, 4)).unwrap();

    // Bound every pixel by the sky colors of the extreme rays through its footprint
    let mut rng = StdRng::seed_from_u64(0);
    let pinhole = settings.with_lens(settings.vfov, 0.0, settings.focus_dist).build();
    for row in 0..height {
        let y = height - 1 - row;
        for col in 0..width {
            let s = f64::from(col) / f64::from(width);
            let s1 = f64::from(col + 1) / f64::from(width);
            let t0 = f64::from(y) / f64::from(height);
            let t1 = f64::from(y + 1) / f64::from(height);

            let mut lo = [255u32; 3];
            let mut hi = [0u32; 3];
            for (ss, tt) in [(s, t0), (s1, t0), (s, t1), (s1, t1)] {
                let sky = sky_color(&pinhole.get_ray(ss, tt, &mut rng));
                let channels = [sky.x, sky.y, sky.z];
                for c in 0..3 {
                    let v = (255.0 * channels[c].sqrt()) as u32;
                    lo[c] = lo[c].min(v);
                    hi[c] = hi[c].max(v);
                }
            }

            let rgb = unpack(image.get(col, row));
            for c in 0..3 {
                let v = u32::from(rgb[c]);
                // One step of slack for lens jitter and rounding
                assert!(
                    v + 1 >= lo[c] && v <= hi[c] + 1,
                    "pixel ({col},{row}) channel {c}: {v} not in [{}, {}]",
                    lo[c],
                    hi[c]
                );
            }
            // Sky is never darker than its blue end
            assert!(rgb[2] >= 254);
        }
    }
}

#[test]
fn diffuse_sphere_center_darker_than_border() {
    let mut scene = Scene::new();
    let grey = scene.add_material(Material::lambertian(Color::splat(0.5))).unwrap();
    scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey)).unwrap();

    let (width, height) = (21u32, 21u32);
    let camera = CameraSettings::new()
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0), Vec3::Y)
        .with_lens(60.0, 0.0, 3.0)
        .with_resolution(width, height)
        .build();
    let image = render(&camera, &scene, &RenderConfig::new(width, height, 8)).unwrap();

    let center = image.get(width / 2, height / 2);
    for border in [image.get(0, height / 2), image.get(width - 1, height / 2), image.get(0, 0)] {
        assert!(
            luminance(center) < luminance(border),
            "center {center:06x} should be darker than border {border:06x}"
        );
    }
}

#[test]
fn rows_are_flipped_top_first() {
    // With no geometry the top row looks further up the sky, so it is bluer
    let (width, height) = (4u32, 8u32);
    let camera = CameraSettings::new()
        .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
        .with_lens(120.0, 0.0, 1.0)
        .with_resolution(width, height)
        .build();
    let image = render(&camera, &Scene::new(), &RenderConfig::new(width, height, 2)).unwrap();

    let top = unpack(image.get(1, 0));
    let bottom = unpack(image.get(1, height - 1));
    assert!(top[0] < bottom[0], "top {top:?} bottom {bottom:?}");
}

#[test]
fn cancelled_render_returns_no_image() {
    let token = CancelToken::new();
    token.cancel();
    let control = RenderControl::new().with_token(token);
    let camera = CameraSettings::new().build();

    let result = render_with_control(&camera, &mixed_scene(), &RenderConfig::new(8, 8, 1), &control);
    assert!(matches!(result, Err(RenderError::Cancelled)));
}
