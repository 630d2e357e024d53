//! Core ray tracing renderer.
//!
//! Implements Monte Carlo ray tracing with:
//! - Recursive ray tracing with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling

use std::time::Instant;

use rand::RngCore;
use rayon::prelude::*;
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};
use crate::{sampling, Camera, Color, Ray, RenderControl, Scene};
use lumen_math::Interval;

/// Smallest accepted hit distance, so scattered rays do not re-hit the
/// surface they leave from.
pub const T_MIN: f64 = 0.001;

/// Errors that stop a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image size must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    NoSamples,

    #[error("Bucket size must be at least 1")]
    EmptyBucket,

    #[error("Render cancelled")]
    Cancelled,

    #[error("Render deadline exceeded")]
    DeadlineExceeded,

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; derived from the other parameters when unset
    pub seed: Option<u64>,
    /// Edge length of the square tiles rendered in parallel
    pub bucket_size: u32,
    /// Worker threads; rayon's global pool when unset
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            samples_per_pixel: 10,
            max_depth: 5,
            seed: None,
            bucket_size: DEFAULT_BUCKET_SIZE,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Create a configuration for the given output size and sample count.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            ..Default::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Base seed for this render.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            sampling::render_seed(self.max_depth, self.width, self.height, self.samples_per_pixel)
        })
    }

    /// Check the configuration before any work starts.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::NoSamples);
        }
        if self.bucket_size == 0 {
            return Err(RenderError::EmptyBucket);
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Bounces through the scene until the ray escapes to the sky, is absorbed,
/// or runs out of depth. Running out of depth returns white rather than
/// black; this brightens deep glass paths and is a known bias.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ONE;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_color(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, scene, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Sky gradient from white at the horizon to blue overhead.
///
/// The only light source in the scene.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-encode a color and pack it as `0xRRGGBB`.
pub fn encode_rgb(color: Color) -> u32 {
    let channel = |c: f64| (255.0 * linear_to_gamma(c)).clamp(0.0, 255.0) as u32;
    (channel(color.x) << 16) | (channel(color.y) << 8) | channel(color.z)
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are scene coordinates with `y = 0` at the bottom of the image.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = f64::from(config.width);
    let height = f64::from(config.height);
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let jitter_x = sampling::gen_f64(rng);
        let jitter_y = sampling::gen_f64(rng);
        let s = (f64::from(x) + jitter_x) / width;
        let t = (f64::from(y) + jitter_y) / height;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / f64::from(config.samples_per_pixel)
}

/// Render and encode the pixel at output position `(col, row)`, row 0 being
/// the top of the image, using that pixel's own random stream.
pub(crate) fn shade_pixel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    seed: u64,
    col: u32,
    row: u32,
) -> u32 {
    let index = u64::from(row) * u64::from(config.width) + u64::from(col);
    let mut rng = sampling::pixel_rng(seed, index);
    let y = config.height - 1 - row;
    encode_rgb(render_pixel(camera, scene, col, y, config, &mut rng))
}

/// Row-major buffer of packed `0xRRGGBB` pixels, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Get the pixel at column `x`, row `y` (from the top).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at column `x`, row `y` (from the top).
    pub fn set(&mut self, x: u32, y: u32, rgb: u32) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Unpack to `R, G, B` bytes, row-major, top row first.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for &rgb in &self.pixels {
            bytes.extend_from_slice(&[(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]);
        }
        bytes
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the whole scene in parallel.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Result<ImageBuffer, RenderError> {
    render_with_control(camera, scene, config, &RenderControl::default())
}

/// Render the whole scene in parallel, stopping early if `control` asks to.
///
/// The output is identical to [`render_sequential`] for the same inputs.
pub fn render_with_control(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    control: &RenderControl,
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let seed = config.seed();
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} buckets, {} primitives",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len(),
        scene.len()
    );

    let start = Instant::now();
    let trace = || {
        buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, camera, scene, config, seed, control))
            .collect::<Result<Vec<_>, _>>()
    };
    let results = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(trace)?,
        None => trace()?,
    };

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        result.blit(&mut image);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Render the whole scene on the calling thread, column by column.
pub fn render_sequential(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let seed = config.seed();
    let mut image = ImageBuffer::new(config.width, config.height);
    for col in 0..config.width {
        for row in 0..config.height {
            image.set(col, row, shade_pixel(camera, scene, config, seed, col, row));
        }
    }
    Ok(image)
}
