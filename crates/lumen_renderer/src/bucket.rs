//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::renderer::shade_pixel;
use crate::{Camera, ImageBuffer, RenderConfig, RenderControl, RenderError, Scene};

/// A rectangular region of the output image, in output coordinates
/// (row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets are scheduled from the center outward; the final image does not
/// depend on the order since every pixel has its own random stream.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = f64::from(width) / 2.0;
    let center_y = f64::from(height) / 2.0;
    let distance = |b: &Bucket| {
        let bx = f64::from(b.x) + f64::from(b.width) / 2.0;
        let by = f64::from(b.y) + f64::from(b.height) / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    // Stable sort keeps row-major order between equidistant buckets
    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket, checking `control` before every pixel.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    seed: u64,
    control: &RenderControl,
) -> Result<BucketResult, RenderError> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            control.check()?;
            let col = bucket.x + local_x;
            let row = bucket.y + local_y;
            pixels.push(shade_pixel(camera, scene, config, seed, col, row));
        }
    }

    log::trace!("Bucket {} done ({} pixels)", bucket.index, pixels.len());
    Ok(BucketResult::new(*bucket, pixels))
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Packed pixels in row-major order
    pub pixels: Vec<u32>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<u32>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into the full image.
    pub fn blit(&self, image: &mut ImageBuffer) {
        let width = self.bucket.width as usize;
        for (local_y, row) in self.pixels.chunks(width).enumerate() {
            for (local_x, &rgb) in row.iter().enumerate() {
                image.set(
                    self.bucket.x + local_x as u32,
                    self.bucket.y + local_y as u32,
                    rgb,
                );
            }
        }
    }
}
