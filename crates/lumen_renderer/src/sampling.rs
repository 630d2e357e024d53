//! Random sampling for the tracer.
//!
//! Every function takes the generator explicitly. A render derives one
//! independent stream per pixel from a base seed, so the output does not
//! depend on how pixels are scheduled across threads.

use lumen_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform double in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Base seed for a render, derived from its parameters.
///
/// Identical parameters give identical images. Not suitable for anything
/// that needs unpredictable output.
pub fn render_seed(max_depth: u32, width: u32, height: u32, samples_per_pixel: u32) -> u64 {
    u64::from(max_depth ^ width ^ height ^ samples_per_pixel)
}

/// Seed for one pixel's stream, mixed from the base seed and the pixel's
/// row-major output index.
pub fn pixel_seed(base: u64, pixel_index: u64) -> u64 {
    splitmix64(base ^ splitmix64(pixel_index))
}

/// Generator for one pixel.
pub fn pixel_rng(base: u64, pixel_index: u64) -> StdRng {
    StdRng::seed_from_u64(pixel_seed(base, pixel_index))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
