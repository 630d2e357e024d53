//! Lumen renderer - CPU Monte Carlo ray tracing
//!
//! A recursive ray tracer for spheres and axis-aligned rectangles with
//! diffuse, metallic, and dielectric materials, lit by a sky gradient and
//! viewed through a thin-lens camera.

mod bucket;
mod camera;
mod cancel;
mod hittable;
mod material;
mod primitive;
mod rect;
mod renderer;
pub mod sampling;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraSettings};
pub use cancel::{CancelToken, RenderControl};
pub use hittable::{HitRecord, Hittable, SurfaceHit};
pub use material::{reflect, refract, schlick, Color, Material, ScatterResult};
pub use primitive::Primitive;
pub use rect::{Plane, Rect};
pub use renderer::{
    encode_rgb, linear_to_gamma, ray_color, render, render_pixel, render_sequential,
    render_with_control, sky_color, ImageBuffer, RenderConfig, RenderError, T_MIN,
};
pub use scene::{MaterialId, Scene, SceneError};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
