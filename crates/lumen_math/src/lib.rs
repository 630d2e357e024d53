// Re-export glam for convenience
pub use glam;

/// Double-precision vector used for points, directions, and colors.
pub type Vec3 = glam::DVec3;

// Lumen math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;
