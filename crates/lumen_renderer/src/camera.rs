//! Thin-lens camera for ray generation.

use crate::{sampling, Ray};
use lumen_math::Vec3;
use rand::RngCore;

/// Parameters a camera is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    // Camera positioning
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f64,       // Vertical field of view in degrees
    pub aspect: f64,     // Image width / height
    pub aperture: f64,   // Lens diameter; 0 disables defocus blur
    pub focus_dist: f64, // Distance from camera to plane of perfect focus
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 75.0,
            aspect: 1.0,
            aperture: 0.01,
            focus_dist: 10.0,
        }
    }
}

impl CameraSettings {
    /// Create camera settings with default lens values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the aspect ratio from an image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.aspect = f64::from(width) / f64::from(height);
        self
    }

    /// Derive the camera.
    pub fn build(&self) -> Camera {
        Camera::new(self)
    }
}

/// Camera for generating rays into the scene. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    pub fn new(settings: &CameraSettings) -> Self {
        let theta = settings.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = settings.aspect * half_height;

        // Calculate camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        let focus = settings.focus_dist;
        let origin = settings.look_from;
        let lower_left_corner =
            origin - half_width * focus * u - half_height * focus * v - focus * w;

        Self {
            origin,
            lower_left_corner,
            horizontal: 2.0 * half_width * focus * u,
            vertical: 2.0 * half_height * focus * v,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        }
    }

    /// Generate a ray through normalized image coordinates `(s, t)`, with
    /// `(0, 0)` at the bottom left.
    ///
    /// The origin is jittered across the lens so only the focus plane is sharp.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * sampling::random_in_unit_sphere(rng);
        let offset = rd.x * self.u + rd.y * self.v;

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Orthonormal basis `(u, v, w)`; `w` points from the target back to the camera.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f64 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pinhole() -> Camera {
        CameraSettings::new()
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .with_resolution(100, 100)
            .build()
    }

    #[test]
    fn test_camera_basis() {
        let camera = CameraSettings::new()
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .build();

        let (u, v, w) = camera.basis();
        assert!((w - Vec3::Z).length() < 1e-12);
        assert!((u - Vec3::X).length() < 1e-12);
        assert!((v - Vec3::Y).length() < 1e-12);
        assert!((camera.lens_radius() - 0.005).abs() < 1e-15);
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = pinhole();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction().normalize() - Vec3::NEG_Z).length() < 1e-12);
    }

    #[test]
    fn test_corner_rays() {
        let camera = pinhole();
        let mut rng = StdRng::seed_from_u64(42);

        // 90 degree fov at focus distance 1 spans [-1, 1] on both axes
        let ray = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((ray.direction() - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-12);
        let ray = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((ray.direction() - Vec3::new(1.0, 1.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_lens_jitter_stays_in_aperture() {
        let camera = CameraSettings::new()
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(40.0, 2.0, 5.0)
            .build();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            let origin = ray.origin();
            assert_eq!(origin.z, 0.0);
            assert!(origin.truncate().length() < 1.0);
            // All lens samples converge on the focus plane
            let focus_point = ray.at(5.0 / -ray.direction().z);
            assert!((focus_point - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-9);
        }
    }
}
