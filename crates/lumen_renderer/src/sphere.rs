//! Sphere primitive for ray tracing.

use crate::{
    hittable::{Hittable, SurfaceHit},
    MaterialId, Ray,
};
use lumen_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub material: MaterialId,
}

impl Sphere {
    /// Create a new sphere. The radius is checked when the sphere is added
    /// to a scene.
    pub fn new(center: Vec3, radius: f64, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    fn surface_hit(&self, ray: &Ray, t: f64) -> SurfaceHit {
        let p = ray.at(t);
        SurfaceHit {
            t,
            p,
            normal: (p - self.center) / self.radius,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        // A zero-length direction gives a zero discriminant; NaN fails too.
        let discriminant = b * b - a * c;
        if !(discriminant > 0.0) {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first, then far root
        let near = (-b - sqrtd) / a;
        if ray_t.surrounds(near) {
            return Some(self.surface_hit(ray, near));
        }
        let far = (-b + sqrtd) / a;
        if ray_t.surrounds(far) {
            return Some(self.surface_hit(ray, far));
        }
        None
    }
}
