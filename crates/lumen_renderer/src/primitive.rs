//! Closed set of scene primitives.

use std::fmt;

use crate::{
    hittable::{Hittable, SurfaceHit},
    MaterialId, Ray, Rect, Sphere,
};
use lumen_math::Interval;

/// Any primitive the tracer can intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Rect(Rect),
}

impl Primitive {
    /// Handle of the material this primitive is shaded with.
    pub fn material(&self) -> MaterialId {
        match self {
            Primitive::Sphere(sphere) => sphere.material,
            Primitive::Rect(rect) => rect.material,
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
            Primitive::Rect(rect) => rect.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Rect> for Primitive {
    fn from(rect: Rect) -> Self {
        Primitive::Rect(rect)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Sphere(s) => write!(
                f,
                "sphere center=({:.3},{:.3},{:.3}) radius={:.3}",
                s.center.x, s.center.y, s.center.z, s.radius
            ),
            Primitive::Rect(r) => {
                let (a, b, k) = r.plane.axis_names();
                write!(
                    f,
                    "{}_rectangle {a}=[{:.3},{:.3}] {b}=[{:.3},{:.3}] {k}={:.3}",
                    r.plane, r.a0, r.a1, r.b0, r.b1, r.k
                )
            }
        }
    }
}
