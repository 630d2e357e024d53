//! Hittable trait and hit records for ray-object intersection.

use crate::{Material, Ray};
use lumen_math::{Interval, Vec3};

/// Geometric result of an intersection test, before the material is
/// resolved against the scene's materials table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit normal (not flipped towards the ray)
    pub normal: Vec3,
}

/// Record of the closest ray-scene intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    pub t: f64,
    pub p: Vec3,
    pub normal: Vec3,
    /// Material of the primitive that was hit, borrowed from the scene
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Attach a material to a geometric hit.
    pub fn new(hit: SurfaceHit, material: &'a Material) -> Self {
        Self {
            t: hit.t,
            p: hit.p,
            normal: hit.normal,
            material,
        }
    }
}

/// Trait for geometry that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns the nearest accepted intersection, or `None`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit>;
}
