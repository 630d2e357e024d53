//! Axis-aligned rectangles.
//!
//! Each rectangle lies in one coordinate plane at a fixed offset `k`, bounded
//! on the two remaining axes.

use std::fmt;

use crate::{
    hittable::{Hittable, SurfaceHit},
    MaterialId, Ray,
};
use lumen_math::{Interval, Vec3};

/// The coordinate plane a rectangle lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Fixed z, bounded in x and y.
    Xy,
    /// Fixed y, bounded in x and z.
    Xz,
    /// Fixed x, bounded in y and z.
    Yz,
}

impl Plane {
    /// Component indices as `(first free axis, second free axis, fixed axis)`.
    #[inline]
    pub fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::Xy => (0, 1, 2),
            Plane::Xz => (0, 2, 1),
            Plane::Yz => (1, 2, 0),
        }
    }

    /// Axis names, for descriptions.
    pub fn axis_names(self) -> (char, char, char) {
        match self {
            Plane::Xy => ('x', 'y', 'z'),
            Plane::Xz => ('x', 'z', 'y'),
            Plane::Yz => ('y', 'z', 'x'),
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, _) = self.axis_names();
        write!(f, "{a}{b}")
    }
}

/// A rectangle in one of the coordinate planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub plane: Plane,
    /// Bounds on the first free axis
    pub a0: f64,
    pub a1: f64,
    /// Bounds on the second free axis
    pub b0: f64,
    pub b1: f64,
    /// Offset along the fixed axis
    pub k: f64,
    pub material: MaterialId,
}

impl Rect {
    /// Create a rectangle. Bounds must satisfy `a0 <= a1` and `b0 <= b1`;
    /// this is checked when the rectangle is added to a scene.
    pub fn new(
        plane: Plane,
        (a0, a1): (f64, f64),
        (b0, b1): (f64, f64),
        k: f64,
        material: MaterialId,
    ) -> Self {
        Self {
            plane,
            a0,
            a1,
            b0,
            b1,
            k,
            material,
        }
    }

    pub fn xy(x: (f64, f64), y: (f64, f64), z: f64, material: MaterialId) -> Self {
        Self::new(Plane::Xy, x, y, z, material)
    }

    pub fn xz(x: (f64, f64), z: (f64, f64), y: f64, material: MaterialId) -> Self {
        Self::new(Plane::Xz, x, z, y, material)
    }

    pub fn yz(y: (f64, f64), z: (f64, f64), x: f64, material: MaterialId) -> Self {
        Self::new(Plane::Yz, y, z, x, material)
    }

    /// Surface normal, constant over the rectangle.
    ///
    /// YZ rectangles face the x=0 plane: the sample scenes put the camera
    /// there and use these rectangles as side walls.
    pub fn normal(&self) -> Vec3 {
        match self.plane {
            Plane::Xy => Vec3::Z,
            Plane::Xz => Vec3::Y,
            Plane::Yz => {
                if self.k > 0.0 {
                    Vec3::NEG_X
                } else {
                    Vec3::X
                }
            }
        }
    }
}

impl Hittable for Rect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let (a, b, fixed) = self.plane.axes();

        // Parallel rays never cross the plane
        let direction_k = ray.direction()[fixed];
        if direction_k == 0.0 {
            return None;
        }

        let t = (self.k - ray.origin()[fixed]) / direction_k;
        if !ray_t.surrounds(t) {
            return None;
        }

        let p = ray.at(t);
        if p[a] < self.a0 || p[a] > self.a1 || p[b] < self.b0 || p[b] > self.b1 {
            return None;
        }

        Some(SurfaceHit {
            t,
            p,
            normal: self.normal(),
        })
    }
}
