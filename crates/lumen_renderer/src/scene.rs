//! Scene storage: a materials table and the primitives that reference it.

use thiserror::Error;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Plane, Primitive, Ray,
};
use lumen_math::Interval;

/// Errors raised while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Material handle {index} is out of range ({count} materials)")]
    UnknownMaterial { index: usize, count: usize },

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("Inverted bounds on {0} rectangle")]
    InvertedBounds(Plane),

    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),

    #[error("Metal fuzz must lie in [0, 1], got {0}")]
    InvalidFuzz(f64),

    #[error("Refractive index must be positive, got {0}")]
    InvalidRefractiveIndex(f64),
}

/// Stable handle into a scene's materials table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    /// Build a handle from a raw table index. The handle is checked when the
    /// primitive using it is added to a scene.
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A collection of primitives and the materials they share.
///
/// Primitives are kept in insertion order; the scene is read-only during a
/// render.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material and return its handle.
    pub fn add_material(&mut self, material: Material) -> Result<MaterialId, SceneError> {
        validate_material(&material)?;
        self.materials.push(material);
        Ok(MaterialId(self.materials.len() - 1))
    }

    /// Add a primitive. Its material handle must come from this scene.
    pub fn add(&mut self, primitive: impl Into<Primitive>) -> Result<(), SceneError> {
        let primitive = primitive.into();
        let index = primitive.material().index();
        if index >= self.materials.len() {
            return Err(SceneError::UnknownMaterial {
                index,
                count: self.materials.len(),
            });
        }
        validate_geometry(&primitive)?;
        self.primitives.push(primitive);
        Ok(())
    }

    /// Look up a material by handle.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Find the closest hit strictly inside `ray_t`.
    ///
    /// Scans every primitive, shrinking the upper bound to the closest hit
    /// found so far. Ties keep the earlier primitive.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for primitive in &self.primitives {
            if let Some(hit) = primitive.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                // Handles were checked in `add`
                let material = &self.materials[primitive.material().index()];
                closest = Some(HitRecord::new(hit, material));
            }
        }

        closest
    }

    /// Log every primitive and its material at debug level.
    pub fn describe(&self) {
        log::debug!(
            "Scene: {} primitives, {} materials",
            self.primitives.len(),
            self.materials.len()
        );
        for (i, primitive) in self.primitives.iter().enumerate() {
            let material = &self.materials[primitive.material().index()];
            log::debug!("  [{i}] {primitive} material={material}");
        }
    }
}

fn validate_material(material: &Material) -> Result<(), SceneError> {
    match *material {
        Material::Lambertian { albedo } if !albedo.is_finite() => {
            Err(SceneError::NonFinite("lambertian albedo"))
        }
        Material::Metal { albedo, .. } if !albedo.is_finite() => {
            Err(SceneError::NonFinite("metal albedo"))
        }
        Material::Metal { fuzz, .. } if !(0.0..=1.0).contains(&fuzz) => {
            Err(SceneError::InvalidFuzz(fuzz))
        }
        Material::Dielectric { refractive_index }
            if !(refractive_index > 0.0 && refractive_index.is_finite()) =>
        {
            Err(SceneError::InvalidRefractiveIndex(refractive_index))
        }
        _ => Ok(()),
    }
}

fn validate_geometry(primitive: &Primitive) -> Result<(), SceneError> {
    match primitive {
        Primitive::Sphere(sphere) => {
            if !sphere.center.is_finite() {
                return Err(SceneError::NonFinite("sphere center"));
            }
            if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                return Err(SceneError::InvalidRadius(sphere.radius));
            }
        }
        Primitive::Rect(rect) => {
            if ![rect.a0, rect.a1, rect.b0, rect.b1, rect.k].iter().all(|v| v.is_finite()) {
                return Err(SceneError::NonFinite("rectangle bounds"));
            }
            if rect.a0 > rect.a1 || rect.b0 > rect.b1 {
                return Err(SceneError::InvertedBounds(rect.plane));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Rect, Sphere};
    use lumen_math::Vec3;

    fn ray_t() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_closest_hit_regardless_of_order() {
        let mut scene = Scene::new();
        let far = scene.add_material(Material::lambertian(Color::ONE)).unwrap();
        let near = scene.add_material(Material::dielectric(1.5)).unwrap();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, far)).unwrap();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, near)).unwrap();
        scene.add(Rect::xy((-5.0, 5.0), (-5.0, 5.0), -20.0, far)).unwrap();

        let hit = scene.hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), ray_t()).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-12);
        assert_eq!(*hit.material, Material::dielectric(1.5));
    }

    #[test]
    fn test_shared_material() {
        let mut scene = Scene::new();
        let glass = scene.add_material(Material::dielectric(1.5)).unwrap();
        scene.add(Sphere::new(Vec3::new(-2.0, 0.0, -3.0), 1.0, glass)).unwrap();
        scene.add(Sphere::new(Vec3::new(2.0, 0.0, -3.0), 1.0, glass)).unwrap();

        let left = scene.hit(&Ray::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::NEG_Z), ray_t()).unwrap();
        let right = scene.hit(&Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z), ray_t()).unwrap();
        assert!(std::ptr::eq(left.material, right.material));
        assert_eq!(scene.materials().len(), 1);
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.hit(&Ray::new(Vec3::ZERO, Vec3::Y), ray_t()).is_none());
    }

    #[test]
    fn test_unknown_material_rejected() {
        let mut scene = Scene::new();
        let err = scene
            .add(Sphere::new(Vec3::ZERO, 1.0, MaterialId::from_index(0)))
            .unwrap_err();
        assert_eq!(err, SceneError::UnknownMaterial { index: 0, count: 0 });
        assert!(scene.is_empty());
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut scene = Scene::new();
        let m = scene.add_material(Material::lambertian(Color::ONE)).unwrap();

        assert_eq!(
            scene.add(Sphere::new(Vec3::ZERO, 0.0, m)),
            Err(SceneError::InvalidRadius(0.0))
        );
        assert_eq!(
            scene.add(Rect::xz((1.0, -1.0), (0.0, 1.0), 0.0, m)),
            Err(SceneError::InvertedBounds(Plane::Xz))
        );
        assert!(scene.add(Rect::xz((-1.0, 1.0), (0.0, 0.0), 0.0, m)).is_ok());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_invalid_material_rejected() {
        let mut scene = Scene::new();
        assert_eq!(
            scene.add_material(Material::metal(Color::ONE, 1.5)),
            Err(SceneError::InvalidFuzz(1.5))
        );
        assert_eq!(
            scene.add_material(Material::dielectric(0.0)),
            Err(SceneError::InvalidRefractiveIndex(0.0))
        );
        assert!(scene.add_material(Material::lambertian(Color::splat(f64::NAN))).is_err());
        assert!(scene.materials().is_empty());
    }

    #[test]
    fn test_material_lookup() {
        let mut scene = Scene::new();
        let id = scene.add_material(Material::dielectric(2.0)).unwrap();
        assert_eq!(scene.material(id), Some(&Material::dielectric(2.0)));
        assert_eq!(scene.material(MaterialId::from_index(7)), None);
    }
}
