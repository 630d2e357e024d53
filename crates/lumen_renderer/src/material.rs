//! Surface scattering models.

use std::fmt;

use crate::{hittable::HitRecord, sampling, Ray};
use lumen_math::Vec3;
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Attenuation and outgoing ray produced by a scattering event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// A surface material. Owned by the scene and shared by handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Color },
    /// Specular reflector; `fuzz` in [0, 1] perturbs the mirror direction.
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive material such as glass.
    Dielectric { refractive_index: f64 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a metal. `fuzz` must lie in [0, 1]; 0 is a perfect mirror.
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal { albedo, fuzz }
    }

    /// Create a dielectric (1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn dielectric(refractive_index: f64) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and scattered ray, or `None` if the ray is
    /// absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => {
                let direction = rec.normal + sampling::random_in_unit_sphere(rng);
                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * sampling::random_in_unit_sphere(rng);

                // Fuzz can push the ray below the surface; treat that as absorbed
                if direction.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, direction),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric { refractive_index } => {
                let direction =
                    dielectric_direction(ray_in.direction(), rec.normal, refractive_index, rng);
                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::Lambertian { albedo } => {
                write!(f, "lambertian(albedo=({:.3},{:.3},{:.3}))", albedo.x, albedo.y, albedo.z)
            }
            Material::Metal { albedo, fuzz } => write!(
                f,
                "metal(albedo=({:.3},{:.3},{:.3}), fuzz={:.3})",
                albedo.x, albedo.y, albedo.z, fuzz
            ),
            Material::Dielectric { refractive_index } => {
                write!(f, "dielectric(refractive_index={refractive_index:.3})")
            }
        }
    }
}

/// Outgoing direction for a dielectric, choosing between reflection and
/// refraction.
///
/// `normal` is the outward normal; whether the ray is entering or leaving is
/// read from the sign of `direction · normal`.
fn dielectric_direction(
    direction: Vec3,
    normal: Vec3,
    refractive_index: f64,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let reflected = reflect(direction, normal);
    let d_dot_n = direction.dot(normal);

    let (facing_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
        // Leaving the material
        (
            -normal,
            refractive_index,
            refractive_index * d_dot_n / direction.length(),
        )
    } else {
        (normal, 1.0 / refractive_index, -d_dot_n / direction.length())
    };

    match refract(direction, facing_normal, ni_over_nt) {
        Some(refracted) => {
            if sampling::gen_f64(rng) < schlick(cosine, refractive_index) {
                reflected
            } else {
                refracted
            }
        }
        // Total internal reflection
        None => reflected,
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` facing against `v`.
///
/// Returns `None` on total internal reflection.
pub fn refract(v: Vec3, n: Vec3, ni_over_nt: f64) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - dt * n) - discriminant.sqrt() * n)
    } else {
        None
    }
}

/// Schlick's approximation for reflectance.
pub fn schlick(cosine: f64, refractive_index: f64) -> f64 {
    let r0 = ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
