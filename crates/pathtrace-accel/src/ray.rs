//! Ray representation and the per-query hit record.

use pathtrace_math::{Point3, Vec3};

use crate::material::MaterialHandle;

/// A ray in 3D space defined by origin and direction.
///
/// The direction is stored as given. It does not need to be unit length,
/// and every `t` reported by a query is measured in units of it.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray.
    pub direction: Vec3,
    /// Precomputed reciprocal of direction components for slab tests.
    /// Zero components become signed infinities.
    inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let inv_direction = Vec3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z);
        Self {
            origin,
            direction,
            inv_direction,
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// Reciprocal of the direction, componentwise.
    #[inline]
    pub fn inv_direction(&self) -> &Vec3 {
        &self.inv_direction
    }
}

/// Result of a successful ray-primitive query.
///
/// Built fresh for every query and handed to the shading step; the
/// acceleration structure never keeps one.
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// 3D intersection point.
    pub point: Point3,
    /// Unit surface normal, oriented against the incoming ray.
    pub normal: Vec3,
    /// Material of the primitive that was hit, copied verbatim.
    pub material: MaterialHandle,
    /// Parameter along the ray where the intersection occurs.
    pub t: f64,
    /// `true` if the ray hit the outward-facing side of the surface.
    pub front_face: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let p = ray.at(5.0);
        assert!((p.x - 5.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }

    #[test]
    fn test_ray_keeps_direction_magnitude() {
        let ray = Ray::new(Point3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 2.0));
        let p = ray.at(1.5);
        assert!((p.z - 4.0).abs() < 1e-12);
        assert!((ray.direction.norm() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_inv_direction_zero_component() {
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, -0.0, 4.0));
        let inv = ray.inv_direction();
        assert_eq!(inv.x, f64::INFINITY);
        assert_eq!(inv.y, f64::NEG_INFINITY);
        assert!((inv.z - 0.25).abs() < 1e-12);
    }
}
