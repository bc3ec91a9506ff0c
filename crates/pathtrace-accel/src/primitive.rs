//! Geometric primitives and the capability set shared by everything that
//! can be hit by a ray.

use pathtrace_math::{Point3, Vec3};

use crate::intersect::{intersect_sphere, intersect_triangle};
use crate::material::MaterialHandle;
use crate::{Aabb, HitRecord, Ray};

/// Something a ray can hit.
pub trait Hittable {
    /// Nearest hit with `t` strictly inside `(t_min, t_max)`, if any.
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord>;

    /// Representative point used to decide which side of a split it falls on.
    fn centroid(&self) -> Point3;

    /// Axis-aligned box enclosing the whole object.
    fn bounding_box(&self) -> Aabb;
}

/// A sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point.
    pub center: Point3,
    /// Radius.
    pub radius: f64,
    /// Surface material.
    pub material: MaterialHandle,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Point3, radius: f64, material: MaterialHandle) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        intersect_sphere(ray, self, t_min, t_max)
    }

    fn centroid(&self) -> Point3 {
        self.center
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vec3::repeat(self.radius);
        Aabb::new(self.center - r, self.center + r)
    }
}

/// A triangle with precomputed normal and centroid.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Corner positions.
    pub vertices: [Point3; 3],
    /// Unit normal, `normalize((v2 - v0) × (v1 - v0))`. Zero for degenerate triangles.
    pub normal: Vec3,
    /// Vertex average.
    pub centroid: Point3,
    /// Surface material.
    pub material: MaterialHandle,
}

impl Triangle {
    /// Create a triangle from three corners.
    pub fn new(v0: Point3, v1: Point3, v2: Point3, material: MaterialHandle) -> Self {
        let normal = (v2 - v0)
            .cross(&(v1 - v0))
            .try_normalize(0.0)
            .unwrap_or_else(Vec3::zeros);
        let centroid = Point3::from((v0.coords + v1.coords + v2.coords) / 3.0);
        Self {
            vertices: [v0, v1, v2],
            normal,
            centroid,
            material,
        }
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        intersect_triangle(ray, self, t_min, t_max)
    }

    fn centroid(&self) -> Point3 {
        self.centroid
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }
}

/// A primitive stored by the acceleration structure.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// A sphere.
    Sphere(Sphere),
    /// A triangle.
    Triangle(Triangle),
}

impl Primitive {
    /// Material of this primitive.
    pub fn material(&self) -> &MaterialHandle {
        match self {
            Primitive::Sphere(s) => &s.material,
            Primitive::Triangle(t) => &t.material,
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, t_min, t_max),
            Primitive::Triangle(t) => t.hit(ray, t_min, t_max),
        }
    }

    fn centroid(&self) -> Point3 {
        match self {
            Primitive::Sphere(s) => s.centroid(),
            Primitive::Triangle(t) => t.centroid(),
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Primitive::Sphere(s) => s.bounding_box(),
            Primitive::Triangle(t) => t.bounding_box(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}
