//! Linear-scan primitive collection.
//!
//! Tests every primitive for every ray. Useful for tiny scenes and as the
//! reference answer the BVH must agree with.

use pathtrace_math::Point3;

use crate::primitive::{Hittable, Primitive};
use crate::{Aabb, HitRecord, Ray};

/// A flat list of primitives queried by brute force.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveList {
    primitives: Vec<Primitive>,
}

impl PrimitiveList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive.
    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Remove every primitive.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// `true` if the list holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in insertion order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

impl From<Vec<Primitive>> for PrimitiveList {
    fn from(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }
}

impl Hittable for PrimitiveList {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        let mut closest = None;
        let mut closest_t = t_max;

        for primitive in &self.primitives {
            if let Some(hit) = primitive.hit(ray, t_min, closest_t) {
                closest_t = hit.t;
                closest = Some(hit);
            }
        }

        closest
    }

    /// Mean of the primitive centroids. The origin for an empty list.
    fn centroid(&self) -> Point3 {
        if self.primitives.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .primitives
            .iter()
            .fold(Point3::origin().coords, |acc, p| acc + p.centroid().coords);
        Point3::from(sum / self.primitives.len() as f64)
    }

    fn bounding_box(&self) -> Aabb {
        self.primitives
            .iter()
            .fold(Aabb::empty(), |acc, p| acc.union(&p.bounding_box()))
    }
}
