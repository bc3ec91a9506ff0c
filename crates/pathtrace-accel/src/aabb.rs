//! Axis-aligned bounding boxes and the ray-slab test.

use pathtrace_math::{point_max, point_min, Point3};

use crate::Ray;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing all of `points`.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include_point(p);
        }
        aabb
    }

    /// `true` if no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min = point_min(&self.min, p);
        self.max = point_max(&self.max, p);
    }

    /// Expand this AABB to include another box.
    pub fn grow(&mut self, other: &Aabb) {
        self.min = point_min(&self.min, &other.min);
        self.max = point_max(&self.max, &other.max);
    }

    /// Union of two boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        out.grow(other);
        out
    }

    /// `true` if `other` lies entirely inside `self` (boundaries included).
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.min.z <= other.min.z
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
            && self.max.z >= other.max.z
    }

    /// Half the surface area: `ex·ey + ey·ez + ez·ex`.
    ///
    /// Only meaningful relative to other boxes; the SAH compares these
    /// against each other so the missing factor of 2 cancels out.
    pub fn area(&self) -> f64 {
        let e = self.max - self.min;
        e.x * e.y + e.y * e.z + e.z * e.x
    }

    /// Slab test against a ray.
    ///
    /// Returns the entry parameter `t0` if the ray's line crosses the box,
    /// the exit lies at or ahead of the origin, and `t0 < max_t`. Zero
    /// direction components are handled through the ray's infinite
    /// reciprocals.
    #[inline]
    pub fn intersection_time(&self, ray: &Ray, max_t: f64) -> Option<f64> {
        let inv = ray.inv_direction();
        let mut t0 = f64::NEG_INFINITY;
        let mut t1 = f64::INFINITY;

        for axis in 0..3 {
            let ta = (self.min[axis] - ray.origin[axis]) * inv[axis];
            let tb = (self.max[axis] - ray.origin[axis]) * inv[axis];
            // 0 * inf: a ray parallel to this slab starting on one of its
            // planes, which leaves the axis unconstrained.
            if ta.is_nan() || tb.is_nan() {
                continue;
            }
            t0 = t0.max(ta.min(tb));
            t1 = t1.min(ta.max(tb));
        }

        if t1 >= t0 && t1 >= 0.0 && t0 < max_t {
            Some(t0)
        } else {
            None
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pathtrace_math::Vec3;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_empty_is_inverted() {
        let aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert!(aabb.min.x > aabb.max.x);
    }

    #[test]
    fn test_union_restores_ordering() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(-2.0, 0.5, 0.5), Point3::new(0.5, 3.0, 0.75));
        let u = Aabb::empty().union(&a).union(&b);
        assert!(!u.is_empty());
        assert_eq!(u.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(u.max, Point3::new(1.0, 3.0, 1.0));
        assert!(u.contains(&a));
        assert!(u.contains(&b));
        assert!(!a.contains(&u));
    }

    #[test]
    fn test_area() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0));
        // 1*2 + 2*3 + 3*1
        assert_relative_eq!(aabb.area(), 11.0);
        let flat = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 0.0));
        assert_relative_eq!(flat.area(), 4.0);
    }

    #[test]
    fn test_ray_aabb_hit() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        let t = unit_box().intersection_time(&ray, f64::INFINITY);
        assert_relative_eq!(t.unwrap(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_ray_aabb_miss() {
        let ray = Ray::new(Point3::new(-5.0, 5.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(unit_box().intersection_time(&ray, f64::INFINITY).is_none());
    }

    #[test]
    fn test_ray_aabb_behind() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0));
        assert!(unit_box().intersection_time(&ray, f64::INFINITY).is_none());
    }

    #[test]
    fn test_ray_inside_aabb_reports_negative_entry() {
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        let t = unit_box().intersection_time(&ray, f64::INFINITY).unwrap();
        assert_relative_eq!(t, -0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_ray_aabb_beyond_closest() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(1.0, 0.0, 0.0));
        assert!(unit_box().intersection_time(&ray, 5.0).is_none());
        assert!(unit_box().intersection_time(&ray, 5.5).is_some());
    }

    #[test]
    fn test_ray_aabb_diagonal() {
        let ray = Ray::new(Point3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let t = unit_box().intersection_time(&ray, f64::INFINITY).unwrap();
        assert_relative_eq!(t, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_unnormalized_direction_scales_t() {
        let ray = Ray::new(Point3::new(-5.0, 0.5, 0.5), Vec3::new(2.0, 0.0, 0.0));
        let t = unit_box().intersection_time(&ray, f64::INFINITY).unwrap();
        assert_relative_eq!(t, 2.5, epsilon = 1e-10);
    }

    #[test]
    fn test_parallel_ray_on_face_hits() {
        // x = 0 is the min face, y = 1 the max face; both direction lanes are zero
        let ray = Ray::new(Point3::new(0.0, 1.0, -2.0), Vec3::new(0.0, 0.0, 1.0));
        let t = unit_box().intersection_time(&ray, f64::INFINITY).unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-10);

        let ray = Ray::new(Point3::new(1.0, 0.5, 3.0), Vec3::new(-0.0, 0.0, -1.0));
        let t = unit_box().intersection_time(&ray, f64::INFINITY).unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_parallel_ray_on_flat_box_hits() {
        // Bounds of a triangle lying in z = 0, entered along its y = -1 edge
        let flat = Aabb::new(Point3::new(-1.0, -1.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        let ray = Ray::new(Point3::new(0.0, -1.0, -1.0), Vec3::new(0.0, 0.0, 1.0));
        let t = flat.intersection_time(&ray, f64::INFINITY).unwrap();
        assert_relative_eq!(t, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_parallel_ray_beside_face_misses() {
        let ray = Ray::new(Point3::new(-1e-9, 0.5, -2.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(unit_box().intersection_time(&ray, f64::INFINITY).is_none());
    }
}
