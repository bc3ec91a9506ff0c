//! Ray-triangle intersection (Möller–Trumbore).

use pathtrace_math::Tolerance;

use crate::primitive::Triangle;
use crate::{HitRecord, Ray};

/// Intersect a ray with a triangle.
///
/// Rays whose determinant falls under [`Tolerance::parallel`] are treated
/// as parallel and miss.
pub fn intersect_triangle(
    ray: &Ray,
    triangle: &Triangle,
    t_min: f64,
    t_max: f64,
) -> Option<HitRecord> {
    let [v0, v1, v2] = &triangle.vertices;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(&edge2);
    let a = edge1.dot(&h);
    if Tolerance::DEFAULT.is_parallel(a) {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * ray.direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    if t <= t_min || t >= t_max {
        return None;
    }

    let front_face = ray.direction.dot(&triangle.normal) < 0.0;
    let normal = if front_face {
        triangle.normal
    } else {
        -triangle.normal
    };

    Some(HitRecord {
        point: ray.at(t),
        normal,
        material: triangle.material.clone(),
        t,
        front_face,
    })
}
