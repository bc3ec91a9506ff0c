//! Ray-sphere intersection (quadratic equation).

use crate::primitive::Sphere;
use crate::{HitRecord, Ray};

/// Intersect a ray with a sphere.
///
/// Returns the nearer root inside `(t_min, t_max)`, falling back to the
/// farther one, so rays starting inside the sphere report the exit point.
pub fn intersect_sphere(ray: &Ray, sphere: &Sphere, t_min: f64, t_max: f64) -> Option<HitRecord> {
    let oc = ray.origin - sphere.center;
    let d = &ray.direction;

    // Quadratic |oc + t*d|^2 = r^2 with b = 2 * half_b
    let a = d.dot(d);
    let half_b = oc.dot(d);
    let c = oc.dot(&oc) - sphere.radius * sphere.radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();

    let in_range = |t: f64| t > t_min && t < t_max;
    let mut root = (-half_b - sqrt_disc) / a;
    if !in_range(root) {
        root = (-half_b + sqrt_disc) / a;
        if !in_range(root) {
            return None;
        }
    }

    let point = ray.at(root);
    let outward = (point - sphere.center) / sphere.radius;
    let front_face = d.dot(&outward) < 0.0;
    let normal = if front_face { outward } else { -outward };

    Some(HitRecord {
        point,
        normal,
        material: sphere.material.clone(),
        t: root,
        front_face,
    })
}
