#![warn(missing_docs)]

//! Nearest-hit ray queries over spheres and triangles for a path tracer.
//!
//! Primitives are collected into a scene, a bounding volume hierarchy is
//! built over them once using the Surface Area Heuristic, and the scene is
//! then queried read-only for the closest intersection along each ray.
//!
//! # Architecture
//!
//! - [`Ray`] - Ray representation with origin and direction
//! - [`HitRecord`] - Nearest intersection handed to the shading step
//! - [`Aabb`] - Bounding boxes and the slab test
//! - [`Primitive`] - Sphere/triangle variants behind the [`Hittable`] trait
//! - [`bvh`] - SAH construction and stack-based traversal
//! - [`Scene`] - Build-once, query-many façade over the BVH or a linear list
//!
//! # Example
//!
//! ```ignore
//! use pathtrace_accel::{BvhScene, Ray, Scene, Sphere};
//! use pathtrace_math::{Point3, Vec3};
//!
//! let mut scene = BvhScene::new();
//! scene.add(Sphere::new(Point3::origin(), 0.5, material).into())?;
//! scene.build()?;
//!
//! let ray = Ray::new(Point3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0));
//! let hit = scene.hit(&ray, 0.001, f64::INFINITY)?;
//! ```

mod aabb;
pub mod bvh;
mod error;
pub mod intersect;
mod list;
mod material;
mod primitive;
mod ray;
mod scene;
mod settings;

#[cfg(test)]
mod testing;

pub use aabb::Aabb;
pub use bvh::{Bvh, BvhNode};
pub use error::{AccelError, Result};
pub use list::PrimitiveList;
pub use material::{Material, MaterialHandle, Scatter};
pub use primitive::{Hittable, Primitive, Sphere, Triangle};
pub use ray::{HitRecord, Ray};
pub use scene::{BvhScene, ListScene, Scene};
pub use settings::{BvhSettings, SplitStrategy};
