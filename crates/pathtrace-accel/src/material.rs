//! Material handle carried by primitives and hit records.
//!
//! The acceleration structure never looks inside a material. It stores
//! the shared handle on each primitive and copies it into the hit record
//! so the shading step can call [`Material::scatter`].

use std::fmt::Debug;
use std::sync::Arc;

use pathtrace_math::Color;
use rand::RngCore;

use crate::{HitRecord, Ray};

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Color filter applied to light arriving along `scattered`.
    pub attenuation: Color,
    /// The continuation ray.
    pub scattered: Ray,
}

/// A surface response model, implemented by the shading layer.
///
/// The random source is passed in explicitly so renders and tests can be
/// reproduced from a seed.
pub trait Material: Debug + Send + Sync {
    /// Scatter `ray_in` at `hit`, or return `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, hit: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter>;
}

/// Shared, read-only reference to a material.
pub type MaterialHandle = Arc<dyn Material>;
