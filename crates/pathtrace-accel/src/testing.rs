//! Shared helpers for unit tests.

use std::sync::Arc;

use rand::RngCore;

use crate::material::{Material, MaterialHandle, Scatter};
use crate::primitive::{Hittable, Primitive};
use crate::{HitRecord, PrimitiveList, Ray};

/// A material that absorbs every ray.
#[derive(Debug)]
pub(crate) struct Absorb;

impl Material for Absorb {
    fn scatter(&self, _ray_in: &Ray, _hit: &HitRecord, _rng: &mut dyn RngCore) -> Option<Scatter> {
        None
    }
}

/// A fresh handle; each call yields a distinct allocation for `Arc::ptr_eq` checks.
pub(crate) fn absorb() -> MaterialHandle {
    Arc::new(Absorb)
}

/// Nearest hit by linear scan.
pub(crate) fn brute_force(
    primitives: &[Primitive],
    ray: &Ray,
    t_min: f64,
    t_max: f64,
) -> Option<HitRecord> {
    PrimitiveList::from(primitives.to_vec()).hit(ray, t_min, t_max)
}
