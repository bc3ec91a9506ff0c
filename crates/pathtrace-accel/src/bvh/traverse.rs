//! Stack-based nearest-hit traversal.

use smallvec::SmallVec;

use crate::primitive::Hittable;
use crate::{HitRecord, Ray};

use super::Bvh;

/// Inline capacity of the traversal stack.
///
/// Trees built by the SAH builder over realistic scenes stay well below
/// this depth. Deeper trees spill the stack to the heap.
pub const TRAVERSAL_STACK_SIZE: usize = 64;

/// Entry time used to order children; `None` sorts last.
#[inline]
fn entry_time(t: Option<f64>) -> f64 {
    t.unwrap_or(f64::INFINITY)
}

impl Bvh {
    /// Find the nearest hit with `t` strictly inside `(t_min, t_max)`.
    ///
    /// The nearer child is always visited first and `t_max` shrinks with
    /// every hit, so far subtrees are usually rejected by their box test.
    pub fn trace_closest(&self, ray: &Ray, t_min: f64, mut t_max: f64) -> Option<HitRecord> {
        // The empty root has count == 0 but no children to visit.
        if self.primitives.is_empty() {
            return None;
        }

        let mut stack: SmallVec<[usize; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        let mut closest = None;
        let mut node = &self.nodes[0];

        loop {
            if node.is_leaf() {
                for &idx in &self.indices[node.primitive_range()] {
                    if let Some(hit) = self.primitives[idx].hit(ray, t_min, t_max) {
                        t_max = hit.t;
                        closest = Some(hit);
                    }
                }
            } else {
                let mut near = node.left_first;
                let mut far = near + 1;
                let mut near_t = self.nodes[near].aabb.intersection_time(ray, t_max);
                let mut far_t = self.nodes[far].aabb.intersection_time(ray, t_max);

                if entry_time(near_t) > entry_time(far_t) {
                    std::mem::swap(&mut near, &mut far);
                    std::mem::swap(&mut near_t, &mut far_t);
                }

                if near_t.is_some() {
                    if far_t.is_some() {
                        stack.push(far);
                    }
                    node = &self.nodes[near];
                    continue;
                }
            }

            let Some(next) = stack.pop() else {
                break;
            };
            node = &self.nodes[next];
        }

        closest
    }
}
