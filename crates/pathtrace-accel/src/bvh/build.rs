//! SAH construction of the flat node arena.
//!
//! Each node is split at the candidate plane minimizing
//! `left_count * left_area + right_count * right_area`, and only if that
//! beats the cost of leaving it as a leaf (`count * area`).

use pathtrace_math::{Axis, Point3};

use crate::primitive::{Hittable, Primitive};
use crate::settings::SplitStrategy;
use crate::Aabb;

use super::BvhNode;

/// Best split found for a node.
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    axis: Axis,
    pos: f64,
    cost: f64,
}

impl SplitCandidate {
    /// Sentinel meaning "no valid split".
    const NONE: Self = Self {
        axis: Axis::X,
        pos: 0.0,
        cost: f64::INFINITY,
    };
}

/// Single-use construction state.
///
/// Centroid and bounds caches are filled once in [`BvhBuilder::new`] and
/// only read afterwards. The permutation is reordered in place.
pub(super) struct BvhBuilder {
    centroids: Vec<Point3>,
    bounds: Vec<Aabb>,
    indices: Vec<usize>,
    nodes: Vec<BvhNode>,
    nodes_used: usize,
    strategy: SplitStrategy,
}

impl BvhBuilder {
    pub(super) fn new(primitives: &[Primitive], strategy: SplitStrategy) -> Self {
        let n = primitives.len();
        Self {
            centroids: primitives.iter().map(Hittable::centroid).collect(),
            bounds: primitives.iter().map(Hittable::bounding_box).collect(),
            indices: (0..n).collect(),
            // A binary tree over n leaves never needs more than 2n - 1 nodes
            nodes: vec![BvhNode::default(); (2 * n).max(1)],
            nodes_used: 1,
            strategy,
        }
    }

    /// Run the build, returning the node arena and the permutation array.
    pub(super) fn build(mut self) -> (Vec<BvhNode>, Vec<usize>) {
        self.nodes[0] = BvhNode::leaf(0, self.indices.len());
        self.update_bounds(0);
        self.subdivide(0);

        self.nodes.truncate(self.nodes_used);
        (self.nodes, self.indices)
    }

    fn update_bounds(&mut self, node_idx: usize) {
        let mut aabb = Aabb::empty();
        for &idx in &self.indices[self.nodes[node_idx].primitive_range()] {
            aabb.grow(&self.bounds[idx]);
        }
        self.nodes[node_idx].aabb = aabb;
    }

    fn subdivide(&mut self, node_idx: usize) {
        let node = self.nodes[node_idx];
        let count = node.count;
        if count <= 1 {
            return;
        }

        let best = match self.strategy {
            SplitStrategy::Exhaustive => self.find_best_axis(&node),
            SplitStrategy::Binned { bins } => self.find_best_binned(&node, bins),
        };

        let parent_cost = count as f64 * node.aabb.area();
        if best.cost >= parent_cost {
            return;
        }

        let split = self.partition(&node, &best);
        let first = node.left_first;
        let left_count = split - first;
        if left_count == 0 || left_count == count {
            return;
        }

        let left_idx = self.nodes_used;
        let right_idx = left_idx + 1;
        self.nodes_used += 2;

        self.nodes[left_idx] = BvhNode::leaf(first, left_count);
        self.nodes[right_idx] = BvhNode::leaf(split, count - left_count);
        self.nodes[node_idx].left_first = left_idx;
        self.nodes[node_idx].count = 0;

        self.update_bounds(left_idx);
        self.update_bounds(right_idx);
        self.subdivide(left_idx);
        self.subdivide(right_idx);
    }

    /// Try every member centroid on every axis as a split position.
    fn find_best_axis(&self, node: &BvhNode) -> SplitCandidate {
        let mut best = SplitCandidate::NONE;

        for axis in Axis::ALL {
            for &idx in &self.indices[node.primitive_range()] {
                let pos = axis.of(&self.centroids[idx]);
                let cost = self.evaluate_cost(node, axis, pos);
                if cost < best.cost {
                    best = SplitCandidate { axis, pos, cost };
                }
            }
        }

        best
    }

    /// Bucket centroids into `bins` slabs per axis and try the slab boundaries.
    fn find_best_binned(&self, node: &BvhNode, bins: usize) -> SplitCandidate {
        let members = &self.indices[node.primitive_range()];
        let mut best = SplitCandidate::NONE;

        for axis in Axis::ALL {
            let (lo, hi) = members.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), &idx| {
                    let c = axis.of(&self.centroids[idx]);
                    (lo.min(c), hi.max(c))
                },
            );
            let extent = hi - lo;
            if extent <= 0.0 {
                continue;
            }

            let mut bucket_counts = vec![0usize; bins];
            let mut bucket_bounds = vec![Aabb::empty(); bins];
            for &idx in members {
                let c = axis.of(&self.centroids[idx]);
                let b = (((c - lo) / extent) * bins as f64) as usize;
                let b = b.min(bins - 1);
                bucket_counts[b] += 1;
                bucket_bounds[b].grow(&self.bounds[idx]);
            }

            // Suffix sums so each boundary is evaluated in O(1)
            let mut right_counts = vec![0usize; bins];
            let mut right_bounds = vec![Aabb::empty(); bins];
            let mut count = 0;
            let mut aabb = Aabb::empty();
            for b in (1..bins).rev() {
                count += bucket_counts[b];
                aabb.grow(&bucket_bounds[b]);
                right_counts[b] = count;
                right_bounds[b] = aabb;
            }

            let mut left_count = 0;
            let mut left_bounds = Aabb::empty();
            for split in 1..bins {
                left_count += bucket_counts[split - 1];
                left_bounds.grow(&bucket_bounds[split - 1]);

                let cost = split_cost(
                    side_cost(left_count, &left_bounds)
                        + side_cost(right_counts[split], &right_bounds[split]),
                );
                if cost < best.cost {
                    let pos = lo + extent * (split as f64 / bins as f64);
                    best = SplitCandidate { axis, pos, cost };
                }
            }
        }

        best
    }

    /// SAH cost of splitting `node` at `pos` along `axis`.
    fn evaluate_cost(&self, node: &BvhNode, axis: Axis, pos: f64) -> f64 {
        let mut left_box = Aabb::empty();
        let mut right_box = Aabb::empty();
        let mut left_count = 0;
        let mut right_count = 0;

        for &idx in &self.indices[node.primitive_range()] {
            if axis.of(&self.centroids[idx]) < pos {
                left_box.grow(&self.bounds[idx]);
                left_count += 1;
            } else {
                right_box.grow(&self.bounds[idx]);
                right_count += 1;
            }
        }

        split_cost(side_cost(left_count, &left_box) + side_cost(right_count, &right_box))
    }

    /// Reorder the node's slice so entries left of the plane come first.
    ///
    /// Returns the index of the first entry on the right side.
    fn partition(&mut self, node: &BvhNode, best: &SplitCandidate) -> usize {
        let mut left = node.left_first;
        let mut right = left + node.count;

        while left < right {
            if best.axis.of(&self.centroids[self.indices[left]]) < best.pos {
                left += 1;
            } else {
                right -= 1;
                self.indices.swap(left, right);
            }
        }

        left
    }
}

/// Contribution of one side of a split. An empty side costs nothing.
#[inline]
fn side_cost(count: usize, aabb: &Aabb) -> f64 {
    if count == 0 {
        0.0
    } else {
        count as f64 * aabb.area()
    }
}

/// Costs that are not strictly positive can't be compared meaningfully.
#[inline]
fn split_cost(cost: f64) -> f64 {
    if cost > 0.0 {
        cost
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Sphere;
    use crate::testing::absorb;

    fn spheres(centers: &[(f64, f64, f64)]) -> Vec<Primitive> {
        centers
            .iter()
            .map(|&(x, y, z)| Sphere::new(Point3::new(x, y, z), 0.5, absorb()).into())
            .collect()
    }

    #[test]
    fn test_evaluate_cost_counts_sides() {
        let prims = spheres(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0)]);
        let mut builder = BvhBuilder::new(&prims, SplitStrategy::Exhaustive);
        builder.nodes[0] = BvhNode::leaf(0, 2);
        builder.update_bounds(0);
        let node = builder.nodes[0];

        // Unit cubes on both sides: 1 * 3 + 1 * 3
        let cost = builder.evaluate_cost(&node, Axis::X, 10.0);
        assert!((cost - 6.0).abs() < 1e-12);

        // Everything to the right: 2 * area of the union
        let cost = builder.evaluate_cost(&node, Axis::X, 0.0);
        let union_area = node.aabb.area();
        assert!((cost - 2.0 * union_area).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cost_is_invalid() {
        // Zero-radius spheres have zero-area boxes
        let prims: Vec<Primitive> = [0.0, 1.0]
            .iter()
            .map(|&x| Sphere::new(Point3::new(x, 0.0, 0.0), 0.0, absorb()).into())
            .collect();
        let mut builder = BvhBuilder::new(&prims, SplitStrategy::Exhaustive);
        builder.nodes[0] = BvhNode::leaf(0, 2);
        builder.update_bounds(0);
        let node = builder.nodes[0];
        assert_eq!(builder.evaluate_cost(&node, Axis::X, 1.0), f64::INFINITY);
    }

    #[test]
    fn test_partition_two_pointer() {
        let prims = spheres(&[
            (5.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (7.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
        ]);
        let mut builder = BvhBuilder::new(&prims, SplitStrategy::Exhaustive);
        let node = BvhNode::leaf(0, 4);
        let best = SplitCandidate {
            axis: Axis::X,
            pos: 4.0,
            cost: 1.0,
        };
        let split = builder.partition(&node, &best);
        assert_eq!(split, 2);
        for &idx in &builder.indices[..split] {
            assert!(builder.centroids[idx].x < 4.0);
        }
        for &idx in &builder.indices[split..] {
            assert!(builder.centroids[idx].x >= 4.0);
        }
    }

    #[test]
    fn test_build_two_clusters() {
        let prims = spheres(&[
            (0.0, 0.0, 0.0),
            (0.5, 0.0, 0.0),
            (20.0, 0.0, 0.0),
            (20.5, 0.0, 0.0),
        ]);
        let (nodes, indices) = BvhBuilder::new(&prims, SplitStrategy::Exhaustive).build();
        let root = nodes[0];
        assert!(!root.is_leaf());

        let (left, right) = root.children().unwrap();
        assert_eq!(left, 1);
        assert_eq!(right, 2);
        let left_max_x = nodes[left].aabb.max.x;
        let right_min_x = nodes[right].aabb.min.x;
        assert!(left_max_x < right_min_x);

        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_binned_finds_split() {
        let prims = spheres(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (30.0, 0.0, 0.0),
            (31.0, 0.0, 0.0),
        ]);
        let mut builder = BvhBuilder::new(&prims, SplitStrategy::Binned { bins: 4 });
        builder.nodes[0] = BvhNode::leaf(0, 4);
        builder.update_bounds(0);
        let node = builder.nodes[0];
        let best = builder.find_best_binned(&node, 4);
        assert_eq!(best.axis, Axis::X);
        assert!(best.pos > 1.0 && best.pos <= 30.0);
        assert!(best.cost < 4.0 * node.aabb.area());
    }
}
