//! Bounding Volume Hierarchy for accelerated nearest-hit queries.
//!
//! The tree is stored as a flat node arena. Primitives never move after the
//! build; instead a permutation array is reordered so that every leaf covers
//! a contiguous slice of it.
//!
//! Construction uses the Surface Area Heuristic (SAH), see [`build`].

mod build;
mod traverse;
mod validation;

pub use traverse::TRAVERSAL_STACK_SIZE;

use std::ops::Range;

use pathtrace_math::Point3;

use crate::error::Result;
use crate::primitive::{Hittable, Primitive};
use crate::settings::BvhSettings;
use crate::{Aabb, HitRecord, Ray};

use build::BvhBuilder;

/// A node of the flattened tree.
///
/// `left_first` is either the index of the first child node (internal
/// nodes, `count == 0`) or the index of the first entry in the permutation
/// array (leaves, `count > 0`). Children of an internal node are always
/// stored at `left_first` and `left_first + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhNode {
    /// Bounds of everything below this node.
    pub aabb: Aabb,
    /// First child node, or first permutation entry for leaves.
    pub left_first: usize,
    /// Number of primitives in a leaf; zero for internal nodes.
    pub count: usize,
}

impl BvhNode {
    /// A node covering `count` permutation entries starting at `first`.
    pub(crate) fn leaf(first: usize, count: usize) -> Self {
        Self {
            aabb: Aabb::empty(),
            left_first: first,
            count,
        }
    }

    /// `true` if this node references primitives directly.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.count > 0
    }

    /// Slice of the permutation array covered by this leaf.
    #[inline]
    pub fn primitive_range(&self) -> Range<usize> {
        self.left_first..self.left_first + self.count
    }

    /// Indices of the two children, for internal nodes.
    #[inline]
    pub fn children(&self) -> Option<(usize, usize)> {
        if self.is_leaf() {
            None
        } else {
            Some((self.left_first, self.left_first + 1))
        }
    }
}

impl Default for BvhNode {
    fn default() -> Self {
        Self::leaf(0, 0)
    }
}

/// An immutable, built bounding volume hierarchy over owned primitives.
#[derive(Debug, Clone)]
pub struct Bvh {
    primitives: Vec<Primitive>,
    nodes: Vec<BvhNode>,
    indices: Vec<usize>,
}

impl Bvh {
    /// Build a BVH with the default (exhaustive SAH) settings.
    pub fn build(primitives: Vec<Primitive>) -> Self {
        Self::build_inner(primitives, &BvhSettings::default())
    }

    /// Build a BVH with explicit settings.
    pub fn build_with(primitives: Vec<Primitive>, settings: &BvhSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::build_inner(primitives, settings))
    }

    /// Build with settings that were validated up front.
    pub(crate) fn build_inner(primitives: Vec<Primitive>, settings: &BvhSettings) -> Self {
        let (nodes, indices) = BvhBuilder::new(&primitives, settings.split).build();
        let bvh = Self {
            primitives,
            nodes,
            indices,
        };
        log::debug!(
            "built BVH over {} primitives: {} nodes, {} leaves, depth {}",
            bvh.primitives.len(),
            bvh.nodes.len(),
            bvh.leaf_count(),
            bvh.depth()
        );
        bvh
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// `true` if the BVH holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives in insertion order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// The node arena. Index 0 is the root.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Permutation array mapping leaf slots to primitive indices.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Bounds of the root node. Empty for an empty BVH.
    pub fn bounds(&self) -> Aabb {
        self.nodes[0].aabb
    }

    /// Number of nodes in use.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over the leaves and the primitive indices each one covers.
    pub fn leaves(&self) -> impl Iterator<Item = (&BvhNode, &[usize])> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| (node, &self.indices[node.primitive_range()]))
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        // The empty root is neither a leaf nor a real internal node.
        if self.is_empty() {
            return 1;
        }

        let mut max_depth = 0;
        let mut stack = vec![(0usize, 1usize)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some((left, right)) = self.nodes[id].children() {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
        max_depth
    }
}

impl Hittable for Bvh {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord> {
        self.trace_closest(ray, t_min, t_max)
    }

    /// Mean of the primitive centroids. The origin for an empty BVH.
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
        self.bounds()
    }
}
