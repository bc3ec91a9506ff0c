use crate::primitive::Hittable;

use super::Bvh;

impl Bvh {
    /// Panics if the tree isn't well-formed.
    ///
    /// The tree is well-formed if every child index is in range, every
    /// parent box contains its children's boxes, the leaf slices together
    /// cover each primitive exactly once, and the root box contains every
    /// primitive box.
    ///
    /// This is mostly a utility for tests and debugging.
    pub fn assert_well_formed(&self) {
        assert_eq!(self.indices.len(), self.primitives.len());
        if self.is_empty() {
            assert_eq!(self.nodes.len(), 1);
            assert_eq!(self.nodes[0].count, 0);
            return;
        }

        let mut seen = vec![0u32; self.primitives.len()];
        let mut stack = vec![0usize];
        let mut visited = 0;

        while let Some(id) = stack.pop() {
            visited += 1;
            assert!(visited <= self.nodes.len(), "cycle in node arena");

            let node = &self.nodes[id];
            match node.children() {
                Some((left, right)) => {
                    assert!(right < self.nodes.len(), "child {right} out of range");
                    assert!(left > id, "child {left} precedes its parent {id}");
                    assert!(node.aabb.contains(&self.nodes[left].aabb));
                    assert!(node.aabb.contains(&self.nodes[right].aabb));
                    stack.push(left);
                    stack.push(right);
                }
                None => {
                    let range = node.primitive_range();
                    assert!(range.end <= self.indices.len(), "leaf {id} overruns permutation");
                    for &idx in &self.indices[range] {
                        assert!(node.aabb.contains(&self.primitives[idx].bounding_box()));
                        seen[idx] += 1;
                    }
                }
            }
        }

        assert_eq!(visited, self.nodes.len(), "unreachable nodes in arena");
        for (idx, &count) in seen.iter().enumerate() {
            assert_eq!(count, 1, "primitive {idx} referenced {count} times");
        }

        let root = self.bounds();
        for prim in &self.primitives {
            assert!(root.contains(&prim.bounding_box()));
        }
    }
}
