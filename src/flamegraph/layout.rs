//! Linear offset assignment over a finished call-site tree.
//!
//! Every call site gets an offset in `0..total_samples`. Children are
//! packed left to right in first-seen order starting at their parent's
//! offset, each one `sample_count` wide. Samples that terminate at a node
//! itself occupy the trailing sub-range after its last child.
//!
//! Layout consumes the [`CallTree`], so it runs exactly once and the tree is
//! read-only afterwards.

use crate::aggregator::call_tree::{CallSite, CallTree, NodeId, Preorder};
use crate::utils::error::InvariantViolation;
use log::debug;

/// A call-site tree with offsets stamped on every node
#[derive(Debug, Clone)]
pub struct LaidOutTree {
    tree: CallTree,
    offsets: Vec<u64>,
}

/// Assign offsets in a single pre-order pass.
///
/// **Public** - main entry point for layout
pub fn assign_offsets(tree: CallTree) -> LaidOutTree {
    let mut offsets = vec![0u64; tree.len()];
    let mut stack = vec![CallTree::ROOT];

    while let Some(id) = stack.pop() {
        let node = tree.node(id);
        let mut cursor = offsets[id.index()];
        for child in node.children() {
            offsets[child.index()] = cursor;
            cursor += tree.node(child).sample_count();
        }
        stack.extend(node.children().rev());
    }

    debug!(
        "Assigned offsets to {} call sites ({} samples)",
        tree.len(),
        tree.total_samples()
    );

    LaidOutTree { tree, offsets }
}

impl LaidOutTree {
    pub fn tree(&self) -> &CallTree {
        &self.tree
    }

    pub fn node(&self, id: NodeId) -> &CallSite {
        self.tree.node(id)
    }

    pub fn offset(&self, id: NodeId) -> u64 {
        self.offsets[id.index()]
    }

    pub fn total_samples(&self) -> u64 {
        self.tree.total_samples()
    }

    pub fn preorder(&self) -> Preorder<'_> {
        self.tree.preorder()
    }

    /// Share of all thread samples passing through `id`, in percent
    pub fn percentage(&self, id: NodeId) -> f64 {
        let total = self.total_samples();
        if total == 0 {
            return 0.0;
        }
        self.node(id).sample_count() as f64 / total as f64 * 100.0
    }

    /// Call-site chain (root first, root included) owning sample `index`.
    ///
    /// Binary-searches each level's children by offset. An index inside a
    /// node's self range stops at that node. Returns `None` when the index
    /// is past the last sample.
    pub fn chain_at(&self, index: u64) -> Option<Vec<NodeId>> {
        if index >= self.total_samples() {
            return None;
        }

        let mut chain = vec![CallTree::ROOT];
        let mut current = CallTree::ROOT;

        loop {
            let node = self.node(current);

            // First child whose range ends past `index`
            let (mut lo, mut hi) = (0, node.child_count());
            while lo < hi {
                let mid = lo + (hi - lo) / 2;
                let child = node.child_at(mid)?;
                if self.offset(child) + self.node(child).sample_count() <= index {
                    lo = mid + 1;
                } else {
                    hi = mid;
                }
            }

            match node.child_at(lo) {
                Some(child) if self.offset(child) <= index => {
                    chain.push(child);
                    current = child;
                }
                _ => return Some(chain),
            }
        }
    }

    /// Verify that at every node the children's ranges tile the leading part
    /// of the parent's range with no gaps or overlaps.
    pub fn check_tiling(&self) -> Result<(), InvariantViolation> {
        if self.offset(CallTree::ROOT) != 0 {
            return Err(InvariantViolation::TilingGap {
                node: CallTree::ROOT.index(),
                start: 0,
                end: self.total_samples(),
                expected: 0,
                found: self.offset(CallTree::ROOT),
            });
        }

        for id in self.preorder() {
            let node = self.node(id);
            let start = self.offset(id);
            let end = start + node.sample_count();
            let mut cursor = start;

            for child in node.children() {
                let found = self.offset(child);
                if found != cursor {
                    return Err(InvariantViolation::TilingGap {
                        node: id.index(),
                        start,
                        end,
                        expected: cursor,
                        found,
                    });
                }
                cursor += self.node(child).sample_count();
            }

            if cursor > end {
                return Err(InvariantViolation::TilingOverflow {
                    node: id.index(),
                    children_end: cursor,
                    end,
                });
            }
        }
        Ok(())
    }
}
