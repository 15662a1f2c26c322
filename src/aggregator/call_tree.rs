//! Per-thread call-site tree.
//!
//! Every node is "this frame, reached via this exact path from the root".
//! Nodes live in a flat arena owned by the tree and refer to their children
//! by index, so a tree never shares nodes with another tree and needs no
//! reference counting. Children are kept in first-seen order.

use crate::utils::error::InvariantViolation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one call-stack level.
///
/// Two frames are equal iff both the function name and the module match
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Frame {
    #[serde(rename = "function", alias = "function_name")]
    pub function_name: String,

    #[serde(default, alias = "dso")]
    pub module: String,
}

impl Frame {
    pub fn new(function_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            module: module.into(),
        }
    }

    /// A frame whose symbol could not be resolved has an empty name.
    pub fn is_resolved(&self) -> bool {
        !self.function_name.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            write!(f, "{}", self.function_name)
        } else {
            write!(f, "{} [{}]", self.function_name, self.module)
        }
    }
}

/// Index of a call site inside its owning [`CallTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node of the call-site tree
#[derive(Debug, Clone)]
pub struct CallSite {
    /// `None` only for the synthetic root
    frame: Option<Frame>,

    children: IndexMap<Frame, NodeId>,

    /// Samples whose chain passes through this node
    sample_count: u64,

    /// Samples whose chain terminates exactly here
    self_count: u64,

    /// Distance from the root (root = 0)
    depth: usize,
}

impl CallSite {
    fn new(frame: Option<Frame>, depth: usize) -> Self {
        Self {
            frame,
            children: IndexMap::new(),
            sample_count: 0,
            self_count: 0,
            depth,
        }
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn function_name(&self) -> &str {
        self.frame.as_ref().map_or("", |f| f.function_name.as_str())
    }

    pub fn module(&self) -> &str {
        self.frame.as_ref().map_or("", |f| f.module.as_str())
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn self_count(&self) -> u64 {
        self.self_count
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.frame.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in first-seen order
    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator + '_ {
        self.children.values().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child_at(&self, position: usize) -> Option<NodeId> {
        self.children.get_index(position).map(|(_, id)| *id)
    }

    pub fn child(&self, frame: &Frame) -> Option<NodeId> {
        self.children.get(frame).copied()
    }
}

/// Call-site tree for one thread.
///
/// Mutated only through [`crate::aggregator::collapser::fold`]; read-only
/// once handed to the layout pass.
#[derive(Debug, Clone)]
pub struct CallTree {
    nodes: Vec<CallSite>,
}

impl Default for CallTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CallTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![CallSite::new(None, 0)],
        }
    }

    pub fn root(&self) -> &CallSite {
        &self.nodes[Self::ROOT.0]
    }

    /// Node lookup. Ids are only ever minted by this tree.
    pub fn node(&self, id: NodeId) -> &CallSite {
        &self.nodes[id.0]
    }

    /// Number of call sites, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been folded in yet
    pub fn is_empty(&self) -> bool {
        self.root().sample_count == 0
    }

    pub fn total_samples(&self) -> u64 {
        self.root().sample_count
    }

    /// Depth of the deepest call site (0 for a tree with only the root)
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Depth-first pre-order walk, children in first-seen order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![Self::ROOT],
        }
    }

    /// Follow a path of function names from the root, ignoring modules.
    ///
    /// The first child with a matching name wins at each level.
    pub fn find_path(&self, functions: &[&str]) -> Option<NodeId> {
        let mut current = Self::ROOT;
        for name in functions {
            current = self
                .node(current)
                .children()
                .find(|&child| self.node(child).function_name() == *name)?;
        }
        Some(current)
    }

    pub(crate) fn child_or_insert(&mut self, parent: NodeId, frame: &Frame) -> NodeId {
        if let Some(existing) = self.nodes[parent.0].child(frame) {
            return existing;
        }
        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes.push(CallSite::new(Some(frame.clone()), depth));
        self.nodes[parent.0].children.insert(frame.clone(), id);
        id
    }

    pub(crate) fn add_samples(&mut self, id: NodeId, weight: u64) {
        self.nodes[id.0].sample_count += weight;
    }

    pub(crate) fn add_self_samples(&mut self, id: NodeId, weight: u64) {
        self.nodes[id.0].self_count += weight;
    }

    /// Verify the counting invariants on every node.
    ///
    /// `sample_count == sum(children) + self_count` everywhere, and no call
    /// site below the root may carry zero samples.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (index, node) in self.nodes.iter().enumerate() {
            if !node.is_root() && node.sample_count == 0 {
                return Err(InvariantViolation::EmptyNode { node: index });
            }
            let children: u64 = node
                .children()
                .map(|child| self.node(child).sample_count)
                .sum();
            if children.checked_add(node.self_count) != Some(node.sample_count) {
                return Err(InvariantViolation::CountMismatch {
                    node: index,
                    total: node.sample_count,
                    children,
                    self_count: node.self_count,
                });
            }
        }
        Ok(())
    }
}

/// Iterator returned by [`CallTree::preorder`]
pub struct Preorder<'a> {
    tree: &'a CallTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.node(id).children().rev());
        Some(id)
    }
}
