//! Build collapsed stack format from a call-site tree.
//!
//! Collapsed stacks are the interchange format of the classic flamegraph
//! tooling. Format: "parent;child;grandchild weight"
//!
//! Example: "main;foo;bar 5"
//! This means: 5 samples ended in bar, called from foo, called from main.

use super::call_tree::CallTree;
use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Frame separator of the collapsed format
const SEPARATOR: char = ';';

/// A single collapsed stack entry
///
/// **Public** - used by metrics and the collapsed-stack export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Samples that terminate at the last frame of `stack`
    pub weight: u64,
}

impl CollapsedStack {
    /// Create a new collapsed stack
    ///
    /// **Public** - constructor
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }
}

impl fmt::Display for CollapsedStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stack, self.weight)
    }
}

/// Build collapsed stacks from a call-site tree
///
/// **Public** - main entry point for stack building
///
/// # Returns
/// One entry per call site with self samples, in tree pre-order.
/// Samples attributed to the synthetic root (empty chains) have no frame
/// path and are not listed. A `;` inside a function name is written as
/// `:` so the name stays one frame.
pub fn build_collapsed_stacks(tree: &CallTree) -> Vec<CollapsedStack> {
    let mut stacks = Vec::new();
    let mut path: Vec<Cow<'_, str>> = Vec::new();

    for id in tree.preorder().skip(1) {
        let node = tree.node(id);
        path.truncate(node.depth() - 1);
        path.push(frame_label(node.function_name()));

        if node.self_count() > 0 {
            stacks.push(CollapsedStack::new(path.join(";"), node.self_count()));
        }
    }

    debug!("Built {} collapsed stacks", stacks.len());
    stacks
}

fn frame_label(name: &str) -> Cow<'_, str> {
    if name.contains(SEPARATOR) {
        Cow::Owned(name.replace(SEPARATOR, ":"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Render collapsed stacks as text, one per line
pub fn collapsed_text(stacks: &[CollapsedStack]) -> String {
    let mut out = String::new();
    for stack in stacks {
        out.push_str(&stack.to_string());
        out.push('\n');
    }
    out
}

/// Render one thread's stacks with a leading `thread-<tid>` frame, so
/// several threads can share one collapsed file without their paths merging
pub fn thread_collapsed_text(tid: u32, stacks: &[CollapsedStack]) -> String {
    let mut out = String::new();
    for stack in stacks {
        out.push_str(&format!("thread-{tid}{SEPARATOR}{stack}\n"));
    }
    out
}
