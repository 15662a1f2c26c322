//! Aggregation of sampled call chains into call-site trees.
//!
//! This module transforms sample records into:
//! - One call-site tree per thread (collapsing shared call-chain prefixes)
//! - Collapsed stack lines (for interchange with other flamegraph tools)
//! - Hot path analysis (paths where the most samples end)

pub mod call_tree;
pub mod collapser;
pub mod metrics;
pub mod process;
pub mod stack_builder;

// Re-export main types and functions
pub use call_tree::{CallSite, CallTree, Frame, NodeId};
pub use collapser::{fold, ChainOrder};
pub use metrics::{calculate_hot_paths, generate_text_summary, HotPath};
pub use process::{FinishedProcess, LaidOutThread, Process, SkipStats, Thread};
pub use stack_builder::{
    build_collapsed_stacks, collapsed_text, thread_collapsed_text, CollapsedStack,
};
