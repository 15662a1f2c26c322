//! Calculate hot paths from collapsed stacks.
//!
//! Hot paths are the call paths where the most samples terminate.
//! These are the primary targets for optimization.

use super::stack_builder::CollapsedStack;
use log::debug;
use serde::{Deserialize, Serialize};

/// A hot path in the execution (stack trace with samples)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotPath {
    /// Collapsed stack representation (e.g., "main;foo;bar")
    pub stack: String,

    /// Samples terminating on this path
    pub samples: u64,

    /// Percentage of the thread's samples
    pub percentage: f64,
}

/// Calculate hot paths from collapsed stacks
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `stacks` - Collapsed stacks from stack_builder
/// * `total_samples` - Total samples of the thread
/// * `top_n` - Number of top paths to return (e.g., 10)
///
/// # Returns
/// Vector of hot paths, sorted by samples (descending). Ties keep tree order.
pub fn calculate_hot_paths(
    stacks: &[CollapsedStack],
    total_samples: u64,
    top_n: usize,
) -> Vec<HotPath> {
    debug!(
        "Calculating top {} hot paths from {} stacks",
        top_n,
        stacks.len()
    );

    let mut ranked: Vec<&CollapsedStack> = stacks.iter().collect();
    ranked.sort_by(|a, b| b.weight.cmp(&a.weight));

    ranked
        .into_iter()
        .take(top_n)
        .map(|stack| create_hot_path(stack, total_samples))
        .collect()
}

/// Create a HotPath from a CollapsedStack
pub fn create_hot_path(stack: &CollapsedStack, total_samples: u64) -> HotPath {
    let percentage = if total_samples > 0 {
        (stack.weight as f64 / total_samples as f64) * 100.0
    } else {
        0.0
    };

    HotPath {
        stack: stack.stack.clone(),
        samples: stack.weight,
        percentage,
    }
}

/// Create a text table of hot paths for terminal output
pub fn generate_text_summary(tid: u32, hot_paths: &[HotPath], total_paths: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!("  HOT PATHS - thread {}", tid));
    lines.push(format!("  +{}+{}+{}+", "-".repeat(62), "-".repeat(12), "-".repeat(9)));
    lines.push(format!(
        "  | {:<60} | {:>10} | {:>7} |",
        "Call Path (Hottest First)", "SAMPLES", "%"
    ));
    lines.push(format!("  +{}+{}+{}+", "-".repeat(62), "-".repeat(12), "-".repeat(9)));

    for path in hot_paths {
        lines.push(format!(
            "  | {:<60} | {:>10} | {:>6.1}% |",
            truncate_stack(&path.stack, 60),
            path.samples,
            path.percentage
        ));
    }

    lines.push(format!("  +{}+{}+{}+", "-".repeat(62), "-".repeat(12), "-".repeat(9)));

    if total_paths > hot_paths.len() {
        lines.push(format!(
            "   (Showing top {} of {} unique paths)",
            hot_paths.len(),
            total_paths
        ));
    }

    lines.join("\n")
}

/// Keep the innermost end of a long stack, prefixed with "..."
fn truncate_stack(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len > max_len {
        let tail: String = s.chars().skip(len - (max_len - 3)).collect();
        format!("...{}", tail)
    } else {
        s.to_string()
    }
}
