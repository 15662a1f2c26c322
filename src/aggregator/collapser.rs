//! Fold call chains into a call-site tree.
//!
//! A chain is an ordered list of frames from the outermost caller to the
//! innermost callee. Folding walks it from the root, creating call sites on
//! first sight and adding the sample weight to every node along the path.
//! Merging is purely by path prefix: a recursive chain `[A, B, A]` yields
//! three distinct nodes.

use super::call_tree::{CallTree, Frame, NodeId};
use crate::utils::error::MalformedChain;
use serde::{Deserialize, Serialize};

/// Order of the frames in an incoming call chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainOrder {
    /// Outermost caller first (the order `fold` expects)
    #[default]
    RootFirst,

    /// Innermost callee first, as stack unwinders report it
    LeafFirst,
}

/// Put a chain into root-first order.
pub fn normalize_chain(mut chain: Vec<Frame>, order: ChainOrder) -> Vec<Frame> {
    if order == ChainOrder::LeafFirst {
        chain.reverse();
    }
    chain
}

/// Validate a chain and its weight without touching any tree.
///
/// Unresolved frames at the leaf end are terminal and get trimmed; the
/// returned length is the number of frames that will actually be folded.
/// An unresolved frame with resolved callees below it is malformed.
///
/// # Errors
/// * `MalformedChain::ZeroWeight` / `NegativeWeight` - weight is not positive
/// * `MalformedChain::EmptyFrame` - unresolved frame in a non-terminal position
pub fn check_chain(chain: &[Frame], weight: i64) -> Result<(usize, u64), MalformedChain> {
    let weight = match weight {
        0 => return Err(MalformedChain::ZeroWeight),
        w if w < 0 => return Err(MalformedChain::NegativeWeight(w)),
        w => w.unsigned_abs(),
    };

    let resolved_len = chain
        .iter()
        .rposition(Frame::is_resolved)
        .map_or(0, |last| last + 1);

    if let Some(depth) = chain[..resolved_len].iter().position(|f| !f.is_resolved()) {
        return Err(MalformedChain::EmptyFrame { depth });
    }

    Ok((resolved_len, weight))
}

/// Fold one root-first chain of `weight` samples into `tree`.
///
/// Returns the call site the chain terminates at (the root for an empty
/// chain). A rejected chain leaves the tree untouched.
///
/// **Public** - the only way call sites are created
///
/// # Arguments
/// * `tree` - Call-site tree of the sample's thread
/// * `chain` - Frames from outermost caller to innermost callee
/// * `weight` - Sample weight as received; must be positive
///
/// # Errors
/// Any [`check_chain`] rejection, or `MalformedChain::WeightOverflow` when
/// the thread total would no longer fit in a `u64`
pub fn fold(tree: &mut CallTree, chain: &[Frame], weight: i64) -> Result<NodeId, MalformedChain> {
    let (len, weight) = check_chain(chain, weight)?;

    // The root count bounds every other count on the path
    let total = tree.total_samples();
    if total.checked_add(weight).is_none() {
        return Err(MalformedChain::WeightOverflow { total, weight });
    }

    let mut current = CallTree::ROOT;
    tree.add_samples(current, weight);

    for frame in &chain[..len] {
        current = tree.child_or_insert(current, frame);
        tree.add_samples(current, weight);
    }

    tree.add_self_samples(current, weight);

    debug_assert!(
        tree.node(current).self_count() <= tree.node(current).sample_count(),
        "self samples exceed total at node {}",
        current.index()
    );

    Ok(current)
}
