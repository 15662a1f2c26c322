//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading sample input
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid sample record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

/// Reasons a call chain is rejected at the collapser boundary.
///
/// A rejected sample is skipped and counted; the tree is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MalformedChain {
    #[error("sample weight must be positive, got 0")]
    ZeroWeight,

    #[error("sample weight must be positive, got {0}")]
    NegativeWeight(i64),

    #[error("unresolved frame at depth {depth} has callees below it")]
    EmptyFrame { depth: usize },

    #[error("sample weight {weight} overflows the thread total {total}")]
    WeightOverflow { total: u64, weight: u64 },
}

/// Internal consistency failures of a call-site tree.
///
/// These indicate a bug in folding or layout, never bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("node {node}: sample count {total} != children {children} + self {self_count}")]
    CountMismatch {
        node: usize,
        total: u64,
        children: u64,
        self_count: u64,
    },

    #[error("node {node} has zero samples")]
    EmptyNode { node: usize },

    #[error("node {node}: child ranges do not tile [{start}, {end}), expected child at {expected} but found {found}")]
    TilingGap {
        node: usize,
        start: u64,
        end: u64,
        expected: u64,
        found: u64,
    },

    #[error("node {node}: children end at {children_end}, beyond parent end {end}")]
    TilingOverflow {
        node: usize,
        children_end: u64,
        end: u64,
    },
}

/// Errors that can occur during flamegraph rendering
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown color scheme '{requested}' (valid: {})", .valid.join(", "))]
    UnknownColorScheme {
        requested: String,
        valid: &'static [&'static str],
    },

    #[error("Empty call-site tree")]
    EmptyTree,

    #[error("Call-site tree is corrupt: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
