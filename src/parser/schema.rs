//! Input schema for sampled call stacks.
//!
//! This is the shape the acquisition side hands over: symbolized frames,
//! one record per observed sample.

use crate::aggregator::call_tree::Frame;
use crate::aggregator::collapser::ChainOrder;
use serde::{Deserialize, Serialize};

/// Top-level profile document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    /// Profiled process (optional, CLI flags can supply it)
    #[serde(default)]
    pub process: ProcessInfo,

    /// Frame order inside every `callchain`
    #[serde(default)]
    pub chain_order: ChainOrder,

    /// Sampled event name, e.g. "cpu-cycles"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    /// Capture duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,

    #[serde(default)]
    pub samples: Vec<SampleRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    #[serde(default)]
    pub pid: u32,

    #[serde(default)]
    pub name: String,
}

/// One observed sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub tid: u32,

    #[serde(default)]
    pub pid: u32,

    /// Signed on the wire so bad weights can be reported instead of failing
    /// deserialization
    #[serde(default = "default_weight", alias = "weight", alias = "period")]
    pub event_weight: i64,

    #[serde(default)]
    pub callchain: Vec<Frame>,
}

fn default_weight() -> i64 {
    1
}

impl SampleRecord {
    pub fn new(tid: u32, pid: u32, event_weight: i64, callchain: Vec<Frame>) -> Self {
        Self {
            tid,
            pid,
            event_weight,
            callchain,
        }
    }
}
