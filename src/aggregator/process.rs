//! Per-process grouping of samples into per-thread call-site trees.
//!
//! Samples arrive with thread ids in arbitrary interleaving. Each thread
//! owns exactly one tree; trees are folded sequentially and laid out once
//! when the process is finished.

use super::call_tree::{CallTree, Frame};
use super::collapser::{check_chain, fold, normalize_chain, ChainOrder};
use crate::flamegraph::layout::{assign_offsets, LaidOutTree};
use crate::parser::schema::{ProfileInput, SampleRecord};
use crate::utils::error::MalformedChain;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// Count of rejected samples, per reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    pub zero_weight: u64,
    pub negative_weight: u64,
    pub empty_frame: u64,
    pub weight_overflow: u64,
}

impl SkipStats {
    pub fn record(&mut self, reason: MalformedChain) {
        match reason {
            MalformedChain::ZeroWeight => self.zero_weight += 1,
            MalformedChain::NegativeWeight(_) => self.negative_weight += 1,
            MalformedChain::EmptyFrame { .. } => self.empty_frame += 1,
            MalformedChain::WeightOverflow { .. } => self.weight_overflow += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.zero_weight + self.negative_weight + self.empty_frame + self.weight_overflow
    }

    pub fn summary(&self) -> String {
        format!(
            "{} skipped (zero weight: {}, negative weight: {}, unresolved inner frame: {}, weight overflow: {})",
            self.total(),
            self.zero_weight,
            self.negative_weight,
            self.empty_frame,
            self.weight_overflow
        )
    }
}

/// A thread whose tree is still being folded
#[derive(Debug, Clone)]
pub struct Thread {
    tid: u32,
    tree: CallTree,
    num_samples: u64,
}

impl Thread {
    pub fn new(tid: u32) -> Self {
        Self {
            tid,
            tree: CallTree::new(),
            num_samples: 0,
        }
    }

    pub fn tid(&self) -> u32 {
        self.tid
    }

    pub fn tree(&self) -> &CallTree {
        &self.tree
    }

    /// Number of accepted sample records
    pub fn num_samples(&self) -> u64 {
        self.num_samples
    }

    /// Sum of accepted sample weights
    pub fn total_samples(&self) -> u64 {
        self.tree.total_samples()
    }

    pub fn add_callchain(&mut self, chain: &[Frame], weight: i64) -> Result<(), MalformedChain> {
        fold(&mut self.tree, chain, weight)?;
        self.num_samples += 1;
        Ok(())
    }

    /// Stop folding and lay the tree out
    pub fn finish(self) -> LaidOutThread {
        debug!(
            "Thread {}: {} call sites, {} samples",
            self.tid,
            self.tree.len(),
            self.tree.total_samples()
        );
        LaidOutThread {
            tid: self.tid,
            num_samples: self.num_samples,
            tree: assign_offsets(self.tree),
        }
    }
}

/// A thread whose tree has been laid out and is read-only
#[derive(Debug, Clone)]
pub struct LaidOutThread {
    pub tid: u32,
    pub num_samples: u64,
    pub tree: LaidOutTree,
}

impl LaidOutThread {
    pub fn total_samples(&self) -> u64 {
        self.tree.total_samples()
    }
}

/// Samples of one process, grouped by thread
#[derive(Debug, Clone, Default)]
pub struct Process {
    pid: u32,
    name: String,
    threads: BTreeMap<u32, Thread>,
    num_samples: u64,
    skipped: SkipStats,
}

impl Process {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        Self {
            pid,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fold every sample of an input document.
    ///
    /// Rejected samples are counted in [`Process::skipped`], never fatal.
    pub fn from_input(input: ProfileInput) -> Self {
        let mut process = Self::new(input.process.pid, input.process.name);
        let order = input.chain_order;

        for record in input.samples {
            if let Err(reason) = process.add_sample(record, order) {
                debug!("Skipping sample: {}", reason);
            }
        }

        info!(
            "Folded {} samples into {} threads",
            process.num_samples,
            process.threads.len()
        );
        if process.skipped.total() > 0 {
            warn!("Malformed samples: {}", process.skipped.summary());
        }
        process
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_pid(&mut self, pid: u32) {
        self.pid = pid;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Threads in ascending tid order
    pub fn threads(&self) -> impl Iterator<Item = &Thread> {
        self.threads.values()
    }

    pub fn thread(&self, tid: u32) -> Option<&Thread> {
        self.threads.get(&tid)
    }

    /// Accepted sample records
    pub fn num_samples(&self) -> u64 {
        self.num_samples
    }

    pub fn skipped(&self) -> SkipStats {
        self.skipped
    }

    /// Add one sample record. A process without a pid adopts the first
    /// non-zero pid it sees.
    pub fn add_sample(
        &mut self,
        record: SampleRecord,
        order: ChainOrder,
    ) -> Result<(), MalformedChain> {
        if self.pid == 0 && record.pid != 0 {
            self.pid = record.pid;
        }
        let chain = normalize_chain(record.callchain, order);
        self.add_callchain(record.tid, &chain, record.event_weight)
    }

    /// Fold a root-first chain into the tree of thread `tid`.
    ///
    /// The thread is created on its first accepted sample.
    pub fn add_callchain(
        &mut self,
        tid: u32,
        chain: &[Frame],
        weight: i64,
    ) -> Result<(), MalformedChain> {
        if let Err(reason) = check_chain(chain, weight) {
            self.skipped.record(reason);
            return Err(reason);
        }

        // A single checked weight always fits an empty thread, so only an
        // existing thread can overflow here
        let thread = self.threads.entry(tid).or_insert_with(|| Thread::new(tid));
        if let Err(reason) = thread.add_callchain(chain, weight) {
            self.skipped.record(reason);
            return Err(reason);
        }
        self.num_samples += 1;
        Ok(())
    }

    /// Lay out every thread and fix the report order: the main thread
    /// (`tid == pid`) first, then the rest by ascending tid.
    pub fn finish(self) -> FinishedProcess {
        let (main, others): (Vec<Thread>, Vec<Thread>) = self
            .threads
            .into_values()
            .partition(|thread| thread.tid == self.pid);

        let threads = main
            .into_iter()
            .chain(others)
            .map(Thread::finish)
            .collect();

        FinishedProcess {
            pid: self.pid,
            name: self.name,
            num_samples: self.num_samples,
            skipped: self.skipped,
            threads,
        }
    }
}

/// A process whose threads are all laid out
#[derive(Debug, Clone)]
pub struct FinishedProcess {
    pub pid: u32,
    pub name: String,
    pub num_samples: u64,
    pub skipped: SkipStats,
    pub threads: Vec<LaidOutThread>,
}

impl FinishedProcess {
    pub fn is_main_thread(&self, thread: &LaidOutThread) -> bool {
        thread.tid == self.pid
    }
}
