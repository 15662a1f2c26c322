//! Report data handed to the HTML and JSON writers.
//!
//! One [`Report`] per run: process metadata plus the rendered rectangles
//! of every thread, in report order.

use crate::aggregator::process::{FinishedProcess, SkipStats};
use crate::flamegraph::generator::{graph_height, FlameRect, FlamegraphConfig, Renderer};
use crate::flamegraph::ColorScheme;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::RenderError;
use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;

/// Capture details the input may carry
#[derive(Debug, Clone, Default)]
pub struct CaptureInfo {
    pub event: Option<String>,
    pub duration_secs: Option<f64>,
}

/// Complete report for one process
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,
    pub title: String,
    pub process: String,
    pub pid: u32,
    pub generated_at: DateTime<Local>,
    pub color_scheme: ColorScheme,
    pub width: usize,

    /// Accepted sample records
    pub num_samples: u64,
    pub skipped: SkipStats,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,

    pub threads: Vec<ThreadReport>,
}

/// Rendered flamegraph of one thread
#[derive(Debug, Clone, Serialize)]
pub struct ThreadReport {
    pub tid: u32,
    pub is_main: bool,
    pub num_samples: u64,
    pub total_samples: u64,
    pub graph_height: usize,
    pub rects: Vec<FlameRect>,
}

/// Render every thread of a finished process
///
/// **Public** - main entry point for report assembly
///
/// A single renderer is used for the whole report, so `dso` colors agree
/// across threads.
///
/// # Errors
/// * `RenderError` - a thread's tree is empty or corrupt; nothing is returned
pub fn build_report(
    process: &FinishedProcess,
    config: &FlamegraphConfig,
    capture: CaptureInfo,
) -> Result<Report, RenderError> {
    let mut renderer = Renderer::new(config.color);
    let mut threads = Vec::with_capacity(process.threads.len());

    for thread in &process.threads {
        let rects = renderer.render(&thread.tree, config.width as f64)?;
        threads.push(ThreadReport {
            tid: thread.tid,
            is_main: process.is_main_thread(thread),
            num_samples: thread.num_samples,
            total_samples: thread.total_samples(),
            graph_height: graph_height(thread.tree.tree()),
            rects,
        });
    }

    info!("Built report with {} threads", threads.len());

    Ok(Report {
        version: SCHEMA_VERSION.to_string(),
        title: config.title.clone(),
        process: process.name.clone(),
        pid: process.pid,
        generated_at: Local::now(),
        color_scheme: config.color,
        width: config.width,
        num_samples: process.num_samples,
        skipped: process.skipped,
        event: capture.event,
        duration_secs: capture.duration_secs,
        threads,
    })
}
