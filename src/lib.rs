//! flamefold
//!
//! Folds sampled call chains into per-process, per-thread call-site
//! trees and renders them as flamegraph reports.
//!
//! This crate provides the core implementation for the
//! `flamefold` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! flamefold report --input samples.json --output report.html
//! flamefold --help
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use flamefold::aggregator::Process;
//! use flamefold::output::{build_report, write_html, CaptureInfo};
//! use flamefold::flamegraph::FlamegraphConfig;
//! use flamefold::parser::read_input;
//!
//! let input = read_input("samples.json")?;
//! let process = Process::from_input(input).finish();
//! let report = build_report(&process, &FlamegraphConfig::new(), CaptureInfo::default())?;
//! write_html(&report, "report.html")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
