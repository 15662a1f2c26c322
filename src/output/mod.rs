//! Output writers for flamegraph reports.
//!
//! This module handles:
//! - Assembling the per-thread report data
//! - HTML reports with embedded SVG flamegraphs
//! - JSON export of rectangle descriptors
//! - Plain text files (collapsed stacks)

pub mod html;
pub mod json;
pub mod report;
pub mod text;

// Re-export main functions
pub use html::{render_html, write_html};
pub use json::{report_to_string, write_report_json};
pub use report::{build_report, CaptureInfo, Report, ThreadReport};
pub use text::write_text;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
