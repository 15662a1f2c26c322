use crate::utils::config::{DEFAULT_COLOR_SCHEME, DEFAULT_TOP_PATHS, SVG_CANVAS_WIDTH};
use std::path::PathBuf;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Sample file (JSON document or JSON Lines)
    pub input: PathBuf,

    /// Output path for the HTML report
    pub output_html: PathBuf,

    /// Output path for the JSON rectangle export (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for collapsed stacks (optional)
    pub output_collapsed: Option<PathBuf>,

    /// Color scheme name, validated before any work starts
    pub color: String,

    /// Flamegraph width in pixels
    pub width: usize,

    /// Report title (optional)
    pub title: Option<String>,

    /// Override the profiled process id
    pub pid: Option<u32>,

    /// Override the profiled process name
    pub process_name: Option<String>,

    /// Print hot path summary to stdout
    pub print_summary: bool,

    /// Number of hot paths per thread in the summary
    pub top_paths: usize,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("samples.json"),
            output_html: PathBuf::from("report.html"),
            output_json: None,
            output_collapsed: None,
            color: DEFAULT_COLOR_SCHEME.to_string(),
            width: SVG_CANVAS_WIDTH,
            title: None,
            pid: None,
            process_name: None,
            print_summary: false,
            top_paths: DEFAULT_TOP_PATHS,
        }
    }
}
