//! flamefold CLI
//!
//! Folds sampled call chains into call-site trees and renders
//! per-thread flamegraphs into a single report.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use flamefold::commands::{display_version, execute_report, validate_input_file, ReportArgs};
use flamefold::utils::config::{DEFAULT_COLOR_SCHEME, DEFAULT_TOP_PATHS, SVG_CANVAS_WIDTH};

/// flamefold - flamegraph reports from sampled call chains
#[derive(Parser, Debug)]
#[command(name = "flamefold")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold samples and write a flamegraph report
    Report {
        /// Sample file (.json, or .jsonl/.ndjson for one record per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the HTML report
        #[arg(short, long, default_value = "report.html")]
        output: PathBuf,

        /// Output path for the JSON rectangle export (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Output path for collapsed stacks (optional)
        #[arg(long)]
        collapsed: Option<PathBuf>,

        /// Color scheme: hot, dso or legacy
        #[arg(short, long, env = "FLAMEFOLD_COLOR", default_value = DEFAULT_COLOR_SCHEME)]
        color: String,

        /// Flamegraph width in pixels
        #[arg(long, default_value_t = SVG_CANVAS_WIDTH)]
        width: usize,

        /// Report title
        #[arg(long)]
        title: Option<String>,

        /// Override the process id recorded in the input
        #[arg(long)]
        pid: Option<u32>,

        /// Override the process name recorded in the input
        #[arg(long)]
        process_name: Option<String>,

        /// Print hot path summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of hot paths per thread in the summary
        #[arg(long, default_value_t = DEFAULT_TOP_PATHS)]
        top_paths: usize,
    },

    /// Validate a sample file
    Validate {
        /// Path to sample file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            input,
            output,
            json,
            collapsed,
            color,
            width,
            title,
            pid,
            process_name,
            summary,
            top_paths,
        } => {
            let args = ReportArgs {
                input,
                output_html: output,
                output_json: json,
                output_collapsed: collapsed,
                color,
                width,
                title,
                pid,
                process_name,
                print_summary: summary,
                top_paths,
            };

            execute_report(args)?;
        }

        Commands::Validate { input } => {
            validate_input_file(&input)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
