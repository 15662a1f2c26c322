use super::report::ensure_usable_samples;
use crate::aggregator::Process;
use crate::parser::read_input;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a sample file without rendering anything
///
/// Fails on the same inputs the report command rejects, including files
/// whose samples are all malformed.
pub fn validate_input_file(file_path: &Path) -> Result<()> {
    println!("Validating samples: {}", file_path.display());

    let input = read_input(file_path)
        .with_context(|| format!("Failed to read samples from {}", file_path.display()))?;
    let records = input.samples.len();
    let process = Process::from_input(input);
    let skipped = process.skipped();
    ensure_usable_samples(&process, file_path)?;

    println!("✓ Valid sample file");
    println!("  Process: {} ({})", process.name(), process.pid());
    println!("  Records: {}", records);
    println!("  Threads: {}", process.threads().count());
    println!("  Samples: {}", process.num_samples());
    if skipped.total() > 0 {
        println!("  Skipped: {}", skipped.summary());
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("flamefold v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Folds sampled call chains into per-thread flamegraph reports.");
}
