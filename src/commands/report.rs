//! Report command implementation.
//!
//! The report command:
//! 1. Reads sample records
//! 2. Folds them into per-thread call-site trees
//! 3. Lays out every tree
//! 4. Renders rectangles under the chosen color scheme
//! 5. Writes output files

use super::models::ReportArgs;
use crate::aggregator::{
    build_collapsed_stacks, calculate_hot_paths, generate_text_summary, thread_collapsed_text,
    Process,
};
use crate::flamegraph::{ColorScheme, FlamegraphConfig};
use crate::output::{build_report, write_html, write_report_json, write_text, CaptureInfo};
use crate::parser::read_input;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Path of the written HTML report
///
/// # Errors
/// * Unknown color scheme or bad arguments
/// * Unreadable or malformed input file
/// * Corrupt call-site tree (internal bug)
/// * File write errors
pub fn execute_report(args: ReportArgs) -> Result<PathBuf> {
    let start_time = Instant::now();
    let color = validate_args(&args)?;

    // Step 1: Read samples
    info!("Step 1/5: Reading samples from {}...", args.input.display());
    let input = read_input(&args.input)
        .with_context(|| format!("Failed to read samples from {}", args.input.display()))?;

    let capture = CaptureInfo {
        event: input.event.clone(),
        duration_secs: input.duration_secs,
    };

    // Step 2: Fold call chains
    info!("Step 2/5: Folding {} call chains...", input.samples.len());
    let mut process = Process::from_input(input);
    if let Some(pid) = args.pid {
        process.set_pid(pid);
    }
    if let Some(name) = &args.process_name {
        process.set_name(name.clone());
    }
    ensure_usable_samples(&process, &args.input)?;

    // Step 3: Layout
    info!("Step 3/5: Assigning offsets...");
    let finished = process.finish();

    // Step 4: Render
    info!("Step 4/5: Rendering {} threads ({} colors)...", finished.threads.len(), color);
    let title = args.title.clone().unwrap_or_else(|| {
        if finished.name.is_empty() {
            "Flamegraph Report".to_string()
        } else {
            format!("{} Flamegraph Report", finished.name)
        }
    });
    let config = FlamegraphConfig::new()
        .with_title(title)
        .with_width(args.width)
        .with_color(color);
    let report = build_report(&finished, &config, capture).context("Failed to render flamegraphs")?;

    // Step 5: Write outputs
    info!("Step 5/5: Writing output files...");
    write_html(&report, &args.output_html).context("Failed to write HTML report")?;
    info!("✓ Report written to: {}", args.output_html.display());

    if let Some(json_path) = &args.output_json {
        write_report_json(&report, json_path).context("Failed to write JSON report")?;
        info!("✓ JSON written to: {}", json_path.display());
    }

    if let Some(collapsed_path) = &args.output_collapsed {
        let mut text = String::new();
        for thread in &finished.threads {
            let stacks = build_collapsed_stacks(thread.tree.tree());
            text.push_str(&thread_collapsed_text(thread.tid, &stacks));
        }
        write_text(&text, collapsed_path).context("Failed to write collapsed stacks")?;
        info!("✓ Collapsed stacks written to: {}", collapsed_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("PROFILE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Process: {} ({})", finished.name, finished.pid);
        println!("Samples: {}", finished.num_samples);
        println!("Threads: {}", finished.threads.len());
        if finished.skipped.total() > 0 {
            println!("Skipped: {}", finished.skipped.summary());
        }
        for thread in &finished.threads {
            let stacks = build_collapsed_stacks(thread.tree.tree());
            let hot_paths = calculate_hot_paths(&stacks, thread.total_samples(), args.top_paths);
            debug!("Thread {}: {} unique paths", thread.tid, stacks.len());
            println!("\n{}", generate_text_summary(thread.tid, &hot_paths, stacks.len()));
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(args.output_html)
}

/// Fail when every sample of the input was rejected
///
/// **Public** - shared with the validate command
pub fn ensure_usable_samples(process: &Process, input: &Path) -> Result<()> {
    if process.num_samples() == 0 {
        anyhow::bail!(
            "No usable samples in {} ({})",
            input.display(),
            process.skipped().summary()
        );
    }
    Ok(())
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
///
/// # Returns
/// The parsed color scheme if arguments are valid
pub fn validate_args(args: &ReportArgs) -> Result<ColorScheme> {
    let color: ColorScheme = args.color.parse()?;

    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.width == 0 {
        anyhow::bail!("width must be greater than 0");
    }

    if args.width > 100_000 {
        anyhow::bail!("width is too large (max 100000)");
    }

    if args.print_summary && args.top_paths == 0 {
        anyhow::bail!("top_paths must be greater than 0");
    }

    Ok(color)
}
