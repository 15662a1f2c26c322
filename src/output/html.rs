//! HTML report writer.
//!
//! A self-contained page: a header with process and capture details,
//! then one SVG flamegraph per thread, main thread first.

use super::report::Report;
use super::text::write_text;
use crate::flamegraph::svg::{escape_xml, render_svg};
use crate::utils::error::OutputError;
use std::fmt::Write;
use std::path::Path;

/// Render the report page
pub fn render_html(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n");
    let _ = writeln!(html, "<title>{}</title>", escape_xml(&report.title));
    html.push_str(
        "<style type=\"text/css\">.n:hover { stroke:black; stroke-width:0.5; cursor:pointer; } .t:hover { cursor:pointer; }</style>\n",
    );
    html.push_str("</head>\n<body style='font-family: Monospace;'>\n");

    write_header(&mut html, report);

    for thread in &report.threads {
        let heading = if thread.is_main { "Main Thread" } else { "Thread" };
        let _ = writeln!(
            html,
            "<br/><br/><b>{} {} ({} samples):</b><br/>",
            heading, thread.tid, thread.total_samples
        );
        html.push_str(&render_svg(&thread.rects, report.width, thread.graph_height));
        html.push('\n');
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn write_header(html: &mut String, report: &Report) {
    html.push_str("<div style='display:inline-block;'>\n");
    let _ = writeln!(
        html,
        "<font size='8'>{}</font><br/><br/>",
        escape_xml(&report.title)
    );
    let _ = writeln!(
        html,
        "Process : {} ({})<br/>",
        escape_xml(&report.process),
        report.pid
    );
    let _ = writeln!(
        html,
        "Date&nbsp;&nbsp;&nbsp;&nbsp;: {}<br/>",
        report.generated_at.format("%Y-%m-%d (%A) %H:%M:%S")
    );
    let _ = writeln!(html, "Threads : {}<br/>", report.threads.len());
    let _ = writeln!(html, "Samples : {}<br/>", report.num_samples);
    if report.skipped.total() > 0 {
        let _ = writeln!(html, "Skipped : {}<br/>", report.skipped.summary());
    }
    if let Some(event) = &report.event {
        let _ = writeln!(html, "Event&nbsp;&nbsp;&nbsp;: {}<br/>", escape_xml(event));
    }
    if let Some(duration) = report.duration_secs {
        let _ = writeln!(html, "Duration: {} seconds<br/>", duration);
    }
    let _ = writeln!(html, "Colors&nbsp;&nbsp;: {}<br/>", report.color_scheme);
    html.push_str("</div>\n");
}

/// Write the HTML report to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_html(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_text(&render_html(report), output_path)
}
