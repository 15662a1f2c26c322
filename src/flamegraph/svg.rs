//! SVG emission for rendered rectangles.
//!
//! Each call site becomes a `<g class="n">` group holding a tooltip, the
//! rectangle and its label. The group carries `data-*` attributes with
//! the full metadata, which is all an interactive client needs for
//! zoom-to-subtree, search highlighting and offset navigation.

use super::generator::FlameRect;
use crate::utils::config::FONT_SIZE;
use std::fmt::Write;

/// Space above the graph for the Search / Unzoom buttons
const TOOLBAR_HEIGHT: f64 = 50.0;

/// Render rectangles of one thread as a standalone `<svg>` element.
///
/// `graph_height` is the height the rectangles were laid out against
/// (see [`super::generator::graph_height`]).
pub fn render_svg(rects: &[FlameRect], width: usize, graph_height: usize) -> String {
    let total_height = graph_height as f64 + TOOLBAR_HEIGHT;
    let mut svg = String::with_capacity(rects.len() * 400 + 1024);

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{width}" height="{total_height}" style="border: 1px solid black;">"#
    );
    svg.push_str(
        r##"<defs><linearGradient id="background_gradient" y1="0" y2="1" x1="0" x2="0"><stop stop-color="#eeeeee" offset="5%"/><stop stop-color="#efefb1" offset="90%"/></linearGradient></defs>"##,
    );
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{width}" height="{total_height}" fill="url(#background_gradient)"/>"#
    );

    let _ = write!(
        svg,
        r#"<g class="frames" transform="translate(0,{TOOLBAR_HEIGHT})">"#
    );
    for rect in rects {
        write_rect(&mut svg, rect);
    }
    svg.push_str("</g>");

    write_toolbar(&mut svg, width);
    svg.push_str("</svg>");
    svg
}

fn write_rect(svg: &mut String, rect: &FlameRect) {
    let name = escape_xml(&rect.label);
    let module = escape_xml(&rect.module);

    let _ = write!(
        svg,
        r#"<g class="n" data-name="{name}" data-module="{module}" data-depth="{}" data-offset="{}" data-samples="{}">"#,
        rect.depth, rect.offset, rect.sample_count
    );
    let _ = write!(
        svg,
        "<title>{name} | {module} ({} samples: {:.2}%)</title>",
        rect.sample_count, rect.percentage
    );
    let _ = write!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{}" fill="{}" style="stroke:{}"/>"#,
        rect.x, rect.y, rect.width, rect.height, rect.fill, rect.border
    );
    if let Some(label) = &rect.display_label {
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="{FONT_SIZE}" font-family="Monospace" pointer-events="none">{}</text>"#,
            rect.x + 2.0,
            rect.y + 12.0,
            escape_xml(label)
        );
    }
    svg.push_str("</g>");
}

/// Search and Unzoom buttons.
///
/// Inert on their own: a page script attaches to `search_rect` and
/// `zoom_rect` and drives zoom and search from the `data-*` attributes.
fn write_toolbar(svg: &mut String, width: usize) {
    let search_x = width.saturating_sub(95);
    let _ = write!(
        svg,
        r#"<rect id="search_rect" class="t" rx="10" ry="10" x="{search_x}" y="10" width="80" height="30" fill="rgb(255,255,255)" style="stroke:rgb(0,0,0)"/><text id="search_text" class="t" x="{}" y="30">Search</text>"#,
        search_x + 15
    );
    svg.push_str(
        r#"<rect id="zoom_rect" class="t" rx="10" ry="10" x="10" y="10" width="80" height="30" fill="rgb(255,255,255)" style="display:none;stroke:rgb(0,0,0)"/><text id="zoom_text" class="t" x="21" y="30" style="display:none">Unzoom</text>"#,
    );
}

/// Escape text for use in XML content and attribute values
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
