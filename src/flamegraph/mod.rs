//! Flamegraph layout and rendering.
//!
//! This module turns finished call-site trees into nested rectangles:
//! - `layout` stamps linear sample offsets onto every call site
//! - `color` implements the hot / dso / legacy color schemes
//! - `generator` produces rectangle geometry and metadata
//! - `svg` serializes rectangles into an SVG element

pub mod color;
pub mod generator;
pub mod layout;
pub mod svg;

// Re-export main types
pub use color::{ColorScheme, Rgb};
pub use generator::{graph_height, FlameRect, FlamegraphConfig, Renderer};
pub use layout::{assign_offsets, LaidOutTree};
pub use svg::render_svg;
