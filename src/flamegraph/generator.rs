//! Flamegraph rectangle generation.
//!
//! Turns a laid-out call-site tree into an ordered list of rectangle
//! descriptors:
//! - Horizontal extent proportional to the node's offset range
//! - Root at the bottom, one row per tree depth
//! - Fill color from the report's color scheme
//! - Full metadata (depth, offset, samples, module) for client-side zoom,
//!   search and navigation

use super::color::{dso_color, hot_color, legacy_color, ColorScheme, Rgb};
use super::layout::LaidOutTree;
use crate::aggregator::call_tree::{CallSite, CallTree};
use crate::utils::config::{
    CHAR_WIDTH, MIN_LABEL_WIDTH, SVG_CANVAS_WIDTH, SVG_NODE_HEIGHT, SVG_RECT_HEIGHT,
};
use crate::utils::error::{InvariantViolation, RenderError};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    pub color: ColorScheme,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Flamegraph Report".to_string(),
            width: SVG_CANVAS_WIDTH,
            color: ColorScheme::default(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: ColorScheme) -> Self {
        self.color = color;
        self
    }
}

/// One rendered call site
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlameRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    /// Row index; children of the synthetic root are depth 0
    pub depth: usize,
    pub offset: u64,
    pub sample_count: u64,

    /// Share of the thread's samples, in percent
    pub percentage: f64,

    /// Full, untruncated function name
    pub label: String,

    /// What fits inside the rectangle, if anything
    pub display_label: Option<String>,

    pub module: String,
    pub fill: Rgb,
    pub border: Rgb,
}

/// Renders laid-out trees under one color scheme.
///
/// Owns the module -> color cache used by the `dso` scheme, so separate
/// reports never share color state.
#[derive(Debug, Clone)]
pub struct Renderer {
    scheme: ColorScheme,
    dso_colors: HashMap<String, Rgb>,
}

impl Renderer {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            dso_colors: HashMap::new(),
        }
    }

    /// Build a renderer from a scheme name, rejecting unknown names
    pub fn from_name(name: &str) -> Result<Self, RenderError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Produce one rectangle per call site below the root.
    ///
    /// **Public** - main entry point for rendering
    ///
    /// # Arguments
    /// * `tree` - Laid-out tree of one thread
    /// * `total_width` - Width in pixels the root's range maps onto
    ///
    /// # Returns
    /// Rectangles in pre-order, matching the offset assignment order
    ///
    /// # Errors
    /// * `RenderError::EmptyTree` - no samples were folded into the tree
    /// * `RenderError::Invariant` - counts or offsets are inconsistent
    pub fn render(
        &mut self,
        tree: &LaidOutTree,
        total_width: f64,
    ) -> Result<Vec<FlameRect>, RenderError> {
        let total = tree.total_samples();
        if total == 0 {
            return Err(RenderError::EmptyTree);
        }

        tree.tree().check_invariants()?;
        tree.check_tiling()?;

        let height = graph_height(tree.tree()) as f64;
        let mut rects = Vec::with_capacity(tree.tree().len().saturating_sub(1));

        for id in tree.preorder().skip(1) {
            let node = tree.node(id);
            if node.sample_count() == 0 {
                return Err(InvariantViolation::EmptyNode { node: id.index() }.into());
            }

            let offset = tree.offset(id);
            let ratio = node.sample_count() as f64 / total as f64;
            let x = offset as f64 / total as f64 * total_width;
            let width = ratio * total_width;
            let depth = node.depth() - 1;
            let y = height - ((depth + 1) * SVG_NODE_HEIGHT) as f64;
            let fill = self.color_for(node, ratio);

            rects.push(FlameRect {
                x,
                y,
                width,
                height: SVG_RECT_HEIGHT as f64,
                depth,
                offset,
                sample_count: node.sample_count(),
                percentage: ratio * 100.0,
                label: node.function_name().to_string(),
                display_label: get_truncated_name(node.function_name(), width),
                module: node.module().to_string(),
                fill,
                border: fill.border(),
            });
        }

        info!(
            "Rendered {} rectangles ({} samples, {} scheme)",
            rects.len(),
            total,
            self.scheme
        );
        Ok(rects)
    }

    fn color_for(&mut self, node: &CallSite, ratio: f64) -> Rgb {
        match self.scheme {
            ColorScheme::Hot => hot_color(ratio),
            ColorScheme::Dso => {
                let module = node.module();
                if let Some(color) = self.dso_colors.get(module) {
                    return *color;
                }
                let color = dso_color(module);
                debug!("Assigned {} to module '{}'", color, module);
                self.dso_colors.insert(module.to_string(), color);
                color
            }
            ColorScheme::Legacy => match node.frame() {
                Some(frame) => legacy_color(frame),
                None => hot_color(ratio),
            },
        }
    }
}

/// Pixel height of the rectangle area: one row per call depth
pub fn graph_height(tree: &CallTree) -> usize {
    tree.max_depth() * SVG_NODE_HEIGHT
}

/// Calculate truncated name for a node based on width.
///
/// No label at or below the minimum width; otherwise at most
/// `width / CHAR_WIDTH` characters, cutting longer names to leave room for
/// a `..` suffix. Counts characters, not bytes.
pub fn get_truncated_name(name: &str, width: f64) -> Option<String> {
    if width <= MIN_LABEL_WIDTH || name.is_empty() {
        return None;
    }

    let max_chars = (width / CHAR_WIDTH) as usize;
    if name.chars().count() <= max_chars {
        return Some(name.to_string());
    }

    let kept: String = name.chars().take(max_chars.saturating_sub(2)).collect();
    Some(format!("{kept}.."))
}
