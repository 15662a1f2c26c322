//! Configuration and constants for the CLI.

/// Current JSON export schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// SVG geometry (pixels)
pub const SVG_CANVAS_WIDTH: usize = 1124;
pub const SVG_NODE_HEIGHT: usize = 17;
pub const SVG_RECT_HEIGHT: usize = 15;
pub const FONT_SIZE: usize = 12;

// Label fitting: monospace glyph advance at FONT_SIZE, and the narrowest
// rectangle that gets any label at all.
pub const CHAR_WIDTH: f64 = 7.0;
pub const MIN_LABEL_WIDTH: f64 = 35.0;

/// Color scheme used when none is requested
pub const DEFAULT_COLOR_SCHEME: &str = "hot";

/// Default number of hot paths printed by `--summary`
pub const DEFAULT_TOP_PATHS: usize = 10;

/// File extensions read as one JSON sample record per line
pub const JSON_LINES_EXTENSIONS: &[&str] = &["jsonl", "ndjson"];
