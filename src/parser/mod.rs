//! Sample input parsing and schema definitions.
//!
//! This module handles:
//! - Reading sample files (JSON document or JSON Lines)
//! - Defining the input schema handed over by the acquisition side

pub mod samples;
pub mod schema;

// Re-export main types
pub use samples::{parse_json, parse_json_lines, read_input, InputFormat};
pub use schema::{ProcessInfo, ProfileInput, SampleRecord};
