//! Sample file reader.
//!
//! Accepts either one JSON document ([`ProfileInput`]) or JSON Lines where
//! every line is a single [`SampleRecord`]. The format is picked from the
//! file extension.

use super::schema::{ProfileInput, SampleRecord};
use crate::utils::config::JSON_LINES_EXTENSIONS;
use crate::utils::error::ParseError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Supported input encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    JsonLines,
}

impl InputFormat {
    /// Pick the format from a path's extension (JSON unless `.jsonl`/`.ndjson`)
    pub fn detect(path: &Path) -> Self {
        let is_lines = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                JSON_LINES_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_lines {
            Self::JsonLines
        } else {
            Self::Json
        }
    }
}

/// Read a sample file from disk
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::IoError` - file cannot be opened or read
/// * `ParseError::JsonError` - document is not valid JSON for the schema
/// * `ParseError::InvalidRecord` - a JSON Lines record is malformed
pub fn read_input(path: impl AsRef<Path>) -> Result<ProfileInput, ParseError> {
    let path = path.as_ref();
    let format = InputFormat::detect(path);
    info!("Reading samples from {} ({:?})", path.display(), format);

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let input = match format {
        InputFormat::Json => parse_json(reader)?,
        InputFormat::JsonLines => parse_json_lines(reader)?,
    };

    debug!("Read {} sample records", input.samples.len());
    Ok(input)
}

/// Parse a full profile document
pub fn parse_json(reader: impl Read) -> Result<ProfileInput, ParseError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse one sample record per line; blank lines are ignored.
///
/// Process information is not part of the line format and stays at its
/// default; callers fill it in.
pub fn parse_json_lines(reader: impl BufRead) -> Result<ProfileInput, ParseError> {
    let mut samples = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: SampleRecord =
            serde_json::from_str(trimmed).map_err(|e| ParseError::InvalidRecord {
                line: index + 1,
                message: e.to_string(),
            })?;
        samples.push(record);
    }

    Ok(ProfileInput {
        samples,
        ..Default::default()
    })
}
