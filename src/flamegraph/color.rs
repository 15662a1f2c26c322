//! Fill colors for flamegraph rectangles.
//!
//! Three schemes, chosen once per report:
//! - `hot`: warm ramp keyed by the node's share of all samples
//! - `dso`: pastel keyed by a stable hash of the module name
//! - `legacy`: warm "random" look, seeded by the frame identity
//!
//! Hashing is FNV-1a so colors are identical across runs and platforms.

use crate::aggregator::call_tree::Frame;
use crate::utils::error::RenderError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Coloring strategy for a whole report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Hot,
    Dso,
    Legacy,
}

impl ColorScheme {
    /// Every accepted scheme name
    pub const NAMES: &'static [&'static str] = &["hot", "dso", "legacy"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Dso => "dso",
            Self::Legacy => "legacy",
        }
    }
}

impl FromStr for ColorScheme {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(Self::Hot),
            "dso" => Ok(Self::Dso),
            "legacy" => Ok(Self::Legacy),
            other => Err(RenderError::UnknownColorScheme {
                requested: other.to_string(),
                valid: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Darker outline for a fill color
    pub fn border(self) -> Self {
        Self {
            r: self.r.saturating_sub(50),
            g: self.g.saturating_sub(50),
            b: self.b.saturating_sub(50),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

fn fnv1a(bytes: impl IntoIterator<Item = u8>) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Map a hash onto [0, 1]
fn unit(hash: u64) -> f64 {
    hash as f64 / u64::MAX as f64
}

/// `base + span * t`, with t in [0, 1]
fn channel(base: u8, span: u8, t: f64) -> u8 {
    base.saturating_add((span as f64 * t.clamp(0.0, 1.0)) as u8)
}

/// Hot ramp: ratio 0 is pale yellow, ratio 1 is deep orange-red.
///
/// A pure function of `ratio`.
pub fn hot_color(ratio: f64) -> Rgb {
    let cold = 1.0 - ratio.clamp(0.0, 1.0);
    Rgb::new(channel(245, 10, cold), channel(110, 105, cold), 100)
}

/// Pastel color for a module name
pub fn dso_color(module: &str) -> Rgb {
    let forward = unit(fnv1a(module.bytes()));
    let backward = unit(fnv1a(module.bytes().rev()));
    Rgb::new(
        channel(170, 80, backward),
        channel(180, 70, forward),
        channel(170, 80, backward),
    )
}

/// Warm pseudo-random color seeded by the frame identity
pub fn legacy_color(frame: &Frame) -> Rgb {
    let name = frame.function_name.bytes();
    let module = frame.module.bytes();
    let forward = unit(fnv1a(name.clone().chain([0]).chain(module.clone())));
    let backward = unit(fnv1a(module.rev().chain([0]).chain(name.rev())));
    Rgb::new(
        channel(175, 50, backward),
        channel(60, 180, forward),
        channel(60, 55, backward),
    )
}
