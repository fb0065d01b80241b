//! Splitting a parsed calendar into stand-alone output documents.
//!
//! Two strategies share one contract: every event lands in exactly one unit,
//! input order is kept across and within units, and no unit is empty.

mod by_size;
mod per_event;

pub use by_size::by_size;
pub use per_event::per_event;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalcutError, CalcutResult};
use crate::ics::ParsedCalendar;
use crate::size::parse_size;

/// One output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitUnit {
    pub filename: String,
    pub content: String,
    pub event_count: usize,
    /// Byte length of `content`.
    pub byte_size: u64,
}

impl SplitUnit {
    fn new(filename: String, content: String, event_count: usize) -> Self {
        let byte_size = content.len() as u64;
        SplitUnit {
            filename,
            content,
            event_count,
            byte_size,
        }
    }
}

/// An event that exceeds the size budget even alone with the skeleton.
///
/// It still gets a unit of its own; this is reported so the caller can warn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OversizedEvent {
    /// 1-based position of the event in the input.
    pub index: usize,
    pub summary: String,
    /// Size of the event plus skeleton, in bytes.
    pub size: u64,
    pub max_bytes: u64,
    /// Filename of the unit the event was written to.
    pub filename: String,
}

/// Everything a split produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    pub total_events: usize,
    pub units: Vec<SplitUnit>,
    pub oversized: Vec<OversizedEvent>,
}

/// Which strategy to use, as named in config files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    PerEvent,
    BySize,
}

impl FromStr for ModeKind {
    type Err = CalcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-event" => Ok(ModeKind::PerEvent),
            "by-size" | "size" => Ok(ModeKind::BySize),
            _ => Err(CalcutError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::PerEvent => write!(f, "per-event"),
            ModeKind::BySize => write!(f, "by-size"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    PerEvent,
    BySize { max_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    pub mode: SplitMode,
    pub prefix: Option<String>,
}

impl SplitOptions {
    /// Validate user-facing options into a concrete split mode.
    ///
    /// - no mode and no size: per-event
    /// - a size without a mode: by-size
    /// - `by-size` without a size: configuration error
    /// - `per-event` ignores any size
    ///
    /// An empty prefix counts as no prefix.
    pub fn resolve(
        mode: Option<ModeKind>,
        max_size: Option<&str>,
        prefix: Option<&str>,
    ) -> CalcutResult<Self> {
        let max_size = max_size.map(str::trim).filter(|s| !s.is_empty());

        let mode = match (mode, max_size) {
            (Some(ModeKind::PerEvent), _) | (None, None) => SplitMode::PerEvent,
            (Some(ModeKind::BySize) | None, Some(size)) => SplitMode::BySize {
                max_bytes: parse_size(size)?,
            },
            (Some(ModeKind::BySize), None) => {
                return Err(CalcutError::Config(
                    "mode 'by-size' requires a maximum size (e.g. --max-size 1M)".into(),
                ));
            }
        };

        Ok(SplitOptions {
            mode,
            prefix: prefix.filter(|p| !p.is_empty()).map(str::to_string),
        })
    }
}

/// Split a calendar with the strategy chosen in `options`.
pub fn split(calendar: &ParsedCalendar, options: &SplitOptions) -> SplitOutcome {
    let prefix = options.prefix.as_deref();
    match options.mode {
        SplitMode::PerEvent => per_event(calendar, prefix),
        SplitMode::BySize { max_bytes } => by_size(calendar, prefix, max_bytes),
    }
}
