//! Terminal and JSON rendering of split results.

use std::path::Path;

use calcut_core::ics::{CalendarInfo, Event};
use calcut_core::size::format_bytes;
use calcut_core::split::{OversizedEvent, SplitMode, SplitOptions, SplitOutcome, SplitUnit};
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn split_header(
    input: &Path,
    info: &CalendarInfo,
    output_dir: &Path,
    options: &SplitOptions,
) -> String {
    let mut lines = vec![
        format!("📅 {}", "Splitting calendar".bold()),
        format!(
            "   Input:  {} ({}, {} events)",
            input.display(),
            format_bytes(info.size),
            info.events
        ),
        format!("   Output: {}", output_dir.display()),
    ];

    match options.mode {
        SplitMode::PerEvent => lines.push("   Mode:   one file per event".to_string()),
        SplitMode::BySize { max_bytes } => {
            lines.push(format!("   Max:    {} per file", format_bytes(max_bytes)))
        }
    }

    lines.join("\n")
}

pub fn event_unit(index: usize, total: usize, unit: &SplitUnit, summary: &str) -> String {
    let line = format!("  [{}/{}] {}", index, total, unit.filename);
    if summary.is_empty() {
        line
    } else {
        format!("{}\n        {}", line, summary.dimmed())
    }
}

pub fn chunk_unit(index: usize, unit: &SplitUnit) -> String {
    let detail = format!(
        "({}, {} {})",
        format_bytes(unit.byte_size),
        unit.event_count,
        pluralize("event", unit.event_count)
    );
    format!("  [{}] {}  {}", index, unit.filename, detail.dimmed())
}

pub fn oversized(warning: &OversizedEvent) -> String {
    format!(
        "  ⚠️  Event '{}' ({}) exceeds {} on its own",
        warning.summary,
        format_bytes(warning.size),
        format_bytes(warning.max_bytes)
    )
    .yellow()
    .to_string()
}

pub fn done(count: usize, dir: &Path) -> String {
    format!(
        "{} {} {} written → {}",
        "✅".green(),
        count,
        pluralize("file", count),
        dir.display()
    )
}

pub fn info(input: &Path, info: &CalendarInfo) -> String {
    [
        format!("📅 {}", input.display().bold()),
        format!("   Size:         {}", format_bytes(info.size)),
        format!("   Events:       {}", info.events),
        format!("   Timezones:    {}", info.timezones),
        format!("   Header lines: {}", info.header_lines),
    ]
    .join("\n")
}

pub fn event_row(index: usize, event: &Event) -> String {
    let summary = if event.summary.is_empty() {
        "(No title)".dimmed().to_string()
    } else {
        event.summary.clone()
    };
    let start = if event.dtstart.is_empty() {
        "-".to_string()
    } else {
        event.dtstart.clone()
    };

    format!(
        "  {:>4}  {:<16}  {}  {}",
        index,
        start,
        summary,
        event.uid.dimmed()
    )
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Machine-readable summary of a split, printed with `--json`.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub success: bool,
    pub total_events: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    pub files: Vec<ManifestFile>,
    pub warnings: Vec<OversizedEvent>,
}

#[derive(Debug, Serialize)]
pub struct ManifestFile {
    pub filename: String,
    pub events: usize,
    pub size: u64,
}

impl Manifest {
    pub fn new(outcome: &SplitOutcome, output_dir: &Path) -> Self {
        Manifest {
            success: true,
            total_events: outcome.total_events,
            output_dir: Some(output_dir.display().to_string()),
            files: outcome
                .units
                .iter()
                .map(|u| ManifestFile {
                    filename: u.filename.clone(),
                    events: u.event_count,
                    size: u.byte_size,
                })
                .collect(),
            warnings: outcome.oversized.clone(),
        }
    }

    /// Manifest for an input without events: nothing written.
    pub fn empty() -> Self {
        Manifest {
            success: true,
            total_events: 0,
            output_dir: None,
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
