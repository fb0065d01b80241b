//! Line-based scanner for `BEGIN:`/`END:` blocks.

use serde::Serialize;

const CALENDAR_BEGIN: &str = "BEGIN:VCALENDAR";
const CALENDAR_END: &str = "END:VCALENDAR";

/// Classification of a top-level block by its type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Timezone,
    Event,
    Other(String),
}

impl BlockKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "VTIMEZONE" => BlockKind::Timezone,
            "VEVENT" => BlockKind::Event,
            other => BlockKind::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Timezone => "VTIMEZONE",
            BlockKind::Event => "VEVENT",
            BlockKind::Other(tag) => tag,
        }
    }
}

/// A top-level VEVENT block together with its display properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Full block text, nested sub-blocks included, exactly as in the input.
    pub text: String,
    /// SUMMARY value, empty when absent.
    pub summary: String,
    /// UID value, empty when absent.
    pub uid: String,
    /// Raw DTSTART value, empty when absent.
    pub dtstart: String,
}

impl Event {
    fn from_block(text: String) -> Self {
        let summary = extract_property(&text, "SUMMARY");
        let uid = extract_property(&text, "UID");
        let dtstart = extract_property(&text, "DTSTART");

        Event {
            text,
            summary,
            uid,
            dtstart,
        }
    }

    /// Bytes this event adds to an assembled document (text plus its newline).
    pub fn encoded_len(&self) -> u64 {
        self.text.len() as u64 + 1
    }
}

/// Result of scanning one iCalendar document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCalendar {
    /// Non-blank lines outside any block, in input order.
    pub header_lines: Vec<String>,
    /// Every top-level VTIMEZONE block, in input order.
    pub timezones: Vec<String>,
    pub events: Vec<Event>,
    /// Type tag of a block still open at end of input. Its lines are dropped.
    pub unterminated_block: Option<String>,
}

/// Summary counts for a document, without splitting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarInfo {
    pub events: usize,
    pub timezones: usize,
    pub header_lines: usize,
    /// Input size in bytes.
    pub size: u64,
}

impl ParsedCalendar {
    pub fn info(&self, content: &str) -> CalendarInfo {
        CalendarInfo {
            events: self.events.len(),
            timezones: self.timezones.len(),
            header_lines: self.header_lines.len(),
            size: content.len() as u64,
        }
    }
}

enum ScanState<'a> {
    Outside,
    Inside {
        kind: BlockKind,
        depth: usize,
        lines: Vec<&'a str>,
    },
}

/// Scan a document into header lines, timezone blocks and events.
///
/// Never fails: unknown block types are skipped and a block left open at the
/// end of input is dropped. Lines are split on `\n` only, so a trailing `\r`
/// stays part of the line text.
pub fn parse(content: &str) -> ParsedCalendar {
    let mut calendar = ParsedCalendar::default();
    let mut state = ScanState::Outside;

    for line in content.split('\n') {
        let stripped = line.trim();

        if stripped == CALENDAR_BEGIN || stripped == CALENDAR_END {
            continue;
        }

        match &mut state {
            ScanState::Outside => {
                if let Some(tag) = stripped.strip_prefix("BEGIN:") {
                    state = ScanState::Inside {
                        kind: BlockKind::from_tag(tag),
                        depth: 1,
                        lines: vec![line],
                    };
                } else if !stripped.is_empty() {
                    calendar.header_lines.push(line.to_string());
                }
            }
            ScanState::Inside { kind, depth, lines } => {
                lines.push(line);

                if stripped.starts_with("BEGIN:") {
                    *depth += 1;
                } else if stripped.starts_with("END:") {
                    *depth -= 1;
                }

                if *depth == 0 {
                    let text = lines.join("\n");
                    match kind {
                        BlockKind::Timezone => calendar.timezones.push(text),
                        BlockKind::Event => calendar.events.push(Event::from_block(text)),
                        BlockKind::Other(tag) => {
                            tracing::debug!(block = %tag, "Skipping unsupported block");
                        }
                    }
                    state = ScanState::Outside;
                }
            }
        }
    }

    if let ScanState::Inside { kind, lines, .. } = state {
        tracing::warn!(
            block = kind.tag(),
            lines = lines.len(),
            "Dropping block left open at end of input"
        );
        calendar.unterminated_block = Some(kind.tag().to_string());
    }

    tracing::debug!(
        header_lines = calendar.header_lines.len(),
        timezones = calendar.timezones.len(),
        events = calendar.events.len(),
        "Parsed calendar"
    );

    calendar
}

/// Value of the first `NAME:` or `NAME;PARAM=..:` line in a block.
///
/// Handles parameterized properties (`DTSTART;TZID=Europe/Paris:...`) by
/// taking everything after the first `:`. Lines inside nested sub-blocks are
/// searched too. Returns an empty string when the property is absent.
pub fn extract_property(block: &str, name: &str) -> String {
    block
        .split('\n')
        .find(|line| {
            line.strip_prefix(name)
                .is_some_and(|rest| rest.starts_with(':') || rest.starts_with(';'))
        })
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}
