//! ICS block scanning and document assembly.
//!
//! Works on raw text lines rather than a property model: blocks are copied
//! through byte for byte, so nothing the splitter does can alter an event.

mod generate;
mod parse;

pub use generate::{Skeleton, build_document};
pub use parse::{BlockKind, CalendarInfo, Event, ParsedCalendar, extract_property, parse};
