//! Core of calcut: split one iCalendar document into many smaller ones.
//!
//! - `ics` scans a document into header lines, timezone blocks and events,
//!   and reassembles documents from a subset of them
//! - `split` packs events into output units, one per event or size-bounded
//! - `sink` hands finished units to a destination (directory or memory)

pub mod config;
pub mod error;
pub mod filename;
pub mod ics;
pub mod sink;
pub mod size;
pub mod split;

pub use error::{CalcutError, CalcutResult};
pub use ics::{CalendarInfo, Event, ParsedCalendar, Skeleton, build_document, parse};
pub use split::{OversizedEvent, SplitMode, SplitOptions, SplitOutcome, SplitUnit, split};
