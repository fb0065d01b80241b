//! One output document per event.

use super::{SplitOutcome, SplitUnit};
use crate::filename::event_filename;
use crate::ics::{ParsedCalendar, Skeleton};

/// Emit each event in its own document, named `{prefix_}{index:03}_{summary}.ics`.
pub fn per_event(calendar: &ParsedCalendar, prefix: Option<&str>) -> SplitOutcome {
    let skeleton = Skeleton::of(calendar);

    let units = calendar
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let filename = event_filename(prefix, i + 1, &event.summary);
            SplitUnit::new(filename, skeleton.render([event.text.as_str()]), 1)
        })
        .collect();

    SplitOutcome {
        total_events: calendar.events.len(),
        units,
        oversized: Vec::new(),
    }
}
