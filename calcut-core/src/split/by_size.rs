//! Greedy packing of events into size-bounded documents.

use super::{OversizedEvent, SplitOutcome, SplitUnit};
use crate::filename::chunk_filename;
use crate::ics::{Event, ParsedCalendar, Skeleton};

/// Running state of the size-bounded pass.
struct Packer<'a> {
    skeleton: Skeleton<'a>,
    prefix: Option<&'a str>,
    current: Vec<&'a str>,
    current_size: u64,
    units: Vec<SplitUnit>,
}

impl<'a> Packer<'a> {
    fn new(skeleton: Skeleton<'a>, prefix: Option<&'a str>) -> Self {
        Packer {
            current_size: skeleton.size(),
            skeleton,
            prefix,
            current: Vec::new(),
            units: Vec::new(),
        }
    }

    fn push(&mut self, event: &'a Event) {
        self.current.push(&event.text);
        self.current_size += event.encoded_len();
    }

    /// Close the current chunk as the next unit. Chunk numbers only advance here.
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }

        let filename = chunk_filename(self.prefix, self.units.len() + 1);
        let events = std::mem::take(&mut self.current);
        let content = self.skeleton.render(events.iter().copied());
        let unit = SplitUnit::new(filename, content, events.len());

        tracing::debug!(
            filename = %unit.filename,
            events = unit.event_count,
            bytes = unit.byte_size,
            "Closed chunk"
        );

        self.units.push(unit);
        self.current_size = self.skeleton.size();
    }
}

/// Pack events in input order into documents of at most `max_bytes`.
///
/// Each document pays the skeleton size once, and each event its text plus
/// one newline. An event that cannot fit even alone with the skeleton gets a
/// document of its own that exceeds the budget; it is reported in
/// [`SplitOutcome::oversized`] rather than dropped or truncated.
pub fn by_size(calendar: &ParsedCalendar, prefix: Option<&str>, max_bytes: u64) -> SplitOutcome {
    let skeleton = Skeleton::of(calendar);
    let skeleton_size = skeleton.size();
    let mut packer = Packer::new(skeleton, prefix);
    let mut oversized = Vec::new();

    for (i, event) in calendar.events.iter().enumerate() {
        let event_bytes = event.encoded_len();

        if skeleton_size + event_bytes > max_bytes {
            packer.flush();
            packer.push(event);
            packer.flush();

            let filename = packer
                .units
                .last()
                .map(|u| u.filename.clone())
                .unwrap_or_default();
            tracing::debug!(
                summary = %event.summary,
                size = skeleton_size + event_bytes,
                max_bytes,
                filename = %filename,
                "Event exceeds the size limit on its own"
            );
            oversized.push(OversizedEvent {
                index: i + 1,
                summary: event.summary.clone(),
                size: skeleton_size + event_bytes,
                max_bytes,
                filename,
            });
            continue;
        }

        if packer.current_size + event_bytes > max_bytes {
            packer.flush();
        }
        packer.push(event);
    }

    packer.flush();

    SplitOutcome {
        total_events: calendar.events.len(),
        units: packer.units,
        oversized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::parse;
    use crate::split::test_support::*;

    /// Calendar whose events each encode to exactly `event_bytes` bytes.
    fn calendar_with_sized_events(count: usize, event_bytes: usize) -> ParsedCalendar {
        let mut ics = String::from(
            "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//Test//EN\nBEGIN:VTIMEZONE\nTZID:UTC\nEND:VTIMEZONE\n",
        );
        for i in 0..count {
            let head = format!("BEGIN:VEVENT\nUID:sized-{i}\nSUMMARY:");
            let tail = "\nEND:VEVENT";
            let padding = event_bytes - 1 - head.len() - tail.len();
            ics.push_str(&head);
            ics.push_str(&"x".repeat(padding));
            ics.push_str(tail);
            ics.push('\n');
        }
        ics.push_str("END:VCALENDAR\n");

        let calendar = parse(&ics);
        assert!(calendar.events.iter().all(|e| e.encoded_len() == event_bytes as u64));
        calendar
    }

    fn event_counts(outcome: &SplitOutcome) -> Vec<usize> {
        outcome.units.iter().map(|u| u.event_count).collect()
    }

    #[test]
    fn test_by_size_packs_two_per_chunk() {
        let calendar = calendar_with_sized_events(5, 100);
        let skeleton_size = Skeleton::of(&calendar).size();

        let outcome = by_size(&calendar, None, skeleton_size + 200);

        assert_eq!(event_counts(&outcome), vec![2, 2, 1]);
        assert!(outcome.oversized.is_empty());
        for unit in &outcome.units {
            assert!(unit.byte_size <= skeleton_size + 200);
        }
        assert_eq!(outcome.units[0].byte_size, skeleton_size + 200);
    }

    #[test]
    fn test_by_size_one_byte_short_of_two_events() {
        let calendar = calendar_with_sized_events(5, 100);
        let skeleton_size = Skeleton::of(&calendar).size();

        let outcome = by_size(&calendar, None, skeleton_size + 199);

        assert_eq!(event_counts(&outcome), vec![1, 1, 1, 1, 1]);
        assert!(outcome.oversized.is_empty());
    }

    #[test]
    fn test_by_size_filenames_are_sequential() {
        let calendar = calendar_with_sized_events(5, 100);
        let skeleton_size = Skeleton::of(&calendar).size();

        let outcome = by_size(&calendar, Some("backup"), skeleton_size + 200);

        let names: Vec<_> = outcome.units.iter().map(|u| u.filename.as_str()).collect();
        assert_eq!(names, vec!["backup_001.ics", "backup_002.ics", "backup_003.ics"]);
    }

    #[test]
    fn test_by_size_everything_fits_in_one_chunk() {
        let calendar = calendar_with_summaries(&["A", "B", "C"]);

        let outcome = by_size(&calendar, None, 1024 * 1024);

        assert_eq!(event_counts(&outcome), vec![3]);
        assert_eq!(outcome.units[0].filename, "part_001.ics");
        assert_self_contained(&calendar, &outcome.units);
    }

    #[test]
    fn test_by_size_oversized_event_gets_its_own_chunk() {
        let mut ics = String::from("BEGIN:VCALENDAR\nVERSION:2.0\n");
        ics.push_str("BEGIN:VEVENT\nUID:small-1\nSUMMARY:small\nEND:VEVENT\n");
        ics.push_str("BEGIN:VEVENT\nUID:small-2\nSUMMARY:small\nEND:VEVENT\n");
        ics.push_str(&format!(
            "BEGIN:VEVENT\nUID:huge\nSUMMARY:huge\nDESCRIPTION:{}\nEND:VEVENT\n",
            "y".repeat(500)
        ));
        ics.push_str("BEGIN:VEVENT\nUID:small-3\nSUMMARY:small\nEND:VEVENT\n");
        ics.push_str("END:VCALENDAR\n");
        let calendar = parse(&ics);

        let outcome = by_size(&calendar, None, 200);

        assert_eq!(event_counts(&outcome), vec![2, 1, 1]);
        let names: Vec<_> = outcome.units.iter().map(|u| u.filename.as_str()).collect();
        assert_eq!(names, vec!["part_001.ics", "part_002.ics", "part_003.ics"]);
        assert!(outcome.units[1].byte_size > 200);
        assert!(outcome.units[1].content.contains("UID:huge"));

        assert_eq!(outcome.oversized.len(), 1);
        let warning = &outcome.oversized[0];
        assert_eq!(warning.index, 3);
        assert_eq!(warning.summary, "huge");
        assert_eq!(warning.max_bytes, 200);
        assert_eq!(warning.filename, "part_002.ics");
        assert_eq!(warning.size, outcome.units[1].byte_size);

        assert_order_preserved(&calendar, &outcome.units);
        assert_self_contained(&calendar, &outcome.units);
    }

    #[test]
    fn test_by_size_consecutive_oversized_events() {
        let calendar = calendar_with_sized_events(3, 300);

        let outcome = by_size(&calendar, None, 100);

        assert_eq!(event_counts(&outcome), vec![1, 1, 1]);
        assert_eq!(outcome.oversized.len(), 3);
        let names: Vec<_> = outcome.units.iter().map(|u| u.filename.as_str()).collect();
        assert_eq!(names, vec!["part_001.ics", "part_002.ics", "part_003.ics"]);
    }

    #[test]
    fn test_by_size_respects_ceiling_except_for_oversized_singletons() {
        let summaries: Vec<String> = (0..40)
            .map(|i| format!("Event {} {}", i, "z".repeat(i * 7 % 90)))
            .collect();
        let refs: Vec<&str> = summaries.iter().map(String::as_str).collect();
        let calendar = calendar_with_summaries(&refs);
        let skeleton_size = Skeleton::of(&calendar).size();

        for max_bytes in [skeleton_size + 150, skeleton_size + 400, 1024, 4096] {
            let outcome = by_size(&calendar, None, max_bytes);

            let total: usize = outcome.units.iter().map(|u| u.event_count).sum();
            assert_eq!(total, calendar.events.len());
            assert!(outcome.units.iter().all(|u| u.event_count > 0));

            for unit in &outcome.units {
                if unit.byte_size > max_bytes {
                    assert_eq!(unit.event_count, 1, "{} over budget", unit.filename);
                    assert!(outcome.oversized.iter().any(|o| o.filename == unit.filename));
                }
            }

            assert_order_preserved(&calendar, &outcome.units);
            assert_self_contained(&calendar, &outcome.units);
        }
    }

    #[test]
    fn test_by_size_counts_utf8_bytes() {
        let calendar = calendar_with_summaries(&["Réunion à Zürich", "会議"]);
        let skeleton_size = Skeleton::of(&calendar).size();
        let both: u64 = calendar.events.iter().map(|e| e.encoded_len()).sum();

        let outcome = by_size(&calendar, None, skeleton_size + both);
        assert_eq!(event_counts(&outcome), vec![2]);
        assert_eq!(outcome.units[0].byte_size, skeleton_size + both);

        let outcome = by_size(&calendar, None, skeleton_size + both - 1);
        assert_eq!(event_counts(&outcome), vec![1, 1]);
    }
}
