//! Reassembly of calendar documents from parsed blocks.

use super::parse::ParsedCalendar;

/// Build a complete calendar document.
///
/// Emits `BEGIN:VCALENDAR`, the header lines, the timezone blocks, the given
/// event blocks and `END:VCALENDAR`, each terminated by `\n`. Every output
/// document goes through here, so each one carries the full header and
/// timezone context.
pub fn build_document<'a, S>(
    header_lines: &[S],
    timezones: &[S],
    events: impl IntoIterator<Item = &'a str>,
) -> String
where
    S: AsRef<str>,
{
    let mut out = String::from("BEGIN:VCALENDAR\n");

    for part in header_lines.iter().chain(timezones) {
        out.push_str(part.as_ref());
        out.push('\n');
    }

    for event in events {
        out.push_str(event);
        out.push('\n');
    }

    out.push_str("END:VCALENDAR\n");
    out
}

/// Header lines and timezone blocks shared by every output document.
#[derive(Debug, Clone, Copy)]
pub struct Skeleton<'a> {
    pub header_lines: &'a [String],
    pub timezones: &'a [String],
}

impl<'a> Skeleton<'a> {
    pub fn of(calendar: &'a ParsedCalendar) -> Self {
        Skeleton {
            header_lines: &calendar.header_lines,
            timezones: &calendar.timezones,
        }
    }

    pub fn render<'e>(&self, events: impl IntoIterator<Item = &'e str>) -> String {
        build_document(self.header_lines, self.timezones, events)
    }

    /// Byte length of the document with no events in it.
    pub fn size(&self) -> u64 {
        self.render(std::iter::empty()).len() as u64
    }
}
