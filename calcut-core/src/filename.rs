//! Output filename generation.

/// Characters that are not allowed in generated filenames on common filesystems.
pub const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Fallback used when sanitizing leaves nothing behind.
const UNTITLED: &str = "untitled";

/// Fallback name segment for events without a SUMMARY.
const UNNAMED_EVENT: &str = "event";

/// Fallback tag for size-bounded chunks when no prefix is configured.
const DEFAULT_CHUNK_TAG: &str = "part";

/// Turn arbitrary text into a filename segment using [`UNSAFE_FILENAME_CHARS`].
pub fn sanitize_filename(name: &str) -> String {
    sanitize_filename_with(name, UNSAFE_FILENAME_CHARS)
}

/// Turn arbitrary text into a filename segment.
///
/// Removes every character in `unsafe_chars`, replaces spaces with `_`,
/// collapses runs of `_` and trims `_` from both ends. Returns `untitled`
/// when nothing is left.
pub fn sanitize_filename_with(name: &str, unsafe_chars: &[char]) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.chars().filter(|c| !unsafe_chars.contains(c)) {
        let c = if c == ' ' { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Filename for the `index`-th (1-based) event in per-event mode.
///
/// `{prefix}_{index:03}_{summary}.ics`, the prefix segment left out entirely
/// when there is no prefix.
pub fn event_filename(prefix: Option<&str>, index: usize, summary: &str) -> String {
    let name = if summary.is_empty() {
        UNNAMED_EVENT.to_string()
    } else {
        sanitize_filename(summary)
    };

    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}_{:03}_{}.ics", prefix, index, name),
        None => format!("{:03}_{}.ics", index, name),
    }
}

/// Filename for the `index`-th (1-based) chunk in size-bounded mode.
pub fn chunk_filename(prefix: Option<&str>, index: usize) -> String {
    let tag = prefix.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_CHUNK_TAG);
    format!("{}_{:03}.ics", tag, index)
}
