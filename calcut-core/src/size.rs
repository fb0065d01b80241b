//! Human-readable byte sizes.

use crate::error::{CalcutError, CalcutResult};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Longest suffixes first so `MB` is not read as a number ending in `B`.
const SUFFIXES: &[(&str, u64)] = &[
    ("GB", GIB),
    ("MB", MIB),
    ("KB", KIB),
    ("G", GIB),
    ("M", MIB),
    ("K", KIB),
];

/// Parse a size such as `512K`, `1.5M`, `2GB` or `1048576` into bytes.
///
/// Suffixes are case-insensitive and 1024-based. Suffixed values may be
/// fractional and are truncated to whole bytes; a bare number is a whole
/// count of bytes. The result must be greater than zero.
pub fn parse_size(input: &str) -> CalcutResult<u64> {
    let normalized = input.trim().to_uppercase();
    let invalid = |reason: &str| CalcutError::InvalidSize {
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let bytes = match SUFFIXES
        .iter()
        .find(|(suffix, _)| normalized.ends_with(suffix))
    {
        Some((suffix, multiplier)) => {
            let number = normalized[..normalized.len() - suffix.len()].trim();
            let value: f64 = number
                .parse()
                .map_err(|_| invalid("expected a number before the unit, e.g. 1.5M"))?;
            if !value.is_finite() || value < 0.0 {
                return Err(invalid("expected a positive number"));
            }
            (value * *multiplier as f64) as u64
        }
        None => normalized
            .parse::<u64>()
            .map_err(|_| invalid("expected a byte count or a number with K, M or G"))?,
    };

    if bytes == 0 {
        return Err(invalid("size must be greater than zero"));
    }

    Ok(bytes)
}

/// Format a byte count for display, e.g. `812 bytes`, `3.2 KB`, `1.5 MB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
