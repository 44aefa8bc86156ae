//! Timestamp Codec
//!
//! Converts between millisecond offsets and `HH:MM:SS.mmm` text.
//!
//! # Example
//!
//! ```rust
//! use wscribe_core::core::timestamp::{format_timestamp_with, parse_timestamp};
//!
//! let ms = parse_timestamp("00:01:02.345").unwrap();
//! assert_eq!(ms, 62_345.0);
//! assert_eq!(format_timestamp_with(ms, ',', false), "00:01:02,345");
//! ```

use crate::core::{CoreError, CoreResult, Millis};

/// Decimal separator used by JSON, VTT and plaintext output
pub const DEFAULT_SEPARATOR: char = '.';

/// Decimal separator used by SRT output
pub const SRT_SEPARATOR: char = ',';

const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_SECOND: f64 = 1_000.0;

// =============================================================================
// Parsing
// =============================================================================

/// Parses `HH:MM:SS.mmm` into milliseconds
pub fn parse_timestamp(text: &str) -> CoreResult<Millis> {
    parse_timestamp_with(text, DEFAULT_SEPARATOR)
}

/// Parses `HH:MM:SS<separator>mmm` into milliseconds
///
/// The fractional digits are read as a millisecond count, so `.998` is 998ms.
/// Each component is parsed as a float and summed without rounding.
///
/// The `MM:SS.mmm` short form has no seconds component and is rejected
/// with [`CoreError::MalformedTimestamp`].
pub fn parse_timestamp_with(text: &str, separator: char) -> CoreResult<Millis> {
    let malformed = || CoreError::MalformedTimestamp(text.to_string());
    let trimmed = text.trim();

    let (time, fraction) = trimmed.split_once(separator).ok_or_else(malformed)?;

    let fields: Vec<&str> = time.split(':').collect();
    let [hours, minutes, seconds] = fields.as_slice() else {
        return Err(malformed());
    };

    let component = |raw: &str| -> CoreResult<f64> {
        let value: f64 = raw.trim().parse().map_err(|_| malformed())?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(malformed())
        }
    };

    Ok(component(hours)? * MS_PER_HOUR
        + component(minutes)? * MS_PER_MINUTE
        + component(seconds)? * MS_PER_SECOND
        + component(fraction)?)
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats milliseconds as `HH:MM:SS.mmm`
pub fn format_timestamp(ms: Millis) -> String {
    format_timestamp_with(ms, DEFAULT_SEPARATOR, false)
}

/// Formats milliseconds as `HH:MM:SS<separator>mmm`
///
/// Hours, minutes and seconds come from successive floor division; the
/// remainder is kept as-is unless `trim_fractional` rounds it to a whole
/// millisecond. Output is always normalized, so components that were out of
/// range in the parsed text (e.g. `00:00:75.000`) are carried over.
pub fn format_timestamp_with(ms: Millis, separator: char, trim_fractional: bool) -> String {
    let mut rest = ms;

    let hours = (rest / MS_PER_HOUR).floor();
    rest -= hours * MS_PER_HOUR;

    let minutes = (rest / MS_PER_MINUTE).floor();
    rest -= minutes * MS_PER_MINUTE;

    let seconds = (rest / MS_PER_SECOND).floor();
    rest -= seconds * MS_PER_SECOND;

    if trim_fractional {
        rest = rest.round();
    }

    format!(
        "{}:{}:{}{}{}",
        pad(hours, 2),
        pad(minutes, 2),
        pad(seconds, 2),
        separator,
        pad(rest, 3)
    )
}

/// Left-pads the shortest decimal rendering of `value` with zeros
fn pad(value: f64, width: usize) -> String {
    // Normalize -0.0 so it never renders a sign.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:0>width$}", value.to_string(), width = width)
}

// =============================================================================
// Tests
// =============================================================================
