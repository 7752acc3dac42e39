use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::UtilError;
use crate::utils::constants::{
    BYTE_BASE, BYTE_UNITS, DATE_DISPLAY_FORMAT, DATE_ONLY_FORMAT, DEFAULT_BYTE_DECIMALS,
    MAX_ROUNDED_DECIMALS, NAIVE_DATE_TIME_FORMATS, OFFSET_DATE_TIME_FORMATS,
};

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

// ============================================================================
// BYTE FORMATTING
// ============================================================================

/// Format a byte count as `"<value> <unit>"` with up to `decimals` places.
///
/// Units stop at GB, so anything from 1024^3 upwards is reported in GB
/// (`2^40` bytes renders as `"1024 GB"`). Negative `decimals` are treated as 0.
///
/// # Errors
///
/// Returns [`UtilError::InvalidArgument`] for negative, NaN or infinite counts.
pub fn format_bytes(bytes: f64, decimals: i32) -> Result<String, UtilError> {
    if !bytes.is_finite() || bytes < 0.0 {
        return Err(UtilError::InvalidArgument(format!(
            "byte count must be a non-negative number, got {bytes}"
        )));
    }

    if bytes == 0.0 {
        return Ok(format!("0 {}", BYTE_UNITS[0]));
    }

    let mut value = bytes;
    let mut index = 0;
    while value >= BYTE_BASE && index < BYTE_UNITS.len() - 1 {
        value /= BYTE_BASE;
        index += 1;
    }

    // Display prints the shortest form, so "1.50" comes out as "1.5" and "1.00" as "1".
    Ok(format!("{} {}", round_half_up(value, decimals), BYTE_UNITS[index]))
}

/// Round to `decimals` places with ties going up, not to the even digit.
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let decimals = decimals.max(0);
    if decimals > MAX_ROUNDED_DECIMALS {
        return value;
    }

    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// [`format_bytes`] with the default precision of 2 decimals.
///
/// # Errors
///
/// Same as [`format_bytes`].
pub fn format_bytes_default(bytes: f64) -> Result<String, UtilError> {
    format_bytes(bytes, DEFAULT_BYTE_DECIMALS)
}

// ============================================================================
// DATE FORMATTING
// ============================================================================

/// Render an ISO-8601 timestamp in the host's local time zone.
///
/// # Errors
///
/// Returns [`UtilError::InvalidArgument`] when the input cannot be parsed.
pub fn format_date(iso: &str) -> Result<String, UtilError> {
    format_date_in(iso, &Local)
}

/// Render an ISO-8601 timestamp as `Mar 7, 2024, 03:05 PM` in the given zone.
///
/// Timestamps carrying an offset are converted into `tz`. Offset-less
/// date-times are read as wall-clock time in `tz`; bare dates are UTC midnight.
///
/// # Errors
///
/// Returns [`UtilError::InvalidArgument`] when the input cannot be parsed.
pub fn format_date_in<Tz>(iso: &str, tz: &Tz) -> Result<String, UtilError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let instant = parse_iso(iso.trim(), tz)
        .ok_or_else(|| UtilError::InvalidArgument(format!("invalid date: {iso:?}")))?;

    Ok(instant.format(DATE_DISPLAY_FORMAT).to_string())
}

fn parse_iso<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(tz));
    }

    let zulu = input
        .strip_suffix(['Z', 'z'])
        .map(|rest| format!("{rest}+00:00"));
    let with_offset = zulu.as_deref().unwrap_or(input);
    for format in OFFSET_DATE_TIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(with_offset, format) {
            return Some(dt.with_timezone(tz));
        }
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    parse_calendar_date(input)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

/// `YYYY-MM-DD`, or the reduced `YYYY-MM` and `YYYY` forms (first day of the period).
fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_ONLY_FORMAT) {
        return Some(date);
    }

    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    match input.split('-').collect::<Vec<_>>().as_slice() {
        [year, month] if digits(year, 4) && digits(month, 2) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        [year] if digits(year, 4) => NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1),
        _ => None,
    }
}
