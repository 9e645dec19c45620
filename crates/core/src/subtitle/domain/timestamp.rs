//! SRT timestamps: `HH:MM:SS,mmm`.
//!
//! Hours are not wrapped at 24 and widen past two digits when needed.
//! Milliseconds are floored, never rounded, so a boundary shared by two
//! adjacent cues always encodes to the same string.

use crate::shared::caption_error::CaptionError;

/// Absorbs binary representation error (0.29 * 1000 = 289.999...) before flooring.
const FLOOR_TOLERANCE_MS: f64 = 1e-6;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Encode a non-negative, finite offset in seconds.
pub fn encode(seconds: f64) -> Result<String, CaptionError> {
    Ok(format_millis(to_millis(seconds)?))
}

/// Decode `HH:MM:SS,mmm` back to seconds. `.` is accepted as the
/// millisecond separator too.
pub fn decode(timestamp: &str) -> Result<f64, CaptionError> {
    let invalid = || CaptionError::InvalidInput(format!("invalid timestamp '{timestamp}'"));

    let (clock, millis) = timestamp
        .trim()
        .split_once([',', '.'])
        .ok_or_else(invalid)?;
    let mut parts = clock.split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let field = |text: &str, max: Option<u64>| -> Result<u64, CaptionError> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u64 = text.parse().map_err(|_| invalid())?;
        match max {
            Some(limit) if value > limit => Err(invalid()),
            _ => Ok(value),
        }
    };

    if millis.len() != 3 {
        return Err(invalid());
    }
    let hours = field(h, None)?;
    let within_hour =
        field(m, Some(59))? * MS_PER_MINUTE + field(s, Some(59))? * MS_PER_SECOND + field(millis, None)?;
    let total = hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|ms| ms.checked_add(within_hour))
        .ok_or_else(invalid)?;

    Ok(total as f64 / MS_PER_SECOND as f64)
}

/// Whole milliseconds in `seconds`, floored.
pub fn to_millis(seconds: f64) -> Result<u64, CaptionError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CaptionError::InvalidInput(format!(
            "timestamp must be a non-negative finite number of seconds, got {seconds}"
        )));
    }
    Ok((seconds * MS_PER_SECOND as f64 + FLOOR_TOLERANCE_MS).floor() as u64)
}

pub fn format_millis(total_ms: u64) -> String {
    let hours = total_ms / MS_PER_HOUR;
    let minutes = (total_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (total_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = total_ms % MS_PER_SECOND;
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}
