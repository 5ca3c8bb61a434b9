use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid SRT timestamp: {0:?}")]
pub struct InvalidTimestamp(pub String);

fn timestamp_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})$").expect("timestamp pattern is valid")
    })
}

/// Converts fractional seconds to a duration at microsecond precision.
///
/// Rounding to the microsecond keeps `1.3` at 1.300000 s instead of
/// 1.299999 s. Negative and non-finite inputs map to zero.
pub fn seconds_to_duration(seconds: f64) -> Duration {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_micros((seconds * 1_000_000.0).round() as u64)
}

/// `HH:MM:SS,mmm`, milliseconds truncated.
pub fn format_timestamp(time: Duration) -> String {
    let total_secs = time.as_secs();
    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60,
        time.subsec_millis()
    )
}

/// `HH:MM:SS`, used by the plain-text word listing.
pub fn format_clock(time: Duration) -> String {
    let total_secs = time.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

/// Parses `HH:MM:SS,mmm` (a `.` separator is accepted too). Short
/// millisecond fields are fractions: `,5` is 500 ms.
pub fn parse_timestamp(value: &str) -> Result<Duration, InvalidTimestamp> {
    let invalid = || InvalidTimestamp(value.to_string());
    let caps = timestamp_pattern()
        .captures(value.trim())
        .ok_or_else(invalid)?;
    let field = |i: usize| caps[i].parse::<u64>().map_err(|_| invalid());

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }
    let fraction = &caps[4];
    let millis = fraction.parse::<u64>().map_err(|_| invalid())? * 10u64.pow(3 - fraction.len() as u32);

    let total_secs = hours
        .checked_mul(3600)
        .and_then(|s| s.checked_add(minutes * 60 + seconds))
        .ok_or_else(invalid)?;
    Duration::from_secs(total_secs)
        .checked_add(Duration::from_millis(millis))
        .ok_or_else(invalid)
}
