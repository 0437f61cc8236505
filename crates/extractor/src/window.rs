use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// strftime pattern used throughout unless the configuration overrides it.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A decomposed duration applied additively to a timestamp.
///
/// Components are unbounded and may be negative; a negative component moves
/// the boundary backward. Serializes as an ordered `[days, hours, minutes,
/// seconds]` array, which is how it appears in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 4]", into = "[i64; 4]")]
pub struct DeltaTime {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DeltaTime {
    pub fn new(days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        DeltaTime {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    pub fn from_hours(hours: i64) -> Self {
        DeltaTime {
            hours,
            ..Default::default()
        }
    }

    pub fn to_duration(&self) -> Duration {
        Duration::days(self.days)
            + Duration::hours(self.hours)
            + Duration::minutes(self.minutes)
            + Duration::seconds(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        *self == DeltaTime::default()
    }
}

impl From<[i64; 4]> for DeltaTime {
    fn from(parts: [i64; 4]) -> Self {
        DeltaTime::new(parts[0], parts[1], parts[2], parts[3])
    }
}

impl From<DeltaTime> for [i64; 4] {
    fn from(delta: DeltaTime) -> Self {
        [delta.days, delta.hours, delta.minutes, delta.seconds]
    }
}

impl From<(i64, i64, i64, i64)> for DeltaTime {
    fn from(parts: (i64, i64, i64, i64)) -> Self {
        DeltaTime::new(parts.0, parts.1, parts.2, parts.3)
    }
}

/// Parses `"days,hours,minutes,seconds"`; trailing components may be
/// omitted and default to zero.
impl FromStr for DeltaTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [0i64; 4];
        let fields: Vec<&str> = s.split(',').collect();
        if fields.is_empty() || fields.len() > 4 {
            return Err(format!("Expected 1 to 4 components, got: {s}"));
        }
        for (i, field) in fields.iter().enumerate() {
            parts[i] = field
                .trim()
                .parse::<i64>()
                .map_err(|e| format!("Invalid component '{field}': {e}"))?;
        }
        Ok(DeltaTime::from(parts))
    }
}

/// Parses a timestamp string according to a strftime-style pattern.
pub fn parse_query_time(
    time_string: &str,
    time_format: &str,
) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(time_string, time_format)
}

/// Computes the formatted start and end boundaries of a query window.
///
/// The base time is shifted by `tz_offset` hours first, then `delta_start`
/// and `delta_end` are added to produce the two boundaries, both formatted
/// with `time_format`. Pure and deterministic.
///
/// Start is not validated against end: it is the caller's contract that the
/// offsets produce a chronologically ordered window. Zero offsets are valid
/// and yield a degenerate single-instant window.
pub fn construct_query_endpoints(
    query_time: NaiveDateTime,
    delta_start: DeltaTime,
    delta_end: DeltaTime,
    tz_offset: i64,
    time_format: &str,
) -> (String, String) {
    let reference = query_time + Duration::hours(tz_offset);

    let start = (reference + delta_start.to_duration())
        .format(time_format)
        .to_string();
    let end = (reference + delta_end.to_duration())
        .format(time_format)
        .to_string();

    (start, end)
}

/// Re-parses a formatted timestamp and shifts it by whole hours.
///
/// A zero shift returns the input unchanged without parsing.
pub fn shift_string_time(
    time_string: &str,
    hours: i64,
    time_format: &str,
) -> Result<String, chrono::ParseError> {
    if hours == 0 {
        return Ok(time_string.to_string());
    }
    let shifted = parse_query_time(time_string, time_format)? + Duration::hours(hours);
    Ok(shifted.format(time_format).to_string())
}
