//! Flexible timestamp parsing for query bounds and date fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized time format: {input:?}")]
pub struct TimeParseError {
    pub input: String,
}

/// Layouts without an offset; parsed values are taken as UTC.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Offset layout tried last, for inputs such as `2025-11-19T10:04:58.123456789+0800`.
const FALLBACK_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse a timestamp in one of the accepted layouts, tried in order:
///
/// 1. RFC 3339 with offset (`2025-11-19T10:04:58+08:00`)
/// 2. date-time without offset (`2025-11-19T10:04:58`)
/// 3. space-separated date-time (`2025-11-19 10:04:58`)
/// 4. bare date (`2025-11-19`), at midnight UTC
///
/// and finally a nanosecond-precision offset timestamp.
///
/// ```
/// use rolodex_domain::time::parse_flexible_time;
///
/// let t = parse_flexible_time("2025-01-31").unwrap();
/// assert_eq!(t.to_rfc3339(), "2025-01-31T00:00:00+00:00");
/// assert!(parse_flexible_time("31/01/2025").is_err());
/// ```
pub fn parse_flexible_time(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = input.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, layout) {
            return Ok(t.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(t) = d.and_hms_opt(0, 0, 0) {
            return Ok(t.and_utc());
        }
    }
    DateTime::parse_from_str(s, FALLBACK_LAYOUT)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| TimeParseError {
            input: input.to_owned(),
        })
}
