//! Datetime interval parsing and timestamp stamping
//!
//! Intervals arrive as either a single instant or `start/end`, with `..`
//! marking an open end. All instants are reduced to second precision UTC:
//! the first 19 characters plus a literal `Z`. Sub-second digits and
//! offsets are dropped, not converted.

use crate::error::{Error, Result};
use chrono::{NaiveDateTime, Utc};

/// Lower bound substituted for an open interval start
pub const OPEN_START: &str = "1900-10-01T00:00:00Z";
/// Upper bound substituted for an open interval end
pub const OPEN_END: &str = "2200-12-01T12:31:12Z";

const OPEN_MARKER: &str = "..";
const INSTANT_LEN: usize = 19;
const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parsed datetime constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatetimeFilter {
    /// Exact match on a single instant
    Exact(String),
    /// Inclusive range `start <= t <= end`
    Range {
        /// Lower bound (inclusive)
        start: String,
        /// Upper bound (inclusive)
        end: String,
    },
}

impl DatetimeFilter {
    /// Check an item timestamp against this filter
    ///
    /// The candidate is normalized the same way as the bounds; a value that
    /// is not a valid instant never matches.
    pub fn matches(&self, candidate: &str) -> bool {
        let Ok(candidate) = normalize_instant(candidate) else {
            return false;
        };
        match self {
            DatetimeFilter::Exact(instant) => candidate == *instant,
            DatetimeFilter::Range { start, end } => {
                candidate.as_str() >= start.as_str() && candidate.as_str() <= end.as_str()
            }
        }
    }
}

/// Parse a datetime interval
///
/// # Examples
///
/// ```
/// use geocatalog_core::datetime::{parse_date_interval, DatetimeFilter, OPEN_END};
///
/// let f = parse_date_interval("2020-01-01T00:00:00.123+02:00/..").unwrap();
/// assert_eq!(
///     f,
///     DatetimeFilter::Range {
///         start: "2020-01-01T00:00:00Z".into(),
///         end: OPEN_END.into(),
///     }
/// );
/// ```
///
/// # Errors
///
/// Returns `InvalidInput` if an end is not a valid instant or the value has
/// more than one `/`.
pub fn parse_date_interval(value: &str) -> Result<DatetimeFilter> {
    let parts: Vec<&str> = value.split('/').collect();
    match parts.as_slice() {
        [instant] => Ok(DatetimeFilter::Exact(normalize_instant(instant)?)),
        [start, end] => {
            let start = if *start == OPEN_MARKER {
                OPEN_START.to_string()
            } else {
                normalize_instant(start)?
            };
            let end = if *end == OPEN_MARKER {
                OPEN_END.to_string()
            } else {
                normalize_instant(end)?
            };
            Ok(DatetimeFilter::Range { start, end })
        }
        _ => Err(Error::invalid_input(format!(
            "datetime interval '{}' has more than two ends",
            value
        ))),
    }
}

/// Truncate an RFC 3339 instant to `YYYY-MM-DDTHH:MM:SSZ`
///
/// # Errors
///
/// Returns `InvalidInput` if the first 19 characters are not a valid
/// date-time.
pub fn normalize_instant(value: &str) -> Result<String> {
    let head: String = value.chars().take(INSTANT_LEN).collect();
    NaiveDateTime::parse_from_str(&head, INSTANT_FORMAT)
        .map_err(|e| Error::invalid_input(format!("invalid datetime '{}': {}", value, e)))?;
    Ok(format!("{}Z", head))
}

/// Current UTC time in second-precision `Z` form
pub fn now_rfc3339() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
