//! Trailing time window for the query filter.
//!
//! Pure logic. The caller captures `now` once per evaluation and passes it
//! in, so two evaluations never share clock state.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::filter::FilterDocument;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;
/// Months are a flat 31 days, not calendar months.
pub const SECONDS_PER_MONTH: i64 = 31 * SECONDS_PER_DAY;

/// Field the window is applied to when none is configured.
pub const DEFAULT_DATE_FIELD: &str = "date";

// ---------------------------------------------------------------------------
// TimeOffset
// ---------------------------------------------------------------------------

/// How far back from `now` the window starts.
///
/// Each component is independent and additive; a zero component has no
/// effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeOffset {
    pub minutes: u64,
    pub hours: u64,
    pub days: u64,
    pub weeks: u64,
    pub months: u64,
}

impl TimeOffset {
    /// Sum of all components in seconds, saturating at `i64::MAX`.
    pub fn total_seconds(&self) -> i64 {
        [
            (self.minutes, SECONDS_PER_MINUTE),
            (self.hours, SECONDS_PER_HOUR),
            (self.days, SECONDS_PER_DAY),
            (self.weeks, SECONDS_PER_WEEK),
            (self.months, SECONDS_PER_MONTH),
        ]
        .into_iter()
        .fold(0i64, |acc, (count, unit)| {
            let count = i64::try_from(count).unwrap_or(i64::MAX);
            acc.saturating_add(count.saturating_mul(unit))
        })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Window construction
// ---------------------------------------------------------------------------

/// Subtract `offsets` from `now`.
///
/// All-zero offsets return `now` unchanged. Offsets that would move past the
/// earliest representable instant saturate to [`DateTime::<Utc>::MIN_UTC`].
pub fn build_cutoff(now: Timestamp, offsets: &TimeOffset) -> Timestamp {
    TimeDelta::try_seconds(offsets.total_seconds())
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Set `filter[field]` to `{"$gte": cutoff}`.
///
/// Any existing value at `field` is replaced, not merged. All other keys are
/// left as they were.
pub fn apply_window(mut filter: FilterDocument, field: &str, cutoff: Timestamp) -> FilterDocument {
    filter.insert(field, json!({ "$gte": extended_json_date(cutoff) }));
    filter
}

/// Canonical MongoDB Extended JSON for a datetime.
///
/// BSON datetimes carry millisecond precision; anything finer is dropped.
pub fn extended_json_date(instant: Timestamp) -> Value {
    json!({ "$date": { "$numberLong": instant.timestamp_millis().to_string() } })
}
