use crate::types::errors::TimestampError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the `transaction_date` field of an inbound transaction.
///
/// Accepted layouts, tried in order:
/// - RFC 3339 with an offset (`2019-12-01T23:16:32-03:00`), the offset is kept.
/// - `2019-12-01 23:16:32` or `2019-12-01T23:16:32`, with optional fractional seconds, read as UTC.
/// - `2019-12-01`, read as midnight UTC.
///
/// Comparing two results compares the instants, not the wall clock times.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp);
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(timestamp.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|timestamp| timestamp.and_utc().fixed_offset())
        .ok_or_else(|| TimestampError::InvalidFormat(value.to_string()))
}
