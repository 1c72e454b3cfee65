//! Time utilities: calendar-month filtering and local-date conversion.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{TallyError, TallyResult};
use crate::transaction::Transaction;

/// Parse an IANA zone name like "America/Toronto".
pub fn parse_timezone(name: &str) -> TallyResult<Tz> {
    name.parse()
        .map_err(|_| TallyError::InvalidTimezone(name.to_string()))
}

/// True iff `date` falls in the same calendar month and year as `now`,
/// both read in `tz`.
///
/// This is calendar alignment, not a rolling window: the last day of the
/// previous month never matches.
pub fn in_current_month<Z: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Utc>, tz: &Z) -> bool {
    let date = date.with_timezone(tz);
    let now = now.with_timezone(tz);
    date.year() == now.year() && date.month() == now.month()
}

/// Keep the transactions dated in the current calendar month, in their
/// original order.
pub fn filter_current_month<'a, Z: TimeZone>(
    txns: &'a [Transaction],
    now: &DateTime<Utc>,
    tz: &Z,
) -> Vec<&'a Transaction> {
    txns.iter()
        .filter(|t| in_current_month(&t.date(), now, tz))
        .collect()
}

/// Local midnight of `date` in `tz`, as UTC.
pub fn local_date_to_utc<Z: TimeZone>(date: NaiveDate, tz: &Z) -> TallyResult<DateTime<Utc>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| TallyError::invalid_date(date.to_string(), "no midnight"))?;

    let local = tz
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| TallyError::invalid_date(date.to_string(), "nonexistent local time"))?;

    Ok(local.with_timezone(&Utc))
}

/// Parse either `YYYY-MM-DD` (local midnight in `tz`) or an RFC 3339 timestamp.
pub fn parse_date<Z: TimeZone>(input: &str, tz: &Z) -> TallyResult<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return local_date_to_utc(date, tz);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TallyError::invalid_date(input, e))
}
