//! Local-time / UTC conversion for IANA timezones

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, AppResult};

fn parse_zone(timezone: &str) -> AppResult<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| AppError::InvalidTimeZone(format!("Invalid timezone: {}", timezone)))
}

/// Convert a local `HH:MM` time on a given date to a UTC instant.
///
/// The local time string is treated as naive: an ambiguous (fall-back)
/// time resolves to its earlier occurrence, a nonexistent (spring-forward)
/// time is rejected.
pub fn to_utc(local_time: &str, date: NaiveDate, timezone: &str) -> AppResult<DateTime<Utc>> {
    let tz = parse_zone(timezone)?;
    let time = NaiveTime::parse_from_str(local_time, "%H:%M").map_err(|_| {
        AppError::InvalidTimeFormat(format!("Invalid time format: {} (use HH:MM)", local_time))
    })?;

    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalResult::None => Err(AppError::InvalidTimeFormat(format!(
            "Local time {} does not exist in {}",
            local_time, timezone
        ))),
    }
}

/// Render a UTC instant as a local `HH:MM` string, truncating to the minute
pub fn from_utc(instant: DateTime<Utc>, timezone: &str) -> AppResult<String> {
    let tz = parse_zone(timezone)?;
    Ok(instant.with_timezone(&tz).format("%H:%M").to_string())
}

/// Calendar date of a UTC instant in the given display timezone
pub fn local_date(instant: DateTime<Utc>, timezone: &str) -> AppResult<NaiveDate> {
    let tz = parse_zone(timezone)?;
    Ok(instant.with_timezone(&tz).date_naive())
}
