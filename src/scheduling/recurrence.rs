//! Recurring availability expansion
//!
//! Expands a recurring availability definition into one concrete window
//! (and slot set) per occurrence date, using RFC 5545 recurrence rules.

use chrono::NaiveDate;
use rrule::RRuleSet;

use crate::error::{AppError, AppResult};
use crate::models::availability::{AppointmentSlot, AvailabilityWindow, CreateAvailability};
use crate::models::enums::RecurrencePattern;

use super::slots;

/// Upper bound on expanded occurrences; recurrence end dates are validated
/// upstream, this only guards rule expansion itself.
const MAX_OCCURRENCES: u16 = 500;

/// Concrete occurrence dates of a recurrence, from the start date up to and
/// including the end date, in chronological order.
pub fn occurrence_dates(
    start: NaiveDate,
    until: NaiveDate,
    pattern: RecurrencePattern,
) -> AppResult<Vec<NaiveDate>> {
    let freq = match pattern {
        RecurrencePattern::Daily => "DAILY",
        RecurrencePattern::Weekly => "WEEKLY",
        RecurrencePattern::Monthly => "MONTHLY",
    };

    // The rrule crate wants iCalendar text; UNTIL shares DTSTART's timezone
    // and must carry the trailing Z for UTC.
    let rrule_text = format!(
        "DTSTART;TZID=UTC:{}T000000\nRRULE:FREQ={};UNTIL={}T000000Z",
        start.format("%Y%m%d"),
        freq,
        until.format("%Y%m%d"),
    );

    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| AppError::InvalidRecurrencePattern(format!("{}", e)))?;

    let instances = rrule_set.all(MAX_OCCURRENCES);
    Ok(instances.dates.into_iter().map(|dt| dt.date_naive()).collect())
}

/// Expand a recurring create request into one (window, slot-set) pair per
/// occurrence date.
///
/// Fails with `InvalidRecurrencePattern` when the recurring flag is set
/// without a pattern or end date.
pub fn expand_recurring(
    data: &CreateAvailability,
) -> AppResult<Vec<(AvailabilityWindow, Vec<AppointmentSlot>)>> {
    if !data.is_recurring {
        return Ok(Vec::new());
    }

    let pattern = data.recurrence_pattern.ok_or_else(|| {
        AppError::InvalidRecurrencePattern(
            "recurrence_pattern is required when is_recurring is true".to_string(),
        )
    })?;
    let until = data.recurrence_end_date.ok_or_else(|| {
        AppError::InvalidRecurrencePattern(
            "recurrence_end_date is required when is_recurring is true".to_string(),
        )
    })?;

    let mut results = Vec::new();
    for date in occurrence_dates(data.date, until, pattern)? {
        let window = AvailabilityWindow::from_request(data, date);
        let generated = slots::generate_slots(&window)?;
        results.push((window, generated));
    }

    Ok(results)
}
