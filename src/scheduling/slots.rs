//! Appointment slot generation

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::availability::{AppointmentSlot, AvailabilityWindow};
use crate::models::enums::SlotStatus;

use super::timezone;

/// Cut an availability window into fixed-duration appointment slots.
///
/// Starting at the window's UTC start, each slot spans `slot_duration`
/// minutes; the cursor then advances by `slot_duration + break_duration`.
/// A slot that would run past the window's end is not emitted. All slots
/// start out `available` and unbound.
pub fn generate_slots(window: &AvailabilityWindow) -> AppResult<Vec<AppointmentSlot>> {
    let start = timezone::to_utc(&window.start_time, window.date, &window.timezone)?;
    let end = timezone::to_utc(&window.end_time, window.date, &window.timezone)?;

    let slot_len = Duration::minutes(window.slot_duration as i64);
    let gap = Duration::minutes(window.break_duration as i64);

    let mut slots = Vec::new();
    let mut cursor = start;

    while cursor < end {
        let slot_end = cursor + slot_len;
        if slot_end > end {
            break;
        }

        let now = Utc::now();
        slots.push(AppointmentSlot {
            id: Uuid::new_v4(),
            availability_id: window.id,
            provider_id: window.provider_id,
            slot_start_time: cursor,
            slot_end_time: slot_end,
            status: SlotStatus::Available,
            patient_id: None,
            appointment_type: window.appointment_type,
            booking_reference: None,
            created_at: now,
            updated_at: now,
        });

        cursor = slot_end + gap;
    }

    Ok(slots)
}
