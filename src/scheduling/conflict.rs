//! Interval conflict detection between appointment slots

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::availability::AppointmentSlot;

/// Strict overlap test over half-open `[start, end)` intervals.
/// Touching intervals (one ends exactly where the other starts) do not
/// conflict.
pub fn overlaps(
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    existing_start: DateTime<Utc>,
    existing_end: DateTime<Utc>,
) -> bool {
    candidate_start < existing_end && candidate_end > existing_start
}

/// Linear scan of a provider's slots for any overlap with the candidate
/// interval. `exclude_slot_id` leaves the named slot out of the scan (used
/// when re-checking a slot against its siblings). Slot status is not
/// consulted: a cancelled slot still occupies its interval.
pub fn find_conflict(
    slots: &[AppointmentSlot],
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    exclude_slot_id: Option<Uuid>,
) -> bool {
    slots
        .iter()
        .filter(|slot| exclude_slot_id.map_or(true, |id| slot.id != id))
        .any(|slot| overlaps(candidate_start, candidate_end, slot.slot_start_time, slot.slot_end_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 15, h, m, 0).unwrap()
    }

    #[test]
    fn test_overlapping_intervals() {
        assert!(overlaps(at(9, 15), at(9, 45), at(9, 0), at(9, 30)));
        assert!(overlaps(at(9, 0), at(10, 0), at(9, 15), at(9, 45)));
        // containment
        assert!(overlaps(at(9, 0), at(11, 0), at(9, 30), at(10, 0)));
        assert!(overlaps(at(9, 30), at(10, 0), at(9, 0), at(11, 0)));
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        assert!(!overlaps(at(9, 0), at(9, 30), at(9, 30), at(10, 0)));
        assert!(!overlaps(at(9, 30), at(10, 0), at(9, 0), at(9, 30)));
    }

    #[test]
    fn test_disjoint_intervals() {
        assert!(!overlaps(at(9, 0), at(9, 30), at(10, 0), at(10, 30)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (at(9, 0), at(9, 30), at(9, 15), at(9, 45)),
            (at(9, 0), at(9, 30), at(9, 30), at(10, 0)),
            (at(8, 0), at(12, 0), at(9, 0), at(10, 0)),
        ];
        for (a1, a2, b1, b2) in cases {
            assert_eq!(overlaps(a1, a2, b1, b2), overlaps(b1, b2, a1, a2));
        }
    }
}
