//! Availability scheduling engine
//!
//! Pure computations over availability windows and appointment slots:
//! timezone conversion, slot generation, recurrence expansion, and
//! interval conflict detection. Nothing in here touches the store.

pub mod conflict;
pub mod recurrence;
pub mod slots;
pub mod timezone;

pub use conflict::{find_conflict, overlaps};
pub use recurrence::{expand_recurring, occurrence_dates};
pub use slots::generate_slots;
pub use timezone::{from_utc, local_date, to_utc};
