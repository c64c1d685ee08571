//! Availability window and appointment slot store

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::availability::{AppointmentSlot, AvailabilityWindow};
use crate::models::enums::SlotStatus;
use crate::scheduling::conflict;

/// In-memory store for availability windows and their appointment slots.
///
/// Conflict-sensitive writes perform their overlap check and the insert
/// inside one write-lock critical section, so two overlapping creates for
/// the same provider cannot both pass the check and both commit.
#[derive(Clone, Default)]
pub struct AvailabilityRepository {
    windows: Arc<RwLock<Vec<AvailabilityWindow>>>,
    slots: Arc<RwLock<Vec<AppointmentSlot>>>,
}

impl AvailabilityRepository {
    /// Store a window and its generated slots without any overlap check
    /// (recurring creates keep the original's unguarded semantics)
    pub fn insert_window(&self, window: AvailabilityWindow, slots: Vec<AppointmentSlot>) {
        let mut windows = self.windows.write().expect("windows lock poisoned");
        let mut stored = self.slots.write().expect("slots lock poisoned");
        windows.push(window);
        stored.extend(slots);
    }

    /// Atomically store a window and its slots if the `[start, end)` interval
    /// does not overlap any existing slot of the same provider
    pub fn insert_window_checked(
        &self,
        window: AvailabilityWindow,
        slots: Vec<AppointmentSlot>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut windows = self.windows.write().expect("windows lock poisoned");
        let mut stored = self.slots.write().expect("slots lock poisoned");

        let provider_slots: Vec<AppointmentSlot> = stored
            .iter()
            .filter(|s| s.provider_id == window.provider_id)
            .cloned()
            .collect();
        if conflict::find_conflict(&provider_slots, start, end, None) {
            return Err(AppError::SlotConflict(
                "Time slot conflicts with existing availability".to_string(),
            ));
        }

        windows.push(window);
        stored.extend(slots);
        Ok(())
    }

    pub fn window(&self, id: Uuid) -> Option<AvailabilityWindow> {
        self.windows
            .read()
            .expect("windows lock poisoned")
            .iter()
            .find(|w| w.id == id)
            .cloned()
    }

    pub fn windows_for_provider(&self, provider_id: Uuid) -> Vec<AvailabilityWindow> {
        self.windows
            .read()
            .expect("windows lock poisoned")
            .iter()
            .filter(|w| w.provider_id == provider_id)
            .cloned()
            .collect()
    }

    /// Apply a mutation to a window and refresh its updated timestamp
    pub fn update_window<F>(&self, id: Uuid, f: F) -> AppResult<AvailabilityWindow>
    where
        F: FnOnce(&mut AvailabilityWindow),
    {
        let mut windows = self.windows.write().expect("windows lock poisoned");
        let window = windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| AppError::NotFound("Availability not found".to_string()))?;
        f(window);
        window.updated_at = Utc::now();
        Ok(window.clone())
    }

    pub fn delete_window(&self, id: Uuid) -> AppResult<AvailabilityWindow> {
        let mut windows = self.windows.write().expect("windows lock poisoned");
        let index = windows
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| AppError::NotFound("Availability not found".to_string()))?;
        Ok(windows.remove(index))
    }

    pub fn slot(&self, id: Uuid) -> AppResult<AppointmentSlot> {
        self.slots
            .read()
            .expect("slots lock poisoned")
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Slot not found".to_string()))
    }

    pub fn slots_for_provider(&self, provider_id: Uuid) -> Vec<AppointmentSlot> {
        self.slots
            .read()
            .expect("slots lock poisoned")
            .iter()
            .filter(|s| s.provider_id == provider_id)
            .cloned()
            .collect()
    }

    pub fn slots_for_availability(&self, availability_id: Uuid) -> Vec<AppointmentSlot> {
        self.slots
            .read()
            .expect("slots lock poisoned")
            .iter()
            .filter(|s| s.availability_id == availability_id)
            .cloned()
            .collect()
    }

    pub fn all_slots(&self) -> Vec<AppointmentSlot> {
        self.slots.read().expect("slots lock poisoned").clone()
    }

    /// Does the candidate interval overlap any stored slot of the provider?
    pub fn has_conflict(
        &self,
        provider_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_slot_id: Option<Uuid>,
    ) -> bool {
        let slots = self.slots.read().expect("slots lock poisoned");
        let provider_slots: Vec<AppointmentSlot> = slots
            .iter()
            .filter(|s| s.provider_id == provider_id)
            .cloned()
            .collect();
        conflict::find_conflict(&provider_slots, start, end, exclude_slot_id)
    }

    /// Atomically move a slot to a new interval unless the interval overlaps
    /// another slot of the same provider
    pub fn update_slot_times_guarded(
        &self,
        slot_id: Uuid,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> AppResult<AppointmentSlot> {
        let mut slots = self.slots.write().expect("slots lock poisoned");

        let index = slots
            .iter()
            .position(|s| s.id == slot_id)
            .ok_or_else(|| AppError::NotFound("Slot not found".to_string()))?;
        let provider_id = slots[index].provider_id;

        let siblings: Vec<AppointmentSlot> = slots
            .iter()
            .filter(|s| s.provider_id == provider_id)
            .cloned()
            .collect();
        if conflict::find_conflict(&siblings, new_start, new_end, Some(slot_id)) {
            return Err(AppError::SlotConflict(
                "Updated time conflicts with existing availability".to_string(),
            ));
        }

        let slot = &mut slots[index];
        slot.slot_start_time = new_start;
        slot.slot_end_time = new_end;
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    /// Apply a mutation to a slot and refresh its updated timestamp
    pub fn update_slot<F>(&self, id: Uuid, f: F) -> AppResult<AppointmentSlot>
    where
        F: FnOnce(&mut AppointmentSlot),
    {
        let mut slots = self.slots.write().expect("slots lock poisoned");
        let slot = slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound("Slot not found".to_string()))?;
        f(slot);
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    pub fn delete_slot(&self, id: Uuid) -> AppResult<AppointmentSlot> {
        let mut slots = self.slots.write().expect("slots lock poisoned");
        let index = slots
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound("Slot not found".to_string()))?;
        Ok(slots.remove(index))
    }

    /// Delete every non-booked slot sharing an availability id, except the
    /// named one. Returns how many were removed; booked siblings are left in
    /// place.
    pub fn delete_unbooked_siblings(&self, availability_id: Uuid, exclude_slot_id: Uuid) -> usize {
        let mut slots = self.slots.write().expect("slots lock poisoned");
        let before = slots.len();
        slots.retain(|s| {
            s.availability_id != availability_id
                || s.id == exclude_slot_id
                || s.status == SlotStatus::Booked
        });
        before - slots.len()
    }
}
