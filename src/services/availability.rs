//! Provider availability service: create, list, update, delete, search

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::availability::{
        AvailabilitySummary, AvailabilityWindow, CreateAvailability, CreateAvailabilityResult,
        DateRange, DayAvailability, ProviderAvailabilityData, ProviderMatch, SearchCriteria,
        SearchCriteriaEcho, SearchData, SearchSlotView, SlotView, UpdateSlot,
    },
    models::enums::{AppointmentType, SlotStatus},
    repository::Repository,
    scheduling,
};

/// Display timezone used when a request does not name one
pub const DEFAULT_DISPLAY_TIMEZONE: &str = "America/New_York";

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
}

impl AvailabilityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create availability slots for a provider, single or recurring.
    ///
    /// Non-recurring windows are checked against the provider's existing
    /// slots and stored atomically; recurring occurrences are stored without
    /// a conflict pre-check (inherited behavior).
    pub async fn create(&self, data: CreateAvailability) -> AppResult<CreateAvailabilityResult> {
        data.validate()?;

        // HH:MM is fixed-width, so the string comparison is a time comparison
        if data.end_time <= data.start_time {
            return Err(AppError::BadRequest(
                "End time must be after start time".to_string(),
            ));
        }

        if data.is_recurring {
            return self.create_recurring(data).await;
        }

        let start = scheduling::to_utc(&data.start_time, data.date, &data.timezone)?;
        let end = scheduling::to_utc(&data.end_time, data.date, &data.timezone)?;

        let window = AvailabilityWindow::from_request(&data, data.date);
        let slots = scheduling::generate_slots(&window)?;

        let availability_id = window.id.to_string();
        let slots_created = slots.len();
        let total_appointments = slots_created as u64 * u64::from(window.max_appointments_per_slot);

        self.repository
            .availability
            .insert_window_checked(window, slots, start, end)?;

        tracing::info!(
            "Provider availability created. Provider: {}, Slots: {}",
            data.provider_id,
            slots_created
        );

        Ok(CreateAvailabilityResult {
            availability_id,
            slots_created,
            date_range: DateRange {
                start: data.date,
                end: data.date,
            },
            total_appointments_available: total_appointments,
        })
    }

    async fn create_recurring(
        &self,
        data: CreateAvailability,
    ) -> AppResult<CreateAvailabilityResult> {
        let until = data.recurrence_end_date.ok_or_else(|| {
            AppError::InvalidRecurrencePattern(
                "recurrence_end_date is required when is_recurring is true".to_string(),
            )
        })?;
        if until <= data.date {
            return Err(AppError::Validation(
                "recurrence_end_date must be after the start date".to_string(),
            ));
        }

        let mut slots_created = 0usize;
        let mut total_appointments = 0u64;

        for (window, slots) in scheduling::expand_recurring(&data)? {
            slots_created += slots.len();
            total_appointments += slots.len() as u64 * u64::from(window.max_appointments_per_slot);
            self.repository.availability.insert_window(window, slots);
        }

        tracing::info!(
            "Recurring provider availability created. Provider: {}, Slots: {}",
            data.provider_id,
            slots_created
        );

        Ok(CreateAvailabilityResult {
            availability_id: "multiple".to_string(),
            slots_created,
            date_range: DateRange {
                start: data.date,
                end: until,
            },
            total_appointments_available: total_appointments,
        })
    }

    /// List a provider's slots within an inclusive date range, grouped by
    /// calendar date in the display timezone
    pub async fn list(
        &self,
        provider_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: Option<SlotStatus>,
        appointment_type: Option<AppointmentType>,
        timezone: Option<&str>,
    ) -> AppResult<ProviderAvailabilityData> {
        let display_tz = timezone.unwrap_or(DEFAULT_DISPLAY_TIMEZONE);

        let mut filtered = Vec::new();
        for slot in self.repository.availability.slots_for_provider(provider_id) {
            let slot_date = scheduling::local_date(slot.slot_start_time, display_tz)?;
            if slot_date < start_date || slot_date > end_date {
                continue;
            }
            if let Some(wanted) = status {
                if slot.status != wanted {
                    continue;
                }
            }
            if let Some(wanted) = appointment_type {
                if slot.appointment_type != wanted {
                    continue;
                }
            }
            filtered.push((slot_date, slot));
        }

        let summary = AvailabilitySummary {
            total_slots: filtered.len(),
            available_slots: filtered
                .iter()
                .filter(|(_, s)| s.status == SlotStatus::Available)
                .count(),
            booked_slots: filtered
                .iter()
                .filter(|(_, s)| s.status == SlotStatus::Booked)
                .count(),
            cancelled_slots: filtered
                .iter()
                .filter(|(_, s)| s.status == SlotStatus::Cancelled)
                .count(),
        };

        let mut by_date: BTreeMap<NaiveDate, Vec<SlotView>> = BTreeMap::new();
        for (slot_date, slot) in filtered {
            let window = self.repository.availability.window(slot.availability_id);
            by_date.entry(slot_date).or_default().push(SlotView {
                slot_id: slot.id,
                start_time: scheduling::from_utc(slot.slot_start_time, display_tz)?,
                end_time: scheduling::from_utc(slot.slot_end_time, display_tz)?,
                status: slot.status,
                appointment_type: slot.appointment_type,
                location: window.as_ref().map(|w| w.location.clone()),
                pricing: window.and_then(|w| w.pricing),
            });
        }

        Ok(ProviderAvailabilityData {
            provider_id,
            availability_summary: summary,
            availability: by_date
                .into_iter()
                .map(|(date, slots)| DayAvailability { date, slots })
                .collect(),
        })
    }

    /// Update a slot. A start/end time change re-runs the conflict check
    /// excluding the slot itself; other patch fields apply as-is. The
    /// updated timestamp is always refreshed.
    pub async fn update_slot(&self, slot_id: Uuid, patch: UpdateSlot) -> AppResult<()> {
        patch.validate()?;

        let slot = self.repository.availability.slot(slot_id)?;

        if patch.start_time.is_some() || patch.end_time.is_some() {
            // Re-anchor on the slot's stored UTC date; patched times are
            // interpreted as UTC wall-clock, matching how they were stored
            let slot_date = slot.slot_start_time.date_naive();
            let start_time = match &patch.start_time {
                Some(t) => t.clone(),
                None => scheduling::from_utc(slot.slot_start_time, "UTC")?,
            };
            let end_time = match &patch.end_time {
                Some(t) => t.clone(),
                None => scheduling::from_utc(slot.slot_end_time, "UTC")?,
            };

            let new_start = scheduling::to_utc(&start_time, slot_date, "UTC")?;
            let new_end = scheduling::to_utc(&end_time, slot_date, "UTC")?;

            self.repository
                .availability
                .update_slot_times_guarded(slot_id, new_start, new_end)?;
        }

        self.repository.availability.update_slot(slot_id, |s| {
            if let Some(status) = patch.status {
                s.status = status;
            }
        })?;

        if patch.notes.is_some() || patch.pricing.is_some() || patch.special_requirements.is_some()
        {
            self.repository
                .availability
                .update_window(slot.availability_id, |w| {
                    if let Some(notes) = patch.notes {
                        w.notes = Some(notes);
                    }
                    if let Some(pricing) = patch.pricing {
                        w.pricing = Some(pricing);
                    }
                    if let Some(requirements) = patch.special_requirements {
                        w.special_requirements = requirements;
                    }
                })?;
        }

        tracing::info!("Availability slot updated. Slot ID: {}", slot_id);
        Ok(())
    }

    /// Delete a slot. Booked slots are never deletable through this path.
    /// With `delete_recurring`, every non-booked slot of the same
    /// availability is removed as well; booked siblings stay.
    pub async fn delete_slot(
        &self,
        slot_id: Uuid,
        delete_recurring: bool,
        reason: Option<&str>,
    ) -> AppResult<()> {
        let slot = self.repository.availability.slot(slot_id)?;

        if slot.status == SlotStatus::Booked {
            return Err(AppError::InvalidState(
                "Cannot delete booked slot".to_string(),
            ));
        }

        self.repository.availability.delete_slot(slot_id)?;

        if delete_recurring {
            let removed = self
                .repository
                .availability
                .delete_unbooked_siblings(slot.availability_id, slot_id);
            tracing::info!(
                "Deleted {} sibling slots for availability {}",
                removed,
                slot.availability_id
            );
        }

        tracing::info!(
            "Availability slot deleted. Slot ID: {}, Reason: {}",
            slot_id,
            reason.unwrap_or("none")
        );
        Ok(())
    }

    /// Search all providers' slots and group the matches by provider.
    ///
    /// Provider details come from the provider directory; slots whose
    /// provider is unknown there are skipped.
    pub async fn search(&self, criteria: SearchCriteria) -> AppResult<SearchData> {
        let display_tz = criteria
            .timezone
            .as_deref()
            .unwrap_or(DEFAULT_DISPLAY_TIMEZONE);

        let mut providers: IndexMap<Uuid, ProviderMatch> = IndexMap::new();

        for slot in self.repository.availability.all_slots() {
            if criteria.available_only && slot.status != SlotStatus::Available {
                continue;
            }

            let slot_date = slot.slot_start_time.date_naive();
            if let Some(date) = criteria.date {
                if slot_date != date {
                    continue;
                }
            }
            if let Some(start_date) = criteria.start_date {
                if slot_date < start_date {
                    continue;
                }
            }
            if let Some(end_date) = criteria.end_date {
                if slot_date > end_date {
                    continue;
                }
            }
            if let Some(wanted) = criteria.appointment_type {
                if slot.appointment_type != wanted {
                    continue;
                }
            }

            let Some(provider) = self.repository.providers.summary(slot.provider_id) else {
                continue;
            };
            if let Some(ref location) = criteria.location {
                if !provider
                    .clinic_address
                    .to_lowercase()
                    .contains(&location.to_lowercase())
                {
                    continue;
                }
            }

            let window = self.repository.availability.window(slot.availability_id);
            let pricing = window.as_ref().and_then(|w| w.pricing.clone());

            if let Some(max_price) = criteria.max_price {
                let base_fee = pricing.as_ref().map(|p| p.base_fee).unwrap_or(0.0);
                if base_fee > max_price {
                    continue;
                }
            }
            if let Some(wanted) = criteria.insurance_accepted {
                let accepted = pricing.as_ref().map(|p| p.insurance_accepted).unwrap_or(true);
                if accepted != wanted {
                    continue;
                }
            }

            let view = SearchSlotView {
                slot_id: slot.id,
                date: slot_date,
                start_time: scheduling::from_utc(slot.slot_start_time, display_tz)?,
                end_time: scheduling::from_utc(slot.slot_end_time, display_tz)?,
                appointment_type: slot.appointment_type,
                location: window.as_ref().map(|w| w.location.clone()),
                pricing,
                special_requirements: window.map(|w| w.special_requirements).unwrap_or_default(),
            };

            providers
                .entry(provider.id)
                .or_insert_with(|| ProviderMatch {
                    provider,
                    available_slots: Vec::new(),
                })
                .available_slots
                .push(view);
        }

        Ok(SearchData {
            search_criteria: SearchCriteriaEcho {
                date: criteria.date,
                start_date: criteria.start_date,
                end_date: criteria.end_date,
                specialization: criteria.specialization,
                location: criteria.location,
            },
            total_results: providers.len(),
            results: providers.into_values().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::availability::{Location, Pricing};
    use crate::models::enums::{LocationType, RecurrencePattern, VerificationStatus};
    use crate::models::provider::{ClinicAddress, Provider};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_provider(repository: &Repository, city: &str) -> Uuid {
        let now = Utc::now();
        let provider = Provider {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: format!("jane-{}@clinic.test", Uuid::new_v4()),
            phone_number: "+12025550123".to_string(),
            password_hash: "x".to_string(),
            specialization: "Cardiology".to_string(),
            license_number: "MD12345".to_string(),
            years_of_experience: 10,
            clinic_address: ClinicAddress {
                street: "123 Medical Center Dr".to_string(),
                city: city.to_string(),
                state: "NY".to_string(),
                zip: "10001".to_string(),
            },
            verification_status: VerificationStatus::Verified,
            license_document_url: None,
            is_active: true,
            failed_login_attempts: 0,
            locked_until: None,
            last_login: None,
            login_count: 0,
            created_at: now,
            updated_at: now,
        };
        let id = provider.id;
        repository.providers.insert(provider);
        id
    }

    fn request(provider_id: Uuid, day: NaiveDate, start: &str, end: &str) -> CreateAvailability {
        CreateAvailability {
            provider_id,
            date: day,
            start_time: start.to_string(),
            end_time: end.to_string(),
            timezone: "America/New_York".to_string(),
            is_recurring: false,
            recurrence_pattern: None,
            recurrence_end_date: None,
            slot_duration: 30,
            break_duration: 0,
            max_appointments_per_slot: 1,
            appointment_type: AppointmentType::Consultation,
            location: Location {
                location_type: LocationType::Clinic,
                address: Some("123 Medical Center Dr, New York, NY".to_string()),
                room_number: Some("Room 205".to_string()),
            },
            pricing: Some(Pricing {
                base_fee: 150.0,
                insurance_accepted: true,
                currency: "USD".to_string(),
            }),
            notes: None,
            special_requirements: Vec::new(),
        }
    }

    fn setup() -> (AvailabilityService, Repository, Uuid) {
        let repository = Repository::new();
        let provider_id = test_provider(&repository, "New York");
        (
            AvailabilityService::new(repository.clone()),
            repository,
            provider_id,
        )
    }

    #[tokio::test]
    async fn test_create_single_availability() {
        let (service, _, provider_id) = setup();

        let result = service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();

        assert_eq!(result.slots_created, 4);
        assert_eq!(result.total_appointments_available, 4);
        assert_ne!(result.availability_id, "multiple");
        assert_eq!(result.date_range.start, result.date_range.end);
    }

    #[tokio::test]
    async fn test_overlapping_create_conflicts() {
        let (service, _, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();

        let err = service
            .create(request(provider_id, date(2024, 2, 15), "09:15", "09:45"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SlotConflict(_)));
    }

    #[tokio::test]
    async fn test_adjacent_windows_do_not_conflict() {
        let (service, _, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();

        service
            .create(request(provider_id, date(2024, 2, 15), "11:00", "12:00"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_other_provider_is_unaffected() {
        let (service, repository, provider_id) = setup();
        let other = test_provider(&repository, "Boston");

        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();
        service
            .create(request(other, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_end_before_start_rejected() {
        let (service, _, provider_id) = setup();
        let err = service
            .create(request(provider_id, date(2024, 2, 15), "11:00", "09:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_create_recurring_weekly() {
        let (service, _, provider_id) = setup();
        let mut data = request(provider_id, date(2024, 2, 15), "09:00", "10:00");
        data.is_recurring = true;
        data.recurrence_pattern = Some(RecurrencePattern::Weekly);
        data.recurrence_end_date = Some(date(2024, 3, 1));

        let result = service.create(data).await.unwrap();

        // three occurrences (02-15, 02-22, 02-29), two slots each
        assert_eq!(result.slots_created, 6);
        assert_eq!(result.availability_id, "multiple");
        assert_eq!(result.date_range.start, date(2024, 2, 15));
        assert_eq!(result.date_range.end, date(2024, 3, 1));
    }

    #[tokio::test]
    async fn test_recurring_requires_end_after_start() {
        let (service, _, provider_id) = setup();
        let mut data = request(provider_id, date(2024, 2, 15), "09:00", "10:00");
        data.is_recurring = true;
        data.recurrence_pattern = Some(RecurrencePattern::Daily);
        data.recurrence_end_date = Some(date(2024, 2, 15));

        let err = service.create(data).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_recurring_create_skips_conflict_check() {
        let (service, _, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();

        // Overlaps the existing window but is stored without a pre-check
        let mut data = request(provider_id, date(2024, 2, 15), "09:00", "10:00");
        data.is_recurring = true;
        data.recurrence_pattern = Some(RecurrencePattern::Weekly);
        data.recurrence_end_date = Some(date(2024, 2, 29));

        assert!(service.create(data).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_groups_and_counts() {
        let (service, repository, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();
        service
            .create(request(provider_id, date(2024, 2, 16), "09:00", "10:00"))
            .await
            .unwrap();

        // Book one slot through the store
        let booked_id = repository.availability.slots_for_provider(provider_id)[0].id;
        repository
            .availability
            .update_slot(booked_id, |s| s.status = SlotStatus::Booked)
            .unwrap();

        let data = service
            .list(
                provider_id,
                date(2024, 2, 15),
                date(2024, 2, 16),
                None,
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(data.availability_summary.total_slots, 6);
        assert_eq!(data.availability_summary.available_slots, 5);
        assert_eq!(data.availability_summary.booked_slots, 1);
        assert_eq!(data.availability.len(), 2);
        assert_eq!(data.availability[0].date, date(2024, 2, 15));
        assert_eq!(data.availability[0].slots.len(), 4);
        // display timezone defaults to America/New_York
        assert_eq!(data.availability[0].slots[0].start_time, "09:00");
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let (service, repository, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();
        let booked_id = repository.availability.slots_for_provider(provider_id)[0].id;
        repository
            .availability
            .update_slot(booked_id, |s| s.status = SlotStatus::Booked)
            .unwrap();

        let data = service
            .list(
                provider_id,
                date(2024, 2, 15),
                date(2024, 2, 15),
                Some(SlotStatus::Booked),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(data.availability_summary.total_slots, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_slot() {
        let (service, _, _) = setup();
        let patch = UpdateSlot {
            start_time: None,
            end_time: None,
            status: Some(SlotStatus::Cancelled),
            notes: None,
            pricing: None,
            special_requirements: None,
        };
        let err = service.update_slot(Uuid::new_v4(), patch).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_slot_time_conflict() {
        let (service, repository, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();

        let slots = repository.availability.slots_for_provider(provider_id);
        // Move the first slot onto the second one
        let second_start = scheduling::from_utc(slots[1].slot_start_time, "UTC").unwrap();
        let second_end = scheduling::from_utc(slots[1].slot_end_time, "UTC").unwrap();

        let patch = UpdateSlot {
            start_time: Some(second_start),
            end_time: Some(second_end),
            status: None,
            notes: None,
            pricing: None,
            special_requirements: None,
        };
        let err = service.update_slot(slots[0].id, patch).await.unwrap_err();
        assert!(matches!(err, AppError::SlotConflict(_)));
    }

    #[tokio::test]
    async fn test_update_slot_status_and_timestamp() {
        let (service, repository, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "10:00"))
            .await
            .unwrap();
        let slot = repository.availability.slots_for_provider(provider_id)[0].clone();

        let patch = UpdateSlot {
            start_time: None,
            end_time: None,
            status: Some(SlotStatus::Blocked),
            notes: Some("maintenance window".to_string()),
            pricing: None,
            special_requirements: None,
        };
        service.update_slot(slot.id, patch).await.unwrap();

        let updated = repository.availability.slot(slot.id).unwrap();
        assert_eq!(updated.status, SlotStatus::Blocked);
        assert!(updated.updated_at >= slot.updated_at);

        let window = repository.availability.window(slot.availability_id).unwrap();
        assert_eq!(window.notes.as_deref(), Some("maintenance window"));
    }

    #[tokio::test]
    async fn test_delete_booked_slot_rejected() {
        let (service, repository, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "10:00"))
            .await
            .unwrap();
        let slot_id = repository.availability.slots_for_provider(provider_id)[0].id;
        repository
            .availability
            .update_slot(slot_id, |s| s.status = SlotStatus::Booked)
            .unwrap();

        let err = service.delete_slot(slot_id, false, None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        // still there
        assert!(repository.availability.slot(slot_id).is_ok());
    }

    #[tokio::test]
    async fn test_delete_unknown_slot() {
        let (service, _, _) = setup();
        let err = service.delete_slot(Uuid::new_v4(), false, None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cascade_delete_skips_booked_siblings() {
        let (service, repository, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "11:00"))
            .await
            .unwrap();

        let slots = repository.availability.slots_for_provider(provider_id);
        assert_eq!(slots.len(), 4);
        let booked = slots[2].id;
        repository
            .availability
            .update_slot(booked, |s| s.status = SlotStatus::Booked)
            .unwrap();

        service
            .delete_slot(slots[0].id, true, Some("vacation"))
            .await
            .unwrap();

        let remaining = repository.availability.slots_for_provider(provider_id);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, booked);
    }

    #[tokio::test]
    async fn test_search_filters_price_and_availability() {
        let (service, repository, provider_id) = setup();

        // Affordable window
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "10:00"))
            .await
            .unwrap();
        // Expensive window later the same day
        let mut expensive = request(provider_id, date(2024, 2, 15), "13:00", "14:00");
        expensive.pricing = Some(Pricing {
            base_fee: 400.0,
            insurance_accepted: true,
            currency: "USD".to_string(),
        });
        service.create(expensive).await.unwrap();

        // Book one affordable slot so available_only excludes it
        let booked_id = repository.availability.slots_for_provider(provider_id)[0].id;
        repository
            .availability
            .update_slot(booked_id, |s| s.status = SlotStatus::Booked)
            .unwrap();

        let results = service
            .search(SearchCriteria {
                max_price: Some(100.0),
                available_only: true,
                ..Default::default()
            })
            .await
            .unwrap();

        // 150 > 100, 400 > 100: nothing survives the price filter
        assert_eq!(results.total_results, 0);

        let results = service
            .search(SearchCriteria {
                max_price: Some(200.0),
                available_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.total_results, 1);
        // one of the two affordable slots is booked
        assert_eq!(results.results[0].available_slots.len(), 1);
    }

    #[tokio::test]
    async fn test_search_by_location_substring() {
        let (service, repository, ny_provider) = setup();
        let boston_provider = test_provider(&repository, "Boston");

        service
            .create(request(ny_provider, date(2024, 2, 15), "09:00", "10:00"))
            .await
            .unwrap();
        service
            .create(request(boston_provider, date(2024, 2, 15), "09:00", "10:00"))
            .await
            .unwrap();

        let results = service
            .search(SearchCriteria {
                location: Some("boston".to_string()),
                available_only: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(results.total_results, 1);
        assert!(results.results[0].provider.clinic_address.contains("Boston"));
    }

    #[tokio::test]
    async fn test_search_by_exact_date_and_type() {
        let (service, _, provider_id) = setup();
        service
            .create(request(provider_id, date(2024, 2, 15), "09:00", "10:00"))
            .await
            .unwrap();
        service
            .create(request(provider_id, date(2024, 2, 16), "09:00", "10:00"))
            .await
            .unwrap();

        let results = service
            .search(SearchCriteria {
                date: Some(date(2024, 2, 15)),
                appointment_type: Some(AppointmentType::Consultation),
                available_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.total_results, 1);
        assert_eq!(results.results[0].available_slots.len(), 2);
        for slot in &results.results[0].available_slots {
            assert_eq!(slot.date, date(2024, 2, 15));
        }

        let none = service
            .search(SearchCriteria {
                appointment_type: Some(AppointmentType::Telemedicine),
                available_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(none.total_results, 0);
    }

    #[tokio::test]
    async fn test_search_insurance_filter() {
        let (service, _, provider_id) = setup();
        let mut uninsured = request(provider_id, date(2024, 2, 15), "09:00", "10:00");
        uninsured.pricing = Some(Pricing {
            base_fee: 80.0,
            insurance_accepted: false,
            currency: "USD".to_string(),
        });
        service.create(uninsured).await.unwrap();

        let accepting = service
            .search(SearchCriteria {
                insurance_accepted: Some(true),
                available_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(accepting.total_results, 0);

        let declining = service
            .search(SearchCriteria {
                insurance_accepted: Some(false),
                available_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(declining.total_results, 1);
    }
}
