//! Availability window and appointment slot models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{AppointmentType, LocationType, RecurrencePattern, SlotStatus};
use super::provider::ProviderSummary;

// ---------------------------------------------------------------------------
// Location / Pricing
// ---------------------------------------------------------------------------

/// Where the appointments of a window take place
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub address: Option<String>,
    pub room_number: Option<String>,
}

/// Pricing attached to an availability window
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pricing {
    /// Base consultation fee
    pub base_fee: f64,
    #[serde(default = "default_true")]
    pub insurance_accepted: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "USD".to_string()
}

// ---------------------------------------------------------------------------
// AvailabilityWindow
// ---------------------------------------------------------------------------

/// A provider-declared block of offerable time on a date, possibly recurring
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityWindow {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub date: NaiveDate,
    /// Local start time (HH:MM)
    pub start_time: String,
    /// Local end time (HH:MM)
    pub end_time: String,
    /// IANA timezone name (e.g. "America/New_York")
    pub timezone: String,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub recurrence_end_date: Option<NaiveDate>,
    /// Slot length in minutes
    pub slot_duration: u32,
    /// Gap between slots in minutes
    pub break_duration: u32,
    pub status: SlotStatus,
    pub max_appointments_per_slot: u32,
    pub current_appointments: u32,
    pub appointment_type: AppointmentType,
    pub location: Location,
    pub pricing: Option<Pricing>,
    pub notes: Option<String>,
    pub special_requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AvailabilityWindow {
    /// Materialize a stored window from a create request, substituting the
    /// given occurrence date
    pub fn from_request(data: &CreateAvailability, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            provider_id: data.provider_id,
            date,
            start_time: data.start_time.clone(),
            end_time: data.end_time.clone(),
            timezone: data.timezone.clone(),
            is_recurring: data.is_recurring,
            recurrence_pattern: data.recurrence_pattern,
            recurrence_end_date: data.recurrence_end_date,
            slot_duration: data.slot_duration,
            break_duration: data.break_duration,
            status: SlotStatus::Available,
            max_appointments_per_slot: data.max_appointments_per_slot,
            current_appointments: 0,
            appointment_type: data.appointment_type,
            location: data.location.clone(),
            pricing: data.pricing.clone(),
            notes: data.notes.clone(),
            special_requirements: data.special_requirements.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create availability request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAvailability {
    pub provider_id: Uuid,
    /// Date of the window (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Local start time (HH:MM)
    pub start_time: String,
    /// Local end time (HH:MM)
    pub end_time: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_pattern: Option<RecurrencePattern>,
    pub recurrence_end_date: Option<NaiveDate>,
    /// Slot length in minutes (15 minutes to 8 hours)
    #[serde(default = "default_slot_duration")]
    #[validate(range(min = 15, max = 480, message = "slot_duration must be between 15 and 480 minutes"))]
    pub slot_duration: u32,
    /// Gap between slots in minutes (up to 2 hours)
    #[serde(default)]
    #[validate(range(max = 120, message = "break_duration must be between 0 and 120 minutes"))]
    pub break_duration: u32,
    #[serde(default = "default_max_appointments")]
    #[validate(range(min = 1, max = 10, message = "max_appointments_per_slot must be between 1 and 10"))]
    pub max_appointments_per_slot: u32,
    #[serde(default = "default_appointment_type")]
    pub appointment_type: AppointmentType,
    pub location: Location,
    pub pricing: Option<Pricing>,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
    #[serde(default)]
    pub special_requirements: Vec<String>,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_slot_duration() -> u32 {
    30
}

fn default_max_appointments() -> u32 {
    1
}

fn default_appointment_type() -> AppointmentType {
    AppointmentType::Consultation
}

/// Update slot request; only the fields present are applied
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateSlot {
    /// New local start time (HH:MM)
    pub start_time: Option<String>,
    /// New local end time (HH:MM)
    pub end_time: Option<String>,
    pub status: Option<SlotStatus>,
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
    pub pricing: Option<Pricing>,
    pub special_requirements: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// AppointmentSlot
// ---------------------------------------------------------------------------

/// A fixed-duration bookable unit derived from an availability window.
/// Times are always stored in UTC.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppointmentSlot {
    pub id: Uuid,
    pub availability_id: Uuid,
    pub provider_id: Uuid,
    pub slot_start_time: DateTime<Utc>,
    pub slot_end_time: DateTime<Utc>,
    pub status: SlotStatus,
    pub patient_id: Option<Uuid>,
    pub appointment_type: AppointmentType,
    pub booking_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Query parameters for listing a provider's availability
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListAvailabilityQuery {
    /// Range start (YYYY-MM-DD), required
    pub start_date: Option<String>,
    /// Range end (YYYY-MM-DD), required
    pub end_date: Option<String>,
    /// Filter by slot status
    pub status: Option<String>,
    /// Filter by appointment type
    pub appointment_type: Option<String>,
    /// Timezone for display (defaults to America/New_York)
    pub timezone: Option<String>,
}

/// Query parameters for deleting a slot
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DeleteSlotQuery {
    /// Delete all non-booked slots of the same availability
    #[serde(default)]
    pub delete_recurring: bool,
    /// Reason for deletion (logged)
    pub reason: Option<String>,
}

/// Query parameters for searching available slots
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchQuery {
    /// Specific date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Range start (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Range end (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Provider specialization
    pub specialization: Option<String>,
    /// Location substring (city, state or zip)
    pub location: Option<String>,
    /// Appointment type
    pub appointment_type: Option<String>,
    /// Filter by insurance acceptance
    pub insurance_accepted: Option<bool>,
    /// Maximum base fee
    pub max_price: Option<f64>,
    /// Timezone for display
    pub timezone: Option<String>,
    /// Show only available slots
    #[serde(default = "default_true")]
    pub available_only: bool,
}

/// Parsed search criteria consumed by the availability service
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub specialization: Option<String>,
    pub location: Option<String>,
    pub appointment_type: Option<AppointmentType>,
    pub insurance_accepted: Option<bool>,
    pub max_price: Option<f64>,
    pub timezone: Option<String>,
    pub available_only: bool,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Covered date range of a create operation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Result of creating availability (single or recurring)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateAvailabilityResult {
    /// Window id, or "multiple" for recurring windows
    pub availability_id: String,
    pub slots_created: usize,
    pub date_range: DateRange,
    pub total_appointments_available: u64,
}

/// A slot rendered for display, times in the requested timezone
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlotView {
    pub slot_id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub status: SlotStatus,
    pub appointment_type: AppointmentType,
    pub location: Option<Location>,
    pub pricing: Option<Pricing>,
}

/// Slots of one calendar date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<SlotView>,
}

/// Aggregate slot counts for a listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailabilitySummary {
    pub total_slots: usize,
    pub available_slots: usize,
    pub booked_slots: usize,
    pub cancelled_slots: usize,
}

/// Listing of a provider's slots grouped by date
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderAvailabilityData {
    pub provider_id: Uuid,
    pub availability_summary: AvailabilitySummary,
    pub availability: Vec<DayAvailability>,
}

/// A slot returned by search, times in the requested timezone
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchSlotView {
    pub slot_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub appointment_type: AppointmentType,
    pub location: Option<Location>,
    pub pricing: Option<Pricing>,
    pub special_requirements: Vec<String>,
}

/// One provider's matching slots
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderMatch {
    pub provider: ProviderSummary,
    pub available_slots: Vec<SearchSlotView>,
}

/// Echo of the criteria a search was run with
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SearchCriteriaEcho {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Search results grouped by provider
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchData {
    pub search_criteria: SearchCriteriaEcho,
    pub total_results: usize,
    pub results: Vec<ProviderMatch>,
}
