//! Patient model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::Gender;

/// Residential address of a patient
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Address {
    #[validate(length(min = 1, max = 200, message = "Street address is required"))]
    pub street: String,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 50, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, max = 20, message = "Postal code is required"))]
    pub zip: String,
}

/// Optional emergency contact
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmergencyContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub relationship: Option<String>,
}

/// Optional insurance details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InsuranceInfo {
    pub provider: Option<String>,
    pub policy_number: Option<String>,
}

/// Full patient record. The password hash is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: Address,
    pub emergency_contact: Option<EmergencyContact>,
    pub medical_history: Vec<String>,
    pub insurance_info: Option<InsuranceInfo>,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterPatient {
    #[validate(length(min = 2, max = 50, message = "First name must be 2-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50, message = "Last name must be 2-50 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 20, message = "Phone number must be 8-20 characters"))]
    pub phone_number: String,
    /// Password (8+ chars, upper, lower, number, special)
    pub password: String,
    pub confirm_password: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[validate(nested)]
    pub address: Address,
    pub emergency_contact: Option<EmergencyContact>,
    pub medical_history: Option<Vec<String>>,
    pub insurance_info: Option<InsuranceInfo>,
}
