//! Provider model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::VerificationStatus;

/// Clinic address of a provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClinicAddress {
    #[validate(length(min = 1, max = 200, message = "Street is required"))]
    pub street: String,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 50, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, max = 20, message = "Postal code is required"))]
    pub zip: String,
}

impl ClinicAddress {
    /// Single-line rendering used by the provider directory
    pub fn formatted(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }
}

/// Full provider record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub specialization: String,
    pub license_number: String,
    pub years_of_experience: u32,
    pub clinic_address: ClinicAddress,
    pub verification_status: VerificationStatus,
    pub license_document_url: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub failed_login_attempts: u32,
    #[serde(skip_serializing)]
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub login_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Provider registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterProvider {
    #[validate(length(min = 2, max = 50, message = "First name must be 2-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50, message = "Last name must be 2-50 characters"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, max = 20, message = "Phone number must be 8-20 characters"))]
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 3, max = 100, message = "Specialization must be 3-100 characters"))]
    pub specialization: String,
    #[validate(length(min = 1, max = 30, message = "License number must be 1-30 characters"))]
    pub license_number: String,
    #[validate(range(max = 50, message = "Years of experience must be between 0 and 50"))]
    pub years_of_experience: u32,
    #[validate(nested)]
    pub clinic_address: ClinicAddress,
    pub license_document_url: Option<String>,
}

/// Provider-directory projection consumed by slot search
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderSummary {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub years_of_experience: u32,
    pub clinic_address: String,
}
