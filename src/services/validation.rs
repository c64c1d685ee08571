//! Field validation helpers for registration and login
//!
//! Aggregate validators collect per-field error messages the way the API
//! reports them: a map of field name to a list of problems.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, AppResult};
use crate::models::patient::RegisterPatient;
use crate::models::provider::RegisterProvider;
use crate::repository::{patients::PatientsRepository, providers::ProvidersRepository};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// E.164 international phone format
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$").unwrap());

static LICENSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static POSTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\s\-]{3,10}$").unwrap());

pub const SPECIALIZATIONS: &[&str] = &[
    "Cardiology",
    "Dermatology",
    "Neurology",
    "Pediatrics",
    "Psychiatry",
    "Oncology",
    "Orthopedics",
    "General Medicine",
];

/// Minimum patient age in years (COPPA)
const MINIMUM_AGE_YEARS: u32 = 13;

pub type FieldErrors = HashMap<String, Vec<String>>;

fn push_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// 8+ characters including uppercase, lowercase, digit and special character
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric() && c != '_')
}

pub fn is_valid_license_number(license_number: &str) -> bool {
    LICENSE_RE.is_match(license_number)
}

pub fn is_valid_postal_code(zip: &str) -> bool {
    POSTAL_RE.is_match(zip)
}

pub fn is_valid_specialization(specialization: &str) -> bool {
    SPECIALIZATIONS.contains(&specialization)
}

/// Date of birth must be in the past and at least the minimum age ago
pub fn validate_date_of_birth(dob: NaiveDate) -> Result<(), &'static str> {
    let today = Utc::now().date_naive();
    if dob >= today {
        return Err("Date of birth must be in the past");
    }
    match today.years_since(dob) {
        Some(age) if age >= MINIMUM_AGE_YEARS => Ok(()),
        _ => Err("Patient must be at least 13 years old"),
    }
}

/// Full provider registration validation: formats, strength, uniqueness
pub fn validate_provider_registration(
    data: &RegisterProvider,
    providers: &ProvidersRepository,
) -> AppResult<()> {
    let mut errors = FieldErrors::new();

    if !is_valid_email(&data.email) {
        push_error(&mut errors, "email", "Invalid email format");
    } else if providers.email_exists(&data.email) {
        push_error(&mut errors, "email", "Email already exists");
    }

    if !is_valid_phone(&data.phone_number) {
        push_error(&mut errors, "phone_number", "Invalid phone number format");
    } else if providers.phone_exists(&data.phone_number) {
        push_error(&mut errors, "phone_number", "Phone number already exists");
    }

    if !is_valid_password(&data.password) {
        push_error(
            &mut errors,
            "password",
            "Password must be 8+ characters, including uppercase, lowercase, number, and special character",
        );
    }
    if data.password != data.confirm_password {
        push_error(&mut errors, "confirm_password", "Passwords do not match");
    }

    if !is_valid_license_number(&data.license_number) {
        push_error(&mut errors, "license_number", "License number must be alphanumeric");
    } else if providers.license_exists(&data.license_number) {
        push_error(&mut errors, "license_number", "License number already exists");
    }

    if !is_valid_specialization(&data.specialization) {
        push_error(&mut errors, "specialization", "Invalid specialization");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationFields(errors))
    }
}

/// Full patient registration validation: formats, strength, age, uniqueness
pub fn validate_patient_registration(
    data: &RegisterPatient,
    patients: &PatientsRepository,
) -> AppResult<()> {
    let mut errors = FieldErrors::new();

    if !is_valid_email(&data.email) {
        push_error(&mut errors, "email", "Invalid email format");
    } else if patients.email_exists(&data.email) {
        push_error(&mut errors, "email", "Email is already registered");
    }

    if !is_valid_phone(&data.phone_number) {
        push_error(
            &mut errors,
            "phone_number",
            "Invalid phone number format. Use international format (e.g., +1234567890)",
        );
    } else if patients.phone_exists(&data.phone_number) {
        push_error(&mut errors, "phone_number", "Phone number is already registered");
    }

    if !is_valid_password(&data.password) {
        push_error(
            &mut errors,
            "password",
            "Password must contain at least 8 characters, including uppercase, lowercase, number, and special character",
        );
    }
    if data.password != data.confirm_password {
        push_error(&mut errors, "confirm_password", "Passwords do not match");
    }

    if let Err(message) = validate_date_of_birth(data.date_of_birth) {
        push_error(&mut errors, "date_of_birth", message);
    }

    if !is_valid_postal_code(&data.address.zip) {
        push_error(&mut errors, "address.zip", "Invalid postal code format");
    }

    if let Some(contact) = &data.emergency_contact {
        if let Some(phone) = &contact.phone {
            if !is_valid_phone(phone) {
                push_error(
                    &mut errors,
                    "emergency_contact.phone",
                    "Invalid emergency contact phone number format",
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationFields(errors))
    }
}

/// Login credential presence/format check
pub fn validate_login(email: &str, password: &str) -> AppResult<()> {
    let mut errors = FieldErrors::new();

    if email.trim().is_empty() {
        push_error(&mut errors, "email", "Email is required");
    } else if !is_valid_email(email.trim()) {
        push_error(&mut errors, "email", "Invalid email format");
    }

    if password.is_empty() {
        push_error(&mut errors, "password", "Password is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationFields(errors))
    }
}
