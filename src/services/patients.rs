//! Patient registration and profile service

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::auth::{RegisteredPatient, Role},
    models::patient::{Patient, RegisterPatient},
    repository::{tokens::VerificationToken, Repository},
    services::{auth, validation},
};

#[derive(Clone)]
pub struct PatientsService {
    repository: Repository,
}

impl PatientsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new patient
    pub async fn register(&self, data: RegisterPatient) -> AppResult<RegisteredPatient> {
        data.validate()?;
        validation::validate_patient_registration(&data, &self.repository.patients)?;

        let password_hash = auth::hash_password(&data.password)?;
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone_number: data.phone_number,
            password_hash,
            date_of_birth: data.date_of_birth,
            gender: data.gender,
            address: data.address,
            emergency_contact: data.emergency_contact,
            medical_history: data.medical_history.unwrap_or_default(),
            insurance_info: data.insurance_info,
            email_verified: false,
            phone_verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let result = RegisteredPatient {
            patient_id: patient.id,
            email: patient.email.clone(),
            phone_number: patient.phone_number.clone(),
            email_verified: patient.email_verified,
            phone_verified: patient.phone_verified,
        };

        self.repository.tokens.insert(VerificationToken {
            token: auth::generate_verification_token(),
            subject_id: patient.id,
            role: Role::Patient,
            expires_at: now + Duration::hours(24),
        });
        self.repository.patients.insert(patient);

        tracing::info!(
            "Patient registered successfully. ID: {}, Email: {}",
            result.patient_id,
            result.email
        );

        Ok(result)
    }

    /// Verify a patient email with a stored single-use token
    pub async fn verify_email(&self, token: &str) -> AppResult<()> {
        let verification = self
            .repository
            .tokens
            .consume(token)
            .filter(|t| t.role == Role::Patient)
            .ok_or_else(|| {
                AppError::BadRequest("Invalid or expired verification token".to_string())
            })?;

        self.repository.patients.update(verification.subject_id, |p| {
            p.email_verified = true;
        })?;

        tracing::info!("Patient email verified. ID: {}", verification.subject_id);
        Ok(())
    }

    /// Fetch a patient profile; the password hash is never serialized
    pub async fn profile(&self, patient_id: Uuid) -> AppResult<Patient> {
        self.repository.patients.get_by_id(patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::models::enums::Gender;
    use crate::models::patient::Address;

    fn service() -> PatientsService {
        PatientsService::new(Repository::new())
    }

    fn registration(email: &str, phone: &str) -> RegisterPatient {
        RegisterPatient {
            first_name: "Sam".to_string(),
            last_name: "Rivera".to_string(),
            email: email.to_string(),
            phone_number: phone.to_string(),
            password: "Str0ng!pass".to_string(),
            confirm_password: "Str0ng!pass".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 20).unwrap(),
            gender: Gender::Other,
            address: Address {
                street: "42 Elm St".to_string(),
                city: "Boston".to_string(),
                state: "MA".to_string(),
                zip: "02101".to_string(),
            },
            emergency_contact: None,
            medical_history: None,
            insurance_info: None,
        }
    }

    #[tokio::test]
    async fn test_register_and_fetch_profile() {
        let service = service();
        let result = service
            .register(registration("sam@example.test", "+12025550123"))
            .await
            .unwrap();
        assert!(!result.email_verified);

        let profile = service.profile(result.patient_id).await.unwrap();
        assert_eq!(profile.email, "sam@example.test");
        assert!(profile.is_active);
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let service = service();
        let err = service.profile(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_underage_patient_rejected() {
        let service = service();
        let mut data = registration("kid@example.test", "+12025550123");
        data.date_of_birth = Utc::now().date_naive() - Duration::days(365 * 10);

        let err = service.register(data).await.unwrap_err();
        match err {
            AppError::ValidationFields(fields) => assert!(fields.contains_key("date_of_birth")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected() {
        let service = service();
        let err = service
            .register(registration("sam@example.test", "12 345"))
            .await
            .unwrap_err();
        match err {
            AppError::ValidationFields(fields) => assert!(fields.contains_key("phone_number")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let service = service();
        let mut data = registration("sam@example.test", "+12025550123");
        data.password = "password".to_string();
        data.confirm_password = "password".to_string();

        let err = service.register(data).await.unwrap_err();
        match err {
            AppError::ValidationFields(fields) => assert!(fields.contains_key("password")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service();
        service
            .register(registration("sam@example.test", "+12025550123"))
            .await
            .unwrap();

        let err = service
            .register(registration("sam@example.test", "+12025550199"))
            .await
            .unwrap_err();
        match err {
            AppError::ValidationFields(fields) => assert!(fields.contains_key("email")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
