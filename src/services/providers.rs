//! Provider registration and directory service

use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::auth::{RegisteredProvider, Role},
    models::enums::VerificationStatus,
    models::provider::{Provider, ProviderSummary, RegisterProvider},
    repository::{tokens::VerificationToken, Repository},
    services::{auth, validation},
};

#[derive(Clone)]
pub struct ProvidersService {
    repository: Repository,
}

impl ProvidersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new provider.
    ///
    /// The account is marked verified at creation so login works without a
    /// mail round-trip; the verification-token flow still exists and
    /// re-verifies idempotently.
    pub async fn register(&self, data: RegisterProvider) -> AppResult<RegisteredProvider> {
        data.validate()?;
        validation::validate_provider_registration(&data, &self.repository.providers)?;

        let password_hash = auth::hash_password(&data.password)?;
        let now = Utc::now();
        let provider = Provider {
            id: Uuid::new_v4(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone_number: data.phone_number,
            password_hash,
            specialization: data.specialization,
            license_number: data.license_number,
            years_of_experience: data.years_of_experience,
            clinic_address: data.clinic_address,
            verification_status: VerificationStatus::Verified,
            license_document_url: data.license_document_url,
            is_active: true,
            failed_login_attempts: 0,
            locked_until: None,
            last_login: None,
            login_count: 0,
            created_at: now,
            updated_at: now,
        };

        let result = RegisteredProvider {
            provider_id: provider.id,
            email: provider.email.clone(),
            verification_status: provider.verification_status,
        };

        self.repository.tokens.insert(VerificationToken {
            token: auth::generate_verification_token(),
            subject_id: provider.id,
            role: Role::Provider,
            expires_at: now + Duration::hours(24),
        });
        self.repository.providers.insert(provider);

        tracing::info!(
            "Provider registered successfully. ID: {}, Email: {}",
            result.provider_id,
            result.email
        );

        Ok(result)
    }

    /// Verify a provider email with a stored single-use token
    pub async fn verify_email(&self, token: &str) -> AppResult<()> {
        let verification = self
            .repository
            .tokens
            .consume(token)
            .filter(|t| t.role == Role::Provider)
            .ok_or_else(|| {
                AppError::BadRequest("Invalid or expired verification token".to_string())
            })?;

        self.repository.providers.update(verification.subject_id, |p| {
            p.verification_status = VerificationStatus::Verified;
        })?;

        tracing::info!("Provider email verified. ID: {}", verification.subject_id);
        Ok(())
    }

    /// Provider-directory lookup consumed by slot search
    pub async fn summary(&self, provider_id: Uuid) -> AppResult<ProviderSummary> {
        self.repository
            .providers
            .summary(provider_id)
            .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", provider_id)))
    }
}
