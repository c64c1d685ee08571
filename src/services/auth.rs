//! Authentication service: login, token refresh, password hashing

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::auth::{
        Claims, PatientLoginData, ProviderInfo, ProviderLoginData, RefreshData, Role,
    },
    models::enums::VerificationStatus,
    models::provider::Provider,
    repository::Repository,
    services::validation,
};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against its stored hash
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Random single-use token for email verification
pub fn generate_verification_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate a provider and return an access/refresh token pair.
    ///
    /// Five failed attempts lock the account for the configured duration.
    pub async fn login_provider(&self, email: &str, password: &str) -> AppResult<ProviderLoginData> {
        let provider = self
            .repository
            .providers
            .find_by_email(email)
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if let Some(locked_until) = provider.locked_until {
            if locked_until > Utc::now() {
                return Err(AppError::AccountLocked(
                    "Account locked due to failed attempts".to_string(),
                ));
            }
        }

        if !verify_password(password, &provider.password_hash)? {
            let attempts = provider.failed_login_attempts + 1;
            let lock = attempts >= self.config.max_failed_logins;
            let lockout_minutes = self.config.lockout_minutes;
            self.repository.providers.update(provider.id, |p| {
                p.failed_login_attempts = attempts;
                if lock {
                    p.locked_until = Some(Utc::now() + Duration::minutes(lockout_minutes));
                }
            })?;
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        if !provider.is_active || provider.verification_status != VerificationStatus::Verified {
            return Err(AppError::AccountNotVerified(
                "Account not verified or inactive".to_string(),
            ));
        }

        let provider = self.repository.providers.update(provider.id, |p| {
            p.failed_login_attempts = 0;
            p.locked_until = None;
            p.last_login = Some(Utc::now());
            p.login_count += 1;
        })?;

        let (access_token, refresh_token) = self.issue_provider_tokens(&provider)?;

        tracing::info!("Provider login successful. ID: {}", provider.id);

        Ok(ProviderLoginData {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_seconds,
            token_type: "Bearer".to_string(),
            provider: ProviderInfo {
                id: provider.id,
                first_name: provider.first_name,
                last_name: provider.last_name,
                email: provider.email,
                specialization: provider.specialization,
                verification_status: provider.verification_status,
                is_active: provider.is_active,
            },
        })
    }

    /// Exchange a valid refresh token for a new token pair
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshData> {
        let claims = Claims::from_token(refresh_token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired refresh token".to_string()))?;

        if claims.role != Role::Provider {
            return Err(AppError::Authentication(
                "Invalid or expired refresh token".to_string(),
            ));
        }

        let provider = self
            .repository
            .providers
            .get_by_id(claims.sub)
            .map_err(|_| AppError::NotFound("Provider not found".to_string()))?;

        if !provider.is_active || provider.verification_status != VerificationStatus::Verified {
            return Err(AppError::AccountNotVerified(
                "Account not verified or inactive".to_string(),
            ));
        }

        let (access_token, refresh_token) = self.issue_provider_tokens(&provider)?;

        Ok(RefreshData {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_seconds,
            token_type: "Bearer".to_string(),
        })
    }

    /// Authenticate a patient and return a short-lived access token
    pub async fn login_patient(&self, email: &str, password: &str) -> AppResult<PatientLoginData> {
        validation::validate_login(email, password)?;

        let patient = self
            .repository
            .patients
            .find_by_email(email.trim())
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !patient.is_active {
            return Err(AppError::Authentication("Account is deactivated".to_string()));
        }

        if !verify_password(password, &patient.password_hash)? {
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: patient.id,
            email: patient.email.clone(),
            role: Role::Patient,
            specialization: None,
            verification_status: None,
            exp: now + self.config.patient_access_token_seconds,
            iat: now,
        };
        let access_token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("Patient login successful. ID: {}", patient.id);

        Ok(PatientLoginData {
            access_token,
            expires_in: self.config.patient_access_token_seconds,
            token_type: "Bearer".to_string(),
            patient,
        })
    }

    fn issue_provider_tokens(&self, provider: &Provider) -> AppResult<(String, String)> {
        let now = Utc::now().timestamp();

        let mut claims = Claims {
            sub: provider.id,
            email: provider.email.clone(),
            role: Role::Provider,
            specialization: Some(provider.specialization.clone()),
            verification_status: Some(provider.verification_status),
            exp: now + self.config.access_token_seconds,
            iat: now,
        };
        let access = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        claims.exp = now + self.config.refresh_token_seconds;
        let refresh = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((access, refresh))
    }
}
