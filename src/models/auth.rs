//! Authentication models: JWT claims and login payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::VerificationStatus;
use super::patient::Patient;

/// Token subject role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Provider,
    Patient,
}

/// JWT claims for authenticated providers and patients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id (provider or patient UUID)
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and validate a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

/// Login request (providers and patients)
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Email verification request
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Provider identity subset returned on login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderInfo {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialization: String,
    pub verification_status: VerificationStatus,
    pub is_active: bool,
}

/// Successful provider login payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderLoginData {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
    pub provider: ProviderInfo,
}

/// Successful token refresh payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshData {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// Successful patient login payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PatientLoginData {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub patient: Patient,
}

/// Registration confirmation payload for providers
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisteredProvider {
    pub provider_id: Uuid,
    pub email: String,
    pub verification_status: VerificationStatus,
}

/// Registration confirmation payload for patients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisteredPatient {
    pub patient_id: Uuid,
    pub email: String,
    pub phone_number: String,
    pub email_verified: bool,
    pub phone_verified: bool,
}
