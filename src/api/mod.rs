//! API handlers for the Health First REST endpoints

pub mod auth;
pub mod availability;
pub mod health;
pub mod openapi;
pub mod patients;
pub mod providers;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{
    error::AppError,
    models::auth::{Claims, Role},
    AppState,
};

fn bearer_claims(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Authentication(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_header[7..];
    Claims::from_token(token, &state.config.auth.jwt_secret)
        .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))
}

/// Extractor for an authenticated provider from a JWT bearer token
pub struct AuthenticatedProvider(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedProvider {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        if claims.role != Role::Provider {
            return Err(AppError::Authorization(
                "Provider privileges required".to_string(),
            ));
        }
        Ok(AuthenticatedProvider(claims))
    }
}

/// Extractor for an authenticated patient from a JWT bearer token
pub struct AuthenticatedPatient(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedPatient {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        if claims.role != Role::Patient {
            return Err(AppError::Authorization(
                "Patient privileges required".to_string(),
            ));
        }
        Ok(AuthenticatedPatient(claims))
    }
}
