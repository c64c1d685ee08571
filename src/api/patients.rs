//! Patient registration, login and profile endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::auth::{LoginRequest, PatientLoginData, RegisteredPatient, VerifyEmailRequest},
    models::patient::{Patient, RegisterPatient},
    models::response::ApiResponse,
};

use super::AuthenticatedPatient;

/// Register a new patient
#[utoipa::path(
    post,
    path = "/patient/register",
    tag = "patients",
    request_body = RegisterPatient,
    responses(
        (status = 201, description = "Patient registered"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(body): Json<RegisterPatient>,
) -> AppResult<(StatusCode, Json<ApiResponse<RegisteredPatient>>)> {
    let data = state.services.patients.register(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Patient registered successfully. Verification email sent.",
            data,
        )),
    ))
}

/// Patient login
#[utoipa::path(
    post,
    path = "/patient/login",
    tag = "patients",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful"),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<PatientLoginData>>> {
    let data = state.services.auth.login_patient(&body.email, &body.password).await?;
    Ok(Json(ApiResponse::ok("Login successful", data)))
}

/// Verify patient email with a verification token
#[utoipa::path(
    post,
    path = "/patient/verify-email",
    tag = "patients",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified"),
        (status = 400, description = "Invalid or expired verification token")
    )
)]
pub async fn verify_email(
    State(state): State<crate::AppState>,
    Json(body): Json<VerifyEmailRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.patients.verify_email(&body.token).await?;
    Ok(Json(ApiResponse::message("Patient email verified successfully.")))
}

/// Get a patient profile. Patients can only read their own profile.
#[utoipa::path(
    get,
    path = "/patient/profile/{patient_id}",
    tag = "patients",
    security(("bearer_auth" = [])),
    params(("patient_id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient profile"),
        (status = 403, description = "Not the authenticated patient"),
        (status = 404, description = "Patient not found")
    )
)]
pub async fn profile(
    State(state): State<crate::AppState>,
    AuthenticatedPatient(claims): AuthenticatedPatient,
    Path(patient_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Patient>>> {
    if claims.sub != patient_id {
        return Err(AppError::Authorization(
            "Patients can only access their own profile".to_string(),
        ));
    }
    let patient = state.services.patients.profile(patient_id).await?;
    Ok(Json(ApiResponse::ok("Profile retrieved", patient)))
}

/// Patient logout. Token invalidation is not implemented; the client is
/// expected to discard its token.
#[utoipa::path(
    post,
    path = "/patient/logout",
    tag = "patients",
    responses(
        (status = 200, description = "Logged out")
    )
)]
pub async fn logout(State(_state): State<crate::AppState>) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(ApiResponse::message("Logged out successfully")))
}
