//! Provider registration endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::auth::{RegisteredProvider, VerifyEmailRequest},
    models::provider::RegisterProvider,
    models::response::ApiResponse,
};

/// Register a new provider
#[utoipa::path(
    post,
    path = "/provider/register",
    tag = "providers",
    request_body = RegisterProvider,
    responses(
        (status = 201, description = "Provider registered"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(body): Json<RegisterProvider>,
) -> AppResult<(StatusCode, Json<ApiResponse<RegisteredProvider>>)> {
    let data = state.services.providers.register(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "Provider registered successfully. Verification email sent.",
            data,
        )),
    ))
}

/// Verify provider email with a verification token
#[utoipa::path(
    post,
    path = "/provider/verify-email",
    tag = "providers",
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
    state.services.providers.verify_email(&body.token).await?;
    Ok(Json(ApiResponse::message("Provider email verified successfully.")))
}
