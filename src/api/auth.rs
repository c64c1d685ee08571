//! Provider authentication endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::auth::{LoginRequest, ProviderLoginData, RefreshData, RefreshRequest},
    models::response::ApiResponse,
};

/// Provider login
#[utoipa::path(
    post,
    path = "/provider/login",
    tag = "provider-auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account not verified or inactive"),
        (status = 423, description = "Account locked")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<ProviderLoginData>>> {
    let data = state.services.auth.login_provider(&body.email, &body.password).await?;
    Ok(Json(ApiResponse::ok("Login successful", data)))
}

/// Refresh access token using a refresh token
#[utoipa::path(
    post,
    path = "/provider/refresh",
    tag = "provider-auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token refreshed"),
        (status = 401, description = "Invalid or expired refresh token")
    )
)]
pub async fn refresh(
    State(state): State<crate::AppState>,
    Json(body): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<RefreshData>>> {
    let data = state.services.auth.refresh(&body.refresh_token).await?;
    Ok(Json(ApiResponse::ok("Token refreshed successfully", data)))
}

/// Provider logout. Token invalidation is not implemented; the client is
/// expected to discard its tokens.
#[utoipa::path(
    post,
    path = "/provider/logout",
    tag = "provider-auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Logged out")
    )
)]
pub async fn logout(
    State(_state): State<crate::AppState>,
    Json(_body): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(ApiResponse::message("Logged out successfully")))
}
