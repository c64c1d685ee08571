//! Provider availability endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::availability::{
        CreateAvailability, CreateAvailabilityResult, DeleteSlotQuery, ListAvailabilityQuery,
        ProviderAvailabilityData, SearchCriteria, SearchData, SearchQuery, UpdateSlot,
    },
    models::enums::{AppointmentType, SlotStatus},
    models::response::ApiResponse,
};

use super::AuthenticatedProvider;

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string()))
}

fn parse_date_opt(value: Option<&String>) -> AppResult<Option<NaiveDate>> {
    value.map(|v| parse_date(v)).transpose()
}

/// Create availability slots, single or recurring
#[utoipa::path(
    post,
    path = "/provider/availability",
    tag = "availability",
    security(("bearer_auth" = [])),
    request_body = CreateAvailability,
    responses(
        (status = 201, description = "Availability slots created"),
        (status = 400, description = "Malformed input"),
        (status = 409, description = "Time slot conflicts with existing availability"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    AuthenticatedProvider(claims): AuthenticatedProvider,
    Json(body): Json<CreateAvailability>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreateAvailabilityResult>>)> {
    if claims.sub != body.provider_id {
        return Err(AppError::Authorization(
            "Providers can only manage their own availability".to_string(),
        ));
    }

    let data = state.services.availability.create(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Availability slots created successfully", data)),
    ))
}

/// Get a provider's availability slots within a date range
#[utoipa::path(
    get,
    path = "/provider/{provider_id}/availability",
    tag = "availability",
    params(
        ("provider_id" = Uuid, Path, description = "Provider ID"),
        ListAvailabilityQuery
    ),
    responses(
        (status = 200, description = "Availability slots grouped by date"),
        (status = 400, description = "Missing or malformed dates")
    )
)]
pub async fn list(
    State(state): State<crate::AppState>,
    Path(provider_id): Path<Uuid>,
    Query(query): Query<ListAvailabilityQuery>,
) -> AppResult<Json<ApiResponse<ProviderAvailabilityData>>> {
    let (Some(start), Some(end)) = (&query.start_date, &query.end_date) else {
        return Err(AppError::BadRequest(
            "start_date and end_date are required".to_string(),
        ));
    };
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;

    let status = query
        .status
        .as_deref()
        .map(str::parse::<SlotStatus>)
        .transpose()
        .map_err(AppError::BadRequest)?;
    let appointment_type = query
        .appointment_type
        .as_deref()
        .map(str::parse::<AppointmentType>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let data = state
        .services
        .availability
        .list(
            provider_id,
            start_date,
            end_date,
            status,
            appointment_type,
            query.timezone.as_deref(),
        )
        .await?;
    Ok(Json(ApiResponse::ok("Availability retrieved", data)))
}

/// Update a specific availability slot
#[utoipa::path(
    put,
    path = "/provider/availability/{slot_id}",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(("slot_id" = Uuid, Path, description = "Slot ID")),
    request_body = UpdateSlot,
    responses(
        (status = 200, description = "Slot updated"),
        (status = 404, description = "Slot not found"),
        (status = 409, description = "Updated time conflicts with existing availability")
    )
)]
pub async fn update_slot(
    State(state): State<crate::AppState>,
    AuthenticatedProvider(_claims): AuthenticatedProvider,
    Path(slot_id): Path<Uuid>,
    Json(body): Json<UpdateSlot>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.availability.update_slot(slot_id, body).await?;
    Ok(Json(ApiResponse::message("Slot updated successfully")))
}

/// Delete an availability slot, optionally cascading over its recurrence
#[utoipa::path(
    delete,
    path = "/provider/availability/{slot_id}",
    tag = "availability",
    security(("bearer_auth" = [])),
    params(
        ("slot_id" = Uuid, Path, description = "Slot ID"),
        DeleteSlotQuery
    ),
    responses(
        (status = 200, description = "Slot deleted"),
        (status = 404, description = "Slot not found"),
        (status = 422, description = "Booked slots cannot be deleted")
    )
)]
pub async fn delete_slot(
    State(state): State<crate::AppState>,
    AuthenticatedProvider(_claims): AuthenticatedProvider,
    Path(slot_id): Path<Uuid>,
    Query(query): Query<DeleteSlotQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .services
        .availability
        .delete_slot(slot_id, query.delete_recurring, query.reason.as_deref())
        .await?;
    Ok(Json(ApiResponse::message("Slot deleted successfully")))
}

/// Search available appointment slots across providers
#[utoipa::path(
    get,
    path = "/provider/availability/search",
    tag = "availability",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching slots grouped by provider"),
        (status = 400, description = "Malformed dates or filters")
    )
)]
pub async fn search(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SearchData>>> {
    let criteria = SearchCriteria {
        date: parse_date_opt(query.date.as_ref())?,
        start_date: parse_date_opt(query.start_date.as_ref())?,
        end_date: parse_date_opt(query.end_date.as_ref())?,
        specialization: query.specialization,
        location: query.location,
        appointment_type: query
            .appointment_type
            .as_deref()
            .map(str::parse::<AppointmentType>)
            .transpose()
            .map_err(AppError::BadRequest)?,
        insurance_accepted: query.insurance_accepted,
        max_price: query.max_price,
        timezone: query.timezone,
        available_only: query.available_only,
    };

    let data = state.services.availability.search(criteria).await?;
    Ok(Json(ApiResponse::ok("Search completed", data)))
}
