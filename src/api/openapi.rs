//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, availability, health, patients, providers};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Health First API",
        version = "1.0.0",
        description = "Healthcare Provider & Patient Management REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Health First Team", email = "support@healthfirst.example")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Providers
        providers::register,
        providers::verify_email,
        // Provider auth
        auth::login,
        auth::refresh,
        auth::logout,
        // Patients
        patients::register,
        patients::login,
        patients::verify_email,
        patients::profile,
        patients::logout,
        // Availability
        availability::create,
        availability::list,
        availability::update_slot,
        availability::delete_slot,
        availability::search,
    ),
    components(
        schemas(
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            // Auth
            crate::models::auth::Role,
            crate::models::auth::LoginRequest,
            crate::models::auth::RefreshRequest,
            crate::models::auth::VerifyEmailRequest,
            crate::models::auth::ProviderInfo,
            crate::models::auth::ProviderLoginData,
            crate::models::auth::RefreshData,
            crate::models::auth::PatientLoginData,
            crate::models::auth::RegisteredProvider,
            crate::models::auth::RegisteredPatient,
            // Providers
            crate::models::provider::Provider,
            crate::models::provider::RegisterProvider,
            crate::models::provider::ClinicAddress,
            crate::models::provider::ProviderSummary,
            // Patients
            crate::models::patient::Patient,
            crate::models::patient::RegisterPatient,
            crate::models::patient::Address,
            crate::models::patient::EmergencyContact,
            crate::models::patient::InsuranceInfo,
            // Availability
            crate::models::availability::AvailabilityWindow,
            crate::models::availability::CreateAvailability,
            crate::models::availability::UpdateSlot,
            crate::models::availability::AppointmentSlot,
            crate::models::availability::Location,
            crate::models::availability::Pricing,
            crate::models::availability::DateRange,
            crate::models::availability::CreateAvailabilityResult,
            crate::models::availability::SlotView,
            crate::models::availability::DayAvailability,
            crate::models::availability::AvailabilitySummary,
            crate::models::availability::ProviderAvailabilityData,
            crate::models::availability::SearchSlotView,
            crate::models::availability::ProviderMatch,
            crate::models::availability::SearchCriteriaEcho,
            crate::models::availability::SearchData,
            // Enums
            crate::models::enums::RecurrencePattern,
            crate::models::enums::SlotStatus,
            crate::models::enums::AppointmentType,
            crate::models::enums::LocationType,
            crate::models::enums::Gender,
            crate::models::enums::VerificationStatus,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "providers", description = "Provider registration"),
        (name = "provider-auth", description = "Provider authentication"),
        (name = "patients", description = "Patient management"),
        (name = "availability", description = "Provider availability and slot search")
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document and Swagger UI
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
