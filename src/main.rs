//! Health First Server - Healthcare Provider & Patient Management
//!
//! A Rust REST API server for provider/patient registration, authentication
//! and provider availability management.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthfirst_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("healthfirst_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Health First Server v{}", env!("CARGO_PKG_VERSION"));

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new();
    let services = Services::new(repository, config.auth.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Provider registration
        .route("/provider/register", post(api::providers::register))
        .route("/provider/verify-email", post(api::providers::verify_email))
        // Provider authentication
        .route("/provider/login", post(api::auth::login))
        .route("/provider/refresh", post(api::auth::refresh))
        .route("/provider/logout", post(api::auth::logout))
        // Provider availability
        .route("/provider/availability", post(api::availability::create))
        .route("/provider/availability/search", get(api::availability::search))
        .route("/provider/availability/:slot_id", put(api::availability::update_slot))
        .route("/provider/availability/:slot_id", delete(api::availability::delete_slot))
        .route("/provider/:provider_id/availability", get(api::availability::list))
        // Patients
        .route("/patient/register", post(api::patients::register))
        .route("/patient/login", post(api::patients::login))
        .route("/patient/verify-email", post(api::patients::verify_email))
        .route("/patient/profile/:patient_id", get(api::patients::profile))
        .route("/patient/logout", post(api::patients::logout))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
