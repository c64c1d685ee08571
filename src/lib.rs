//! Health First - Healthcare Provider & Patient Management
//!
//! A Rust REST API server for healthcare provider and patient management:
//! registration, authentication, and provider availability with recurring
//! schedules, timezone handling, and slot conflict detection.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduling;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
