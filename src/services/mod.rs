//! Business logic services

pub mod auth;
pub mod availability;
pub mod patients;
pub mod providers;
pub mod validation;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub providers: providers::ProvidersService,
    pub patients: patients::PatientsService,
    pub availability: availability::AvailabilityService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            providers: providers::ProvidersService::new(repository.clone()),
            patients: patients::PatientsService::new(repository.clone()),
            availability: availability::AvailabilityService::new(repository),
        }
    }
}
