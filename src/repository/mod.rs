//! Repository layer: the injected store abstraction
//!
//! In-memory collections standing in for persistent storage. Services only
//! ever talk to these repositories, so a real persistence engine can be
//! substituted without touching the scheduling core.

pub mod availability;
pub mod patients;
pub mod providers;
pub mod tokens;

/// Main repository struct composing the per-domain stores
#[derive(Clone, Default)]
pub struct Repository {
    pub providers: providers::ProvidersRepository,
    pub patients: patients::PatientsRepository,
    pub availability: availability::AvailabilityRepository,
    pub tokens: tokens::TokensRepository,
}

impl Repository {
    /// Create a new repository with empty stores
    pub fn new() -> Self {
        Self::default()
    }
}
