//! Provider store

use std::sync::{Arc, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::provider::{Provider, ProviderSummary};

/// In-memory provider store; doubles as the provider-directory collaborator
/// consumed by slot search.
#[derive(Clone, Default)]
pub struct ProvidersRepository {
    inner: Arc<RwLock<Vec<Provider>>>,
}

impl ProvidersRepository {
    pub fn insert(&self, provider: Provider) {
        self.inner.write().expect("providers lock poisoned").push(provider);
    }

    pub fn get_by_id(&self, id: Uuid) -> AppResult<Provider> {
        self.inner
            .read()
            .expect("providers lock poisoned")
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", id)))
    }

    pub fn find_by_email(&self, email: &str) -> Option<Provider> {
        self.inner
            .read()
            .expect("providers lock poisoned")
            .iter()
            .find(|p| p.email == email)
            .cloned()
    }

    pub fn email_exists(&self, email: &str) -> bool {
        self.inner
            .read()
            .expect("providers lock poisoned")
            .iter()
            .any(|p| p.email == email)
    }

    pub fn phone_exists(&self, phone: &str) -> bool {
        self.inner
            .read()
            .expect("providers lock poisoned")
            .iter()
            .any(|p| p.phone_number == phone)
    }

    pub fn license_exists(&self, license_number: &str) -> bool {
        self.inner
            .read()
            .expect("providers lock poisoned")
            .iter()
            .any(|p| p.license_number == license_number)
    }

    /// Apply a mutation to a provider and refresh its updated timestamp
    pub fn update<F>(&self, id: Uuid, f: F) -> AppResult<Provider>
    where
        F: FnOnce(&mut Provider),
    {
        let mut providers = self.inner.write().expect("providers lock poisoned");
        let provider = providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", id)))?;
        f(provider);
        provider.updated_at = Utc::now();
        Ok(provider.clone())
    }

    /// Directory projection used by slot search
    pub fn summary(&self, id: Uuid) -> Option<ProviderSummary> {
        self.inner
            .read()
            .expect("providers lock poisoned")
            .iter()
            .find(|p| p.id == id)
            .map(|p| ProviderSummary {
                id: p.id,
                name: format!("Dr. {} {}", p.first_name, p.last_name),
                specialization: p.specialization.clone(),
                years_of_experience: p.years_of_experience,
                clinic_address: p.clinic_address.formatted(),
            })
    }
}
