//! Patient store

use std::sync::{Arc, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::patient::Patient;

/// In-memory patient store
#[derive(Clone, Default)]
pub struct PatientsRepository {
    inner: Arc<RwLock<Vec<Patient>>>,
}

impl PatientsRepository {
    pub fn insert(&self, patient: Patient) {
        self.inner.write().expect("patients lock poisoned").push(patient);
    }

    pub fn get_by_id(&self, id: Uuid) -> AppResult<Patient> {
        self.inner
            .read()
            .expect("patients lock poisoned")
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))
    }

    pub fn find_by_email(&self, email: &str) -> Option<Patient> {
        self.inner
            .read()
            .expect("patients lock poisoned")
            .iter()
            .find(|p| p.email == email)
            .cloned()
    }

    pub fn email_exists(&self, email: &str) -> bool {
        self.inner
            .read()
            .expect("patients lock poisoned")
            .iter()
            .any(|p| p.email == email)
    }

    pub fn phone_exists(&self, phone: &str) -> bool {
        self.inner
            .read()
            .expect("patients lock poisoned")
            .iter()
            .any(|p| p.phone_number == phone)
    }

    /// Apply a mutation to a patient and refresh its updated timestamp
    pub fn update<F>(&self, id: Uuid, f: F) -> AppResult<Patient>
    where
        F: FnOnce(&mut Patient),
    {
        let mut patients = self.inner.write().expect("patients lock poisoned");
        let patient = patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;
        f(patient);
        patient.updated_at = Utc::now();
        Ok(patient.clone())
    }
}
