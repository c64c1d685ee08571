//! Email verification token store

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::auth::Role;

/// A single-use email verification token
#[derive(Debug, Clone)]
pub struct VerificationToken {
    pub token: String,
    pub subject_id: Uuid,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

/// In-memory verification token store
#[derive(Clone, Default)]
pub struct TokensRepository {
    inner: Arc<RwLock<Vec<VerificationToken>>>,
}

impl TokensRepository {
    pub fn insert(&self, token: VerificationToken) {
        self.inner.write().expect("tokens lock poisoned").push(token);
    }

    /// Remove and return the token if it exists and has not expired
    pub fn consume(&self, token: &str) -> Option<VerificationToken> {
        let mut tokens = self.inner.write().expect("tokens lock poisoned");
        let index = tokens.iter().position(|t| t.token == token)?;
        let found = tokens.remove(index);
        if found.expires_at < Utc::now() {
            return None;
        }
        Some(found)
    }
}
