//! In-memory principal store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use eduhub_core::error::AppError;
use eduhub_core::result::AppResult;
use eduhub_core::types::{InstituteId, UserId};
use eduhub_entity::user::{CreateUser, User};

use crate::store::UserStore;

/// Principals keyed by id, plus a lowercase email index.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<UserId, User>,
    emails: DashMap<String, UserId>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(&email.to_lowercase()).map(|e| *e) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        match self.emails.entry(data.email.to_lowercase()) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already in use")),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: UserId::generate(),
                    email: data.email.clone(),
                    name: data.name.clone(),
                    password_hash: data.password_hash.clone(),
                    role: data.role,
                    institute_id: None,
                    last_login_at: None,
                    created_at: now,
                    updated_at: now,
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    async fn update_last_login(&self, id: UserId, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.last_login_at = Some(at);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn bind_institute(&self, id: UserId, institute_id: InstituteId) -> AppResult<bool> {
        Ok(match self.users.get_mut(&id) {
            Some(mut user) if user.institute_id.is_none() => {
                user.institute_id = Some(institute_id);
                user.updated_at = Utc::now();
                true
            }
            _ => false,
        })
    }

    async fn reassign_institute(&self, id: UserId, institute_id: InstituteId) -> AppResult<bool> {
        Ok(match self.users.get_mut(&id) {
            Some(mut user) => {
                user.institute_id = Some(institute_id);
                user.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }
}
