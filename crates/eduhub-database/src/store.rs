//! Store traits the service layer depends on.
//!
//! Stores execute whatever filter they are handed. Tenant scoping is the
//! caller's job (see `eduhub_auth::tenant::scope`); stores never add or
//! remove institute conditions themselves.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use eduhub_core::result::AppResult;
use eduhub_core::types::{Filter, InstituteId, UserId};
use eduhub_entity::institute::{CreateInstitute, Institute};
use eduhub_entity::tenant::TenantRecord;
use eduhub_entity::user::{CreateUser, User};

/// Principal persistence.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a principal by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a principal by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a principal. Duplicate emails are a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Record a successful login.
    async fn update_last_login(&self, id: UserId, at: DateTime<Utc>) -> AppResult<()>;

    /// Bind a principal to an institute if it has none yet.
    ///
    /// Returns `false` when the principal was already bound (or is absent).
    async fn bind_institute(&self, id: UserId, institute_id: InstituteId) -> AppResult<bool>;

    /// Unconditionally move a principal to an institute (administrative).
    ///
    /// Returns `false` when the principal does not exist.
    async fn reassign_institute(&self, id: UserId, institute_id: InstituteId) -> AppResult<bool>;
}

/// Institute persistence.
#[async_trait]
pub trait InstituteStore: Send + Sync + 'static {
    /// Find an institute by primary key.
    async fn find_by_id(&self, id: InstituteId) -> AppResult<Option<Institute>>;

    /// List every institute, oldest first.
    async fn find_all(&self) -> AppResult<Vec<Institute>>;

    /// Create an institute.
    async fn create(&self, data: &CreateInstitute) -> AppResult<Institute>;
}

/// Persistence for an institute-scoped table.
#[async_trait]
pub trait RecordStore<T: TenantRecord>: Send + Sync + 'static {
    /// All rows matching the filter, oldest first.
    async fn find(&self, filter: &Filter) -> AppResult<Vec<T>>;

    /// The first row matching the filter.
    async fn find_one(&self, filter: &Filter) -> AppResult<Option<T>>;

    /// Insert a fully built row and return it as stored.
    async fn insert(&self, record: &T) -> AppResult<T>;

    /// Delete rows matching the filter. Returns the number removed.
    async fn delete(&self, filter: &Filter) -> AppResult<u64>;
}
