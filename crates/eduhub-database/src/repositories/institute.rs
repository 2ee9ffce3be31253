//! Institute repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use eduhub_core::error::{AppError, ErrorKind};
use eduhub_core::result::AppResult;
use eduhub_core::types::InstituteId;
use eduhub_entity::institute::{CreateInstitute, Institute};

use crate::store::InstituteStore;

/// PostgreSQL-backed institute store.
#[derive(Debug, Clone)]
pub struct InstituteRepository {
    pool: PgPool,
}

impl InstituteRepository {
    /// Create a new institute repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstituteStore for InstituteRepository {
    async fn find_by_id(&self, id: InstituteId) -> AppResult<Option<Institute>> {
        sqlx::query_as::<_, Institute>("SELECT * FROM institutes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find institute", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Institute>> {
        sqlx::query_as::<_, Institute>("SELECT * FROM institutes ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list institutes", e))
    }

    async fn create(&self, data: &CreateInstitute) -> AppResult<Institute> {
        sqlx::query_as::<_, Institute>(
            "INSERT INTO institutes (id, name, institute_type) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(InstituteId::generate())
        .bind(&data.name)
        .bind(data.institute_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create institute", e))
    }
}
