//! One implementation of every store, chosen by configuration.

use std::sync::Arc;

use tracing::info;

use eduhub_core::config::{DatabaseBackend, DatabaseConfig};
use eduhub_core::result::AppResult;
use eduhub_entity::record::{Course, Student, Teacher};

use crate::connection::DatabasePool;
use crate::memory::{MemoryInstituteStore, MemoryRecordStore, MemoryUserStore};
use crate::repositories::{InstituteRepository, PgRecordRepository, UserRepository};
use crate::store::{InstituteStore, RecordStore, UserStore};

/// Shared handles to every store.
#[derive(Clone)]
pub struct Stores {
    /// Principals.
    pub users: Arc<dyn UserStore>,
    /// Institutes.
    pub institutes: Arc<dyn InstituteStore>,
    /// Courses.
    pub courses: Arc<dyn RecordStore<Course>>,
    /// Student roster.
    pub students: Arc<dyn RecordStore<Student>>,
    /// Teacher roster.
    pub teachers: Arc<dyn RecordStore<Teacher>>,
}

impl Stores {
    /// Fresh, empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            institutes: Arc::new(MemoryInstituteStore::new()),
            courses: Arc::new(MemoryRecordStore::<Course>::new()),
            students: Arc::new(MemoryRecordStore::<Student>::new()),
            teachers: Arc::new(MemoryRecordStore::<Teacher>::new()),
        }
    }

    /// PostgreSQL repositories over a shared pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        let pool = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            institutes: Arc::new(InstituteRepository::new(pool.clone())),
            courses: Arc::new(PgRecordRepository::<Course>::new(pool.clone())),
            students: Arc::new(PgRecordRepository::<Student>::new(pool.clone())),
            teachers: Arc::new(PgRecordRepository::<Teacher>::new(pool)),
        }
    }

    /// Build the configured backend, connecting to PostgreSQL if needed.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory store backend");
                Ok(Self::memory())
            }
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(&pool))
            }
        }
    }
}
