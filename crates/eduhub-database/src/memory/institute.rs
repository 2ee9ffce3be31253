//! In-memory institute store.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use eduhub_core::result::AppResult;
use eduhub_core::types::InstituteId;
use eduhub_entity::institute::{CreateInstitute, Institute};

use crate::store::InstituteStore;

/// Institutes keyed by id, tagged with their insertion sequence.
#[derive(Debug, Default)]
pub struct MemoryInstituteStore {
    institutes: DashMap<InstituteId, (u64, Institute)>,
    seq: AtomicU64,
}

impl MemoryInstituteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InstituteStore for MemoryInstituteStore {
    async fn find_by_id(&self, id: InstituteId) -> AppResult<Option<Institute>> {
        Ok(self.institutes.get(&id).map(|entry| entry.1.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<Institute>> {
        let mut all: Vec<(u64, Institute)> =
            self.institutes.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|(seq, _)| *seq);
        Ok(all.into_iter().map(|(_, i)| i).collect())
    }

    async fn create(&self, data: &CreateInstitute) -> AppResult<Institute> {
        let institute = Institute {
            id: InstituteId::generate(),
            name: data.name.clone(),
            institute_type: data.institute_type,
            created_at: Utc::now(),
        };
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.institutes
            .insert(institute.id, (seq, institute.clone()));
        Ok(institute)
    }
}
