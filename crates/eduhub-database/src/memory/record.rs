//! In-memory store for institute-scoped records.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use eduhub_core::error::AppError;
use eduhub_core::result::AppResult;
use eduhub_core::types::Filter;
use eduhub_entity::tenant::TenantRecord;

use crate::store::RecordStore;

/// Records keyed by id, tagged with their insertion sequence.
pub struct MemoryRecordStore<T: TenantRecord> {
    records: DashMap<T::Id, (u64, T)>,
    seq: AtomicU64,
}

impl<T: TenantRecord> MemoryRecordStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    fn check_columns(filter: &Filter) -> AppResult<()> {
        match filter
            .fields()
            .iter()
            .find(|f| !T::COLUMNS.contains(&f.field.as_str()))
        {
            Some(f) => Err(AppError::validation(format!(
                "Unknown filter field '{}'",
                f.field
            ))),
            None => Ok(()),
        }
    }

    fn matching(&self, filter: &Filter) -> AppResult<Vec<(u64, T)>> {
        Self::check_columns(filter)?;
        let mut hits = Vec::new();
        for entry in self.records.iter() {
            let (seq, record) = entry.value();
            if filter.matches(&serde_json::to_value(record)?) {
                hits.push((*seq, record.clone()));
            }
        }
        hits.sort_by_key(|(seq, _)| *seq);
        Ok(hits)
    }
}

impl<T: TenantRecord> Default for MemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: TenantRecord> RecordStore<T> for MemoryRecordStore<T> {
    async fn find(&self, filter: &Filter) -> AppResult<Vec<T>> {
        Ok(self
            .matching(filter)?
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<T>> {
        Ok(self
            .matching(filter)?
            .into_iter()
            .next()
            .map(|(_, record)| record))
    }

    async fn insert(&self, record: &T) -> AppResult<T> {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.records.insert(record.id(), (seq, record.clone()));
        Ok(record.clone())
    }

    async fn delete(&self, filter: &Filter) -> AppResult<u64> {
        if filter.is_empty() {
            return Err(AppError::internal(format!(
                "Refusing unfiltered delete on {}",
                T::TABLE
            )));
        }
        let mut removed = 0;
        for (_, record) in self.matching(filter)? {
            if self.records.remove(&record.id()).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
