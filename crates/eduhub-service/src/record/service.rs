//! Generic CRUD over an institute-scoped table.
//!
//! Every store call goes through [`TenantScope::apply`], and every by-id
//! fetch is checked with [`TenantScope::ensure_owned`] before it is
//! returned or acted on.

use std::sync::Arc;

use tracing::info;

use eduhub_auth::TenantScope;
use eduhub_core::error::AppError;
use eduhub_core::types::{Filter, FilterField, InstituteId};
use eduhub_database::store::{InstituteStore, RecordStore};
use eduhub_entity::tenant::{NewRecord, TENANT_COLUMN, TenantRecord};

/// Optional list narrowing.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Restrict to one institute. Only meaningful for the cross-institute
    /// scope; a bound scope always wins.
    pub institute_id: Option<InstituteId>,
    /// Case-insensitive substring match on the record's search column.
    pub search: Option<String>,
}

impl ListQuery {
    fn into_filter<T: TenantRecord>(self) -> Filter {
        let mut filter = Filter::new();
        if let Some(id) = self.institute_id {
            filter = filter.with_eq(TENANT_COLUMN, id);
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            filter = filter.and(FilterField::ilike(
                T::SEARCH_COLUMN,
                format!("%{}%", escape_like(term)),
            ));
        }
        filter
    }
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Tenant-scoped list/get/create/delete for one record type.
pub struct RecordService<T: TenantRecord> {
    store: Arc<dyn RecordStore<T>>,
    institutes: Arc<dyn InstituteStore>,
}

impl<T: TenantRecord> Clone for RecordService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            institutes: Arc::clone(&self.institutes),
        }
    }
}

impl<T: TenantRecord> RecordService<T> {
    /// Creates a service over the record store.
    pub fn new(store: Arc<dyn RecordStore<T>>, institutes: Arc<dyn InstituteStore>) -> Self {
        Self { store, institutes }
    }

    /// Records visible in the scope, oldest first.
    pub async fn list(&self, scope: TenantScope, query: ListQuery) -> Result<Vec<T>, AppError> {
        let filter = scope.apply(query.into_filter::<T>())?;
        self.store.find(&filter).await
    }

    /// One record by id. Records of other institutes are reported as not
    /// found.
    pub async fn get(&self, scope: TenantScope, id: T::Id) -> Result<T, AppError> {
        let filter = scope.apply(Filter::new().with_eq("id", id))?;
        let record = self.store.find_one(&filter).await?;
        scope.ensure_owned(record, id)
    }

    /// Creates a record in the caller's institute.
    ///
    /// A cross-institute caller must name the target institute, which must
    /// exist. A bound caller's `target` is ignored.
    pub async fn create<N>(
        &self,
        scope: TenantScope,
        input: N,
        target: Option<InstituteId>,
    ) -> Result<T, AppError>
    where
        N: NewRecord<Record = T>,
    {
        let institute_id = match scope {
            TenantScope::Institute(id) => id,
            TenantScope::AllInstitutes => {
                let id = target.ok_or_else(|| {
                    AppError::validation(format!(
                        "institute_id is required to create a {}",
                        T::LABEL.to_lowercase()
                    ))
                })?;
                self.institutes
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Institute {id} not found")))?;
                id
            }
        };

        let record = self.store.insert(&input.into_record(institute_id)).await?;

        info!(
            table = T::TABLE,
            record_id = %record.id(),
            institute_id = %institute_id,
            "Record created"
        );

        Ok(record)
    }

    /// Deletes one record by id, subject to the same visibility as [`get`](Self::get).
    pub async fn delete(&self, scope: TenantScope, id: T::Id) -> Result<(), AppError> {
        let record = self.get(scope, id).await?;

        let mut filter = Filter::new().with_eq("id", id);
        if let Some(owner) = record.institute_id() {
            filter = filter.with_eq(TENANT_COLUMN, owner);
        }
        let removed = self.store.delete(&scope.apply(filter)?).await?;
        if removed == 0 {
            return Err(AppError::not_found(format!("{} {id} not found", T::LABEL)));
        }

        info!(table = T::TABLE, record_id = %id, "Record deleted");
        Ok(())
    }
}
