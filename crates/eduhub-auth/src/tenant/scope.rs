//! Tenant-scoped filter construction and post-fetch ownership checks.

use tracing::warn;

use eduhub_core::error::AppError;
use eduhub_core::types::{Filter, InstituteId};
use eduhub_entity::tenant::{TENANT_COLUMN, TenantOwned, TenantRecord};

/// The set of institutes a request may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// A single institute.
    Institute(InstituteId),
    /// Every institute. Only the guard produces this, for exempt roles.
    AllInstitutes,
}

impl TenantScope {
    /// The bound institute, or `None` for the exempt scope.
    pub fn institute_id(&self) -> Option<InstituteId> {
        match self {
            Self::Institute(id) => Some(*id),
            Self::AllInstitutes => None,
        }
    }

    /// Whether this is the cross-institute scope.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::AllInstitutes)
    }

    /// Restricts the filter to this scope. The exempt scope leaves it as is.
    pub fn apply(&self, filter: Filter) -> Result<Filter, AppError> {
        match self {
            Self::Institute(id) => scope_filter(Some(*id), filter),
            Self::AllInstitutes => Ok(filter),
        }
    }

    /// Whether the record is visible in this scope.
    pub fn permits<T: TenantOwned + ?Sized>(&self, record: &T) -> bool {
        match self {
            Self::Institute(id) => validate_ownership(Some(record), *id),
            Self::AllInstitutes => true,
        }
    }

    /// Unwraps a fetched record, reporting absence and cross-institute
    /// records alike as not found.
    pub fn ensure_owned<T: TenantRecord>(&self, record: Option<T>, id: T::Id) -> Result<T, AppError> {
        match record {
            Some(record) if self.permits(&record) => Ok(record),
            Some(record) => {
                warn!(
                    table = T::TABLE,
                    record_id = %id,
                    expected_institute = ?self.institute_id(),
                    actual_institute = ?record.institute_id(),
                    "Tenant ownership mismatch"
                );
                Err(not_found::<T>(id))
            }
            None => Err(not_found::<T>(id)),
        }
    }
}

fn not_found<T: TenantRecord>(id: T::Id) -> AppError {
    AppError::not_found(format!("{} {id} not found", T::LABEL))
}

/// Sets `institute_id = tenant_id` on the filter, replacing any
/// caller-supplied condition on that column.
///
/// Fails with `MISSING_TENANT_CONTEXT` when there is no tenant; callers
/// acting across institutes must go through [`TenantScope::AllInstitutes`].
pub fn scope_filter(tenant_id: Option<InstituteId>, mut filter: Filter) -> Result<Filter, AppError> {
    let tenant_id = tenant_id.ok_or_else(AppError::missing_tenant_context)?;
    filter.set_eq(TENANT_COLUMN, tenant_id);
    Ok(filter)
}

/// `true` only when the record exists and belongs to `expected`.
pub fn validate_ownership<T: TenantOwned + ?Sized>(record: Option<&T>, expected: InstituteId) -> bool {
    record.is_some_and(|r| r.institute_id() == Some(expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduhub_core::error::{ErrorKind, codes};
    use eduhub_core::types::{FilterField, FilterValue};
    use eduhub_entity::record::{Course, NewCourse};
    use eduhub_entity::tenant::NewRecord;

    fn course(institute: InstituteId) -> Course {
        NewCourse {
            title: "Geometry".into(),
            description: None,
        }
        .into_record(institute)
    }

    #[test]
    fn test_scope_filter_overrides_caller_institute() {
        let mine = InstituteId::generate();
        let theirs = InstituteId::generate();
        let filter = Filter::new()
            .with_eq(TENANT_COLUMN, theirs)
            .and(FilterField::ilike("title", "%geo%"));

        let scoped = scope_filter(Some(mine), filter).unwrap();
        assert_eq!(
            scoped.eq_value(TENANT_COLUMN),
            Some(&FilterValue::Uuid(mine.into_uuid()))
        );
        assert_eq!(
            scoped
                .fields()
                .iter()
                .filter(|f| f.field == TENANT_COLUMN)
                .count(),
            1
        );
        assert_eq!(scoped.fields().len(), 2);
    }

    #[test]
    fn test_scope_filter_without_tenant_fails() {
        let err = scope_filter(None, Filter::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.code, Some(codes::MISSING_TENANT_CONTEXT));
    }

    #[test]
    fn test_all_institutes_leaves_filter_untouched() {
        let filter = Filter::new().with_eq("title", "Geometry");
        assert_eq!(
            TenantScope::AllInstitutes.apply(filter.clone()).unwrap(),
            filter
        );
    }

    #[test]
    fn test_validate_ownership() {
        let mine = InstituteId::generate();
        let c = course(mine);

        assert!(validate_ownership(Some(&c), mine));
        assert!(!validate_ownership(Some(&c), InstituteId::generate()));
        assert!(!validate_ownership::<Course>(None, mine));
    }

    #[test]
    fn test_ensure_owned_hides_foreign_records() {
        let c = course(InstituteId::generate());
        let id = c.id;
        let scope = TenantScope::Institute(InstituteId::generate());

        let err = scope.ensure_owned(Some(c.clone()), id).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(TenantScope::AllInstitutes.ensure_owned(Some(c), id).is_ok());
    }
}
