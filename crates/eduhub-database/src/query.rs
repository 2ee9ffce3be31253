//! Translation of [`Filter`] into parameterized SQL.

use sqlx::{Postgres, QueryBuilder};

use eduhub_core::error::AppError;
use eduhub_core::types::{Filter, FilterOp, FilterValue};

/// Appends ` WHERE ...` for the filter. Column names must appear in
/// `allowed`; values are always bound, never interpolated.
pub fn push_where(
    qb: &mut QueryBuilder<'_, Postgres>,
    filter: &Filter,
    allowed: &[&str],
) -> Result<(), AppError> {
    for (i, condition) in filter.fields().iter().enumerate() {
        let column = allowed
            .iter()
            .find(|c| **c == condition.field)
            .ok_or_else(|| {
                AppError::validation(format!("Unknown filter field '{}'", condition.field))
            })?;

        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(*column);

        match (condition.op, &condition.value) {
            (FilterOp::IsNull, _) | (FilterOp::Eq, FilterValue::Null) => {
                qb.push(" IS NULL");
            }
            (FilterOp::IsNotNull, _) | (FilterOp::Ne, FilterValue::Null) => {
                qb.push(" IS NOT NULL");
            }
            (FilterOp::Eq, value) => {
                qb.push(" = ");
                push_value(qb, value);
            }
            (FilterOp::Ne, value) => {
                qb.push(" <> ");
                push_value(qb, value);
            }
            (FilterOp::ILike, value) => {
                qb.push(" ILIKE ");
                push_value(qb, value);
            }
        }
    }
    Ok(())
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Uuid(id) => {
            qb.push_bind(*id);
        }
        FilterValue::String(s) => {
            qb.push_bind(s.clone());
        }
        FilterValue::Integer(i) => {
            qb.push_bind(*i);
        }
        FilterValue::Boolean(b) => {
            qb.push_bind(*b);
        }
        FilterValue::Null => {
            qb.push("NULL");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduhub_core::types::FilterField;
    use uuid::Uuid;

    const COLUMNS: &[&str] = &["id", "institute_id", "title"];

    fn render(filter: &Filter) -> Result<String, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM courses");
        push_where(&mut qb, filter, COLUMNS)?;
        Ok(qb.sql().to_string())
    }

    #[test]
    fn test_binds_values() {
        let filter = Filter::new()
            .with_eq("institute_id", Uuid::new_v4())
            .and(FilterField::ilike("title", "%math%"));
        assert_eq!(
            render(&filter).unwrap(),
            "SELECT * FROM courses WHERE institute_id = $1 AND title ILIKE $2"
        );
    }

    #[test]
    fn test_rejects_unknown_columns() {
        let filter = Filter::new().with_eq("1=1; DROP TABLE courses; --", "x");
        assert!(render(&filter).is_err());
    }

    #[test]
    fn test_null_equality_becomes_is_null() {
        let filter = Filter::new().with_eq("title", FilterValue::Null);
        assert_eq!(
            render(&filter).unwrap(),
            "SELECT * FROM courses WHERE title IS NULL"
        );
    }

    #[test]
    fn test_empty_filter_adds_nothing() {
        assert_eq!(render(&Filter::new()).unwrap(), "SELECT * FROM courses");
    }
}
