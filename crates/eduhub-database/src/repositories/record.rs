//! Generic repository for institute-scoped tables.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use eduhub_core::error::{AppError, ErrorKind};
use eduhub_core::result::AppResult;
use eduhub_core::types::Filter;
use eduhub_entity::record::{Course, Student, Teacher};
use eduhub_entity::tenant::TenantRecord;

use crate::query::push_where;
use crate::store::RecordStore;

/// SQL specifics of a scoped row type.
pub trait PgRecord: TenantRecord + for<'r> FromRow<'r, PgRow> + Unpin {
    /// `ORDER BY` clause used for listings.
    const ORDER_BY: &'static str;

    /// Push `INSERT INTO <table> (...) VALUES (...)` for this row.
    fn push_insert(&self, qb: &mut QueryBuilder<'_, Postgres>);
}

impl PgRecord for Course {
    const ORDER_BY: &'static str = "created_at ASC";

    fn push_insert(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push("INSERT INTO courses (id, institute_id, title, description, created_at) VALUES (");
        let mut values = qb.separated(", ");
        values.push_bind(self.id);
        values.push_bind(self.institute_id);
        values.push_bind(self.title.clone());
        values.push_bind(self.description.clone());
        values.push_bind(self.created_at);
        qb.push(")");
    }
}

impl PgRecord for Student {
    const ORDER_BY: &'static str = "enrolled_at ASC";

    fn push_insert(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push("INSERT INTO students (id, institute_id, name, email, enrolled_at) VALUES (");
        let mut values = qb.separated(", ");
        values.push_bind(self.id);
        values.push_bind(self.institute_id);
        values.push_bind(self.name.clone());
        values.push_bind(self.email.clone());
        values.push_bind(self.enrolled_at);
        qb.push(")");
    }
}

impl PgRecord for Teacher {
    const ORDER_BY: &'static str = "joined_at ASC";

    fn push_insert(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(
            "INSERT INTO teachers (id, institute_id, name, email, subject, joined_at) VALUES (",
        );
        let mut values = qb.separated(", ");
        values.push_bind(self.id);
        values.push_bind(self.institute_id);
        values.push_bind(self.name.clone());
        values.push_bind(self.email.clone());
        values.push_bind(self.subject.clone());
        values.push_bind(self.joined_at);
        qb.push(")");
    }
}

/// PostgreSQL-backed store for any [`PgRecord`].
#[derive(Debug)]
pub struct PgRecordRepository<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PgRecordRepository<T> {
    /// Create a repository over the pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for PgRecordRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T: PgRecord> PgRecordRepository<T> {
    fn select<'a>(filter: &Filter) -> AppResult<QueryBuilder<'a, Postgres>> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", T::TABLE));
        push_where(&mut qb, filter, T::COLUMNS)?;
        qb.push(" ORDER BY ");
        qb.push(T::ORDER_BY);
        Ok(qb)
    }

    fn db_error(action: &str, e: sqlx::Error) -> AppError {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to {action} {}", T::TABLE),
            e,
        )
    }
}

#[async_trait]
impl<T: PgRecord> RecordStore<T> for PgRecordRepository<T> {
    async fn find(&self, filter: &Filter) -> AppResult<Vec<T>> {
        let mut qb = Self::select(filter)?;
        qb.build_query_as::<T>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::db_error("list", e))
    }

    async fn find_one(&self, filter: &Filter) -> AppResult<Option<T>> {
        let mut qb = Self::select(filter)?;
        qb.push(" LIMIT 1");
        qb.build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_error("find", e))
    }

    async fn insert(&self, record: &T) -> AppResult<T> {
        let mut qb = QueryBuilder::new("");
        record.push_insert(&mut qb);
        qb.push(" RETURNING *");
        qb.build_query_as::<T>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::validation("Institute does not exist")
                }
                _ => Self::db_error("insert into", e),
            })
    }

    async fn delete(&self, filter: &Filter) -> AppResult<u64> {
        if filter.is_empty() {
            return Err(AppError::internal(format!(
                "Refusing unfiltered delete on {}",
                T::TABLE
            )));
        }
        let mut qb = QueryBuilder::new(format!("DELETE FROM {}", T::TABLE));
        push_where(&mut qb, filter, T::COLUMNS)?;
        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_error("delete from", e))?;
        Ok(result.rows_affected())
    }
}
