use std::marker::PhantomData;

use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the document collections, classified from the driver's
/// own signals so handlers can map them onto the response taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

// SQLSTATE 23505 = unique_violation
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::Duplicate(db_err.message().to_string());
            }
        }
        StoreError::Sqlx(err)
    }
}

/// A typed document kind stored in its own table.
///
/// Declares the table, the listing order and the fixed seed set; the generic
/// [`Collection`] supplies the CRUD behavior once for all kinds.
pub trait Document: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin {
    const TABLE: &'static str;
    /// Natural listing order for the kind.
    const ORDER_BY: &'static str;

    /// Sample documents inserted when a list finds the table empty.
    fn seed() -> Vec<Patch>;
}

/// A value bound into a runtime-built statement.
#[derive(Debug, Clone)]
pub enum SqlValue {
    Text(String),
    NullableText(Option<String>),
    TextArray(Vec<String>),
    Bytes(Vec<u8>),
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::NullableText(value)
    }
}

impl From<Vec<String>> for SqlValue {
    fn from(value: Vec<String>) -> Self {
        SqlValue::TextArray(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Bytes(value)
    }
}

/// An ordered set of column assignments: the insert row on create, the
/// partial-update set on update. Columns never named here are never touched.
#[derive(Debug, Clone, Default)]
pub struct Patch {
    fields: Vec<(&'static str, SqlValue)>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.fields.push((column, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(column, _)| *column).collect()
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.fields.iter().map(|(_, value)| value)
    }
}

fn insert_sql(table: &str, columns: &[&'static str]) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}

fn update_sql(table: &str, columns: &[&'static str]) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING *",
        table,
        assignments.join(", "),
        columns.len() + 1
    )
}

fn bind_value<'q, T>(
    query: QueryAs<'q, Postgres, T, PgArguments>,
    value: &SqlValue,
) -> QueryAs<'q, Postgres, T, PgArguments> {
    match value {
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::NullableText(v) => query.bind(v.clone()),
        SqlValue::TextArray(v) => query.bind(v.clone()),
        SqlValue::Bytes(v) => query.bind(v.clone()),
    }
}

/// Generic CRUD over one document kind, parameterized by [`Document`].
pub struct Collection<T> {
    pool: PgPool,
    _marker: PhantomData<T>,
}

impl<T: Document> Collection<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        let sql = format!("SELECT * FROM {} ORDER BY {}", T::TABLE, T::ORDER_BY);
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn insert(&self, patch: &Patch) -> Result<T, StoreError> {
        let sql = insert_sql(T::TABLE, &patch.columns());
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in patch.values() {
            query = bind_value(query, value);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    /// Apply a partial update; `None` means no document matched the id.
    /// An empty patch reads back the current document instead of erroring.
    pub async fn update(&self, id: Uuid, patch: &Patch) -> Result<Option<T>, StoreError> {
        if patch.is_empty() {
            return self.find(id).await;
        }

        let sql = update_sql(T::TABLE, &patch.columns());
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in patch.values() {
            query = bind_value(query, value);
        }
        Ok(query.bind(id).fetch_optional(&self.pool).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn clear(&self) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {}", T::TABLE);
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// List all documents, seeding the fixed sample set first when the table
    /// turns out to be empty. Concurrent first-lists may race here; a
    /// uniqueness constraint on the table is the only duplicate guard.
    pub async fn list_seeding_on_empty(&self) -> Result<Vec<T>, StoreError> {
        let documents = self.list().await?;
        if !documents.is_empty() {
            return Ok(documents);
        }

        tracing::info!("{} is empty, inserting seed data", T::TABLE);
        self.clear().await?;
        for patch in T::seed() {
            match self.insert(&patch).await {
                Ok(_) => {}
                // another first-list beat us to this row
                Err(StoreError::Duplicate(msg)) => {
                    tracing::warn!("duplicate ignored while seeding {}: {}", T::TABLE, msg);
                }
                Err(err) => return Err(err),
            }
        }

        self.list().await
    }
}
