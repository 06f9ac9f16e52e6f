use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::store::StoreError;

/// One stored admin credential: a username and the derived password hash.
/// At most one row per username (table constraint).
#[derive(Debug, Clone, FromRow)]
pub struct AdminCredential {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

pub struct AdminStore {
    pool: PgPool,
}

impl AdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, username: &str) -> Result<Option<AdminCredential>, StoreError> {
        Ok(
            sqlx::query_as::<_, AdminCredential>("SELECT * FROM admins WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    /// Exact-match credential check: the freshly derived hash must equal the
    /// stored one. An unknown username simply matches nothing.
    pub async fn credentials_match(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let row = sqlx::query_as::<_, AdminCredential>(
            "SELECT * FROM admins WHERE username = $1 AND password_hash = $2",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    pub async fn insert(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminCredential, StoreError> {
        Ok(sqlx::query_as::<_, AdminCredential>(
            "INSERT INTO admins (username, password_hash) VALUES ($1, $2) RETURNING *",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?)
    }
}
