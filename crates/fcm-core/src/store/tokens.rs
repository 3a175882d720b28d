//! Token read/write operations and the `Store` implementation for `TokenDb`.

use async_trait::async_trait;
use sqlx::Row;
use tokio_util::sync::CancellationToken;

use super::db::{unix_timestamp, TokenDb};
use super::{Store, StoreError};

impl TokenDb {
    /// Register a token. Returns false if it was already registered.
    pub async fn add_token(&self, token: &str) -> Result<bool, StoreError> {
        let now = unix_timestamp();
        let inserted = sqlx::query(
            r#"
            INSERT INTO tokens (token, created_at, updated_at)
            VALUES (?1, ?2, ?2)
            ON CONFLICT(token) DO NOTHING
            "#,
        )
        .bind(token)
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    /// All registered tokens, sorted.
    pub async fn list_tokens(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT token
            FROM tokens
            ORDER BY token ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get::<String, _>("token")).collect())
    }

    pub async fn contains(&self, token: &str) -> Result<bool, StoreError> {
        let row = sqlx::query(r#"SELECT 1 FROM tokens WHERE token = ?1"#)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Replace `old` with `new` in one transaction. If `new` is already registered
    /// the two entries merge.
    pub async fn rename_token(&self, old: &str, new: &str) -> Result<(), StoreError> {
        let now = unix_timestamp();
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(r#"DELETE FROM tokens WHERE token = ?1"#)
            .bind(old)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if removed == 0 {
            tx.rollback().await?;
            return Err(StoreError::NotFound(old.to_string()));
        }

        sqlx::query(
            r#"
            INSERT INTO tokens (token, created_at, updated_at)
            VALUES (?1, ?2, ?2)
            ON CONFLICT(token) DO UPDATE SET updated_at = excluded.updated_at
            "#,
        )
        .bind(new)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Remove a token. Removing an unknown token is not an error.
    /// Returns whether a row was deleted.
    pub async fn remove_token(&self, token: &str) -> Result<bool, StoreError> {
        let removed = sqlx::query(r#"DELETE FROM tokens WHERE token = ?1"#)
            .bind(token)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(removed > 0)
    }
}

#[async_trait]
impl Store for TokenDb {
    async fn rename(
        &self,
        cancel: &CancellationToken,
        old: &str,
        new: &str,
    ) -> Result<(), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        self.rename_token(old, new).await
    }

    async fn delete(&self, cancel: &CancellationToken, token: &str) -> Result<(), StoreError> {
        if cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        self.remove_token(token).await?;
        Ok(())
    }
}
