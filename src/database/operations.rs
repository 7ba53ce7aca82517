//! Key-value persistence on top of the settings table

use crate::host::traits::KeyValueStore;
use crate::utils::error::VidboxError;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};
use tracing::debug;

/// SQLite-backed key-value store
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

/// Settings record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRecord {
    pub key: String,
    pub value: String,
}

impl SqliteStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get all settings, ordered by key
    pub async fn get_all(&self) -> Result<Vec<SettingsRecord>> {
        let rows = sqlx::query("SELECT key, value FROM settings ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(VidboxError::DatabaseError)?;

        let mut settings = Vec::with_capacity(rows.len());
        for row in rows {
            settings.push(SettingsRecord {
                key: row.get("key"),
                value: row.get("value"),
            });
        }

        Ok(settings)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(VidboxError::DatabaseError)?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(VidboxError::DatabaseError)?;

        debug!("Saved setting: {} = {}", key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(VidboxError::DatabaseError)?;

        debug!("Removed setting: {}", key);
        Ok(())
    }
}
