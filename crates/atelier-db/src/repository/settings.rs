//! # Settings Repository
//!
//! Key-value settings with upsert semantics: insert if the key is
//! absent, otherwise overwrite. Last writer wins, no versioning.

use std::collections::BTreeMap;

use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Repository for the settings key-value store.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Returns the full settings map.
    pub async fn get_all(&self) -> DbResult<BTreeMap<String, String>> {
        let rows = sqlx::query("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await?;

        let mut map = BTreeMap::new();
        for row in rows {
            map.insert(row.get::<String, _>("key"), row.get::<String, _>("value"));
        }

        Ok(map)
    }

    /// Returns a single value, or None when the key is absent.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    /// Upserts every key in the input map in one transaction and
    /// returns the resulting full map. Keys absent from the input keep
    /// their prior value.
    pub async fn upsert_many(
        &self,
        values: &BTreeMap<String, String>,
    ) -> DbResult<BTreeMap<String, String>> {
        debug!(keys = values.len(), "Upserting settings");

        let mut tx = self.pool.begin().await?;

        for (key, value) in values {
            sqlx::query(
                r#"
                INSERT INTO settings (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_all().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
