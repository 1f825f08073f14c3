//! # Repair Repository
//!
//! Database operations for repair jobs.
//!
//! Status is a free-text label mutated independently of sales and
//! payments; `update_status` exists as a dedicated lightweight call
//! because the front desk flips it constantly while a device moves
//! through the shop.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use atelier_core::{NewRepair, Repair};

const REPAIR_COLUMNS: &str = "id, client_id, device_details, issue_description, status, \
     cost_estimate, created_at, updated_at, parts_list, warranty, depot, repair_type, notes";

/// Repository for repair database operations.
#[derive(Debug, Clone)]
pub struct RepairRepository {
    pool: SqlitePool,
}

impl RepairRepository {
    /// Creates a new RepairRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RepairRepository { pool }
    }

    /// Lists all repairs, most recently updated first.
    pub async fn list(&self) -> DbResult<Vec<Repair>> {
        let repairs = sqlx::query_as::<_, Repair>(&format!(
            "SELECT {REPAIR_COLUMNS} FROM repairs ORDER BY updated_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(repairs)
    }

    /// Lists repairs for one client, newest first.
    pub async fn list_for_client(&self, client_id: i64) -> DbResult<Vec<Repair>> {
        let repairs = sqlx::query_as::<_, Repair>(&format!(
            "SELECT {REPAIR_COLUMNS} FROM repairs WHERE client_id = ?1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(repairs)
    }

    /// Gets a repair by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Repair>> {
        let repair = sqlx::query_as::<_, Repair>(&format!(
            "SELECT {REPAIR_COLUMNS} FROM repairs WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(repair)
    }

    /// Inserts a new repair and returns the stored row.
    pub async fn insert(&self, repair: &NewRepair) -> DbResult<Repair> {
        debug!(status = %repair.status, "Inserting repair");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO repairs (
                client_id, device_details, issue_description, status, cost_estimate,
                created_at, updated_at, parts_list, warranty, depot, repair_type, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(repair.client_id)
        .bind(&repair.device_details)
        .bind(&repair.issue_description)
        .bind(&repair.status)
        .bind(repair.cost_estimate)
        .bind(now)
        .bind(&repair.parts_list)
        .bind(&repair.warranty)
        .bind(repair.depot)
        .bind(&repair.repair_type)
        .bind(&repair.notes)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Repair", id))
    }

    /// Updates only a repair's status label, touching updated_at.
    ///
    /// ## Errors
    /// `DbError::NotFound` when the id doesn't exist.
    pub async fn update_status(&self, id: i64, status: &str) -> DbResult<Repair> {
        debug!(id = %id, status = %status, "Updating repair status");

        let now = Utc::now();

        let result =
            sqlx::query("UPDATE repairs SET status = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(id)
                .bind(status)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Repair", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Repair", id))
    }

    /// Fully updates a repair and returns the stored row.
    ///
    /// ## Errors
    /// `DbError::NotFound` when the id doesn't exist.
    pub async fn update(&self, id: i64, repair: &NewRepair) -> DbResult<Repair> {
        debug!(id = %id, "Updating repair");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE repairs SET
                client_id = ?2,
                device_details = ?3,
                issue_description = ?4,
                status = ?5,
                cost_estimate = ?6,
                parts_list = ?7,
                warranty = ?8,
                depot = ?9,
                repair_type = ?10,
                notes = ?11,
                updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(repair.client_id)
        .bind(&repair.device_details)
        .bind(&repair.issue_description)
        .bind(&repair.status)
        .bind(repair.cost_estimate)
        .bind(&repair.parts_list)
        .bind(&repair.warranty)
        .bind(repair.depot)
        .bind(&repair.repair_type)
        .bind(&repair.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Repair", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Repair", id))
    }

    /// Deletes a repair.
    ///
    /// ## Errors
    /// `DbError::NotFound` when the id doesn't exist.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting repair");

        let result = sqlx::query("DELETE FROM repairs WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Repair", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn cracked_screen() -> NewRepair {
        NewRepair {
            client_id: None,
            device_details: Some("Pixel 7".to_string()),
            issue_description: Some("Cracked screen".to_string()),
            status: "received".to_string(),
            cost_estimate: 150.0,
            parts_list: None,
            warranty: Some("90 days".to_string()),
            depot: 50.0,
            repair_type: Some("screen".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_insert_sets_timestamps() {
        let db = test_db().await;
        let repair = db.repairs().insert(&cracked_screen()).await.unwrap();

        assert_eq!(repair.status, "received");
        assert_eq!(repair.depot, 50.0);
        assert_eq!(repair.created_at, repair.updated_at);
    }

    #[tokio::test]
    async fn test_status_update_touches_updated_at() {
        let db = test_db().await;
        let repair = db.repairs().insert(&cracked_screen()).await.unwrap();

        let updated = db
            .repairs()
            .update_status(repair.id, "in_progress")
            .await
            .unwrap();
        assert_eq!(updated.status, "in_progress");
        assert!(updated.updated_at >= repair.updated_at);
        // Other fields survive a status-only update.
        assert_eq!(updated.cost_estimate, 150.0);
    }

    #[tokio::test]
    async fn test_full_update_and_delete() {
        let db = test_db().await;
        let repair = db.repairs().insert(&cracked_screen()).await.unwrap();

        let mut changed = cracked_screen();
        changed.status = "completed".to_string();
        changed.notes = Some("Replaced OEM panel".to_string());
        let updated = db.repairs().update(repair.id, &changed).await.unwrap();
        assert_eq!(updated.status, "completed");
        assert_eq!(updated.notes.as_deref(), Some("Replaced OEM panel"));

        db.repairs().delete(repair.id).await.unwrap();
        assert!(db.repairs().get_by_id(repair.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_repair_errors() {
        let db = test_db().await;
        assert!(matches!(
            db.repairs().update_status(99, "done").await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            db.repairs().delete(99).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
