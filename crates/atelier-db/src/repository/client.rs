//! # Client Repository
//!
//! Database operations for clients, including the combined
//! sale/repair history view.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::repair::RepairRepository;
use crate::repository::sale::SaleRepository;
use atelier_core::{Client, ClientHistory, NewClient};

const CLIENT_COLUMNS: &str = "id, name, phone, email, created_at";

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Lists all clients, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Gets a client by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Inserts a new client and returns the stored row.
    pub async fn insert(&self, client: &NewClient) -> DbResult<Client> {
        debug!(name = %client.name, "Inserting client");

        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO clients (name, phone, email, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&client.name)
        .bind(&client.phone)
        .bind(&client.email)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Client", id))
    }

    /// Updates an existing client and returns the stored row.
    ///
    /// ## Errors
    /// `DbError::NotFound` when the id doesn't exist.
    pub async fn update(&self, id: i64, client: &NewClient) -> DbResult<Client> {
        debug!(id = %id, "Updating client");

        let result =
            sqlx::query("UPDATE clients SET name = ?2, phone = ?3, email = ?4 WHERE id = ?1")
                .bind(id)
                .bind(&client.name)
                .bind(&client.phone)
                .bind(&client.email)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Client", id))
    }

    /// Returns a client's combined history: their repairs and sales,
    /// both newest-first.
    ///
    /// ## Errors
    /// `DbError::NotFound` when the client doesn't exist.
    pub async fn history(&self, id: i64) -> DbResult<ClientHistory> {
        let client = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Client", id))?;

        let repairs = RepairRepository::new(self.pool.clone())
            .list_for_client(id)
            .await?;
        let sales = SaleRepository::new(self.pool.clone())
            .list_for_client(id)
            .await?;

        Ok(ClientHistory {
            client,
            repairs,
            sales,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use atelier_core::{NewRepair, NewSale, NewSaleItem, PaymentMethod};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn jane() -> NewClient {
        NewClient {
            name: "Jane Tremblay".to_string(),
            phone: Some("514-555-0199".to_string()),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_insert_update_list() {
        let db = test_db().await;
        let repo = db.clients();

        let created = repo.insert(&jane()).await.unwrap();
        assert_eq!(created.name, "Jane Tremblay");

        let updated = repo
            .update(
                created.id,
                &NewClient {
                    name: "Jane T.".to_string(),
                    phone: None,
                    email: Some("jane@example.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Jane T.");
        assert_eq!(updated.email.as_deref(), Some("jane@example.com"));
        assert!(updated.phone.is_none());

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_client() {
        let db = test_db().await;
        let err = db.clients().update(42, &jane()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_history_combines_repairs_and_sales() {
        let db = test_db().await;
        let client = db.clients().insert(&jane()).await.unwrap();

        db.repairs()
            .insert(&NewRepair {
                client_id: Some(client.id),
                device_details: Some("iPhone 12, black".to_string()),
                issue_description: Some("Cracked screen".to_string()),
                status: "received".to_string(),
                cost_estimate: 120.0,
                parts_list: None,
                warranty: None,
                depot: 0.0,
                repair_type: None,
                notes: None,
            })
            .await
            .unwrap();

        db.sales()
            .create_sale(&NewSale {
                client_id: Some(client.id),
                total_amount: 25.0,
                tax_tps: 1.25,
                tax_tvq: 2.49,
                final_total: 28.74,
                payment_method: PaymentMethod::Cash,
                items: vec![NewSaleItem {
                    product_id: None,
                    quantity: 1,
                    unit_price: 25.0,
                    is_manual: true,
                    manual_name: Some("Tempered glass".to_string()),
                    repair_id: None,
                    phone_id: None,
                }],
            })
            .await
            .unwrap();

        let history = db.clients().history(client.id).await.unwrap();
        assert_eq!(history.client.id, client.id);
        assert_eq!(history.repairs.len(), 1);
        assert_eq!(history.sales.len(), 1);
        assert_eq!(history.sales[0].final_total, 28.74);
    }

    #[tokio::test]
    async fn test_history_missing_client() {
        let db = test_db().await;
        let err = db.clients().history(7).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
