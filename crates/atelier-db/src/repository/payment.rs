//! # Payment Repository
//!
//! Read side of the payments ledger. Rows are written by sale creation
//! (see [`crate::repository::sale::SaleRepository::create_sale`]) inside
//! the sale's transaction.

use sqlx::SqlitePool;

use crate::error::DbResult;
use atelier_core::Payment;

const PAYMENT_COLUMNS: &str = "id, sale_id, repair_id, amount, method, created_at";

/// Repository for payment database operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PaymentRepository { pool }
    }

    /// Lists all payments, newest first.
    pub async fn list(&self) -> DbResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_list_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.payments().list().await.unwrap().is_empty());
    }
}
