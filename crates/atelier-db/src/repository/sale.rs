//! # Sale Repository
//!
//! Database operations for sales and sale items.
//!
//! ## Sale Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_sale (one transaction)                        │
//! │                                                                         │
//! │  validate payload (atelier-core, before any write)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │   ├── INSERT sale header            → last_insert_rowid = sale id      │
//! │   ├── for each item, in input order:                                   │
//! │   │     ├── non-manual? UPDATE products                                │
//! │   │     │     SET stock_quantity = stock_quantity - qty                │
//! │   │     │     (0 rows affected → NotFound → ROLLBACK)                  │
//! │   │     └── INSERT sale_items row                                      │
//! │   └── INSERT payment row (amount = final_total)                        │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Any failure before COMMIT rolls back every write: no partial sale,    │
//! │  no partial items, no partial stock adjustment.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales are an append-only ledger: there is no update or delete here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use atelier_core::{NewSale, Sale, SaleItem, SaleWithItems};

const SALE_COLUMNS: &str =
    "id, client_id, total_amount, tax_tps, tax_tvq, final_total, payment_method, created_at";

const ITEM_COLUMNS: &str =
    "id, sale_id, product_id, quantity, unit_price, is_manual, manual_name, repair_id, phone_id";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Creates a sale: header, ordered line items, stock decrements, and
    /// the payment record, all in one transaction.
    ///
    /// Assumes a payload already checked by
    /// `atelier_core::validation::validate_new_sale`; the HTTP layer runs
    /// that first so it can map validation failures to 400.
    ///
    /// ## Errors
    /// * `DbError::NotFound` when a non-manual item references a product
    ///   id that doesn't exist; nothing is persisted.
    /// * Any constraint or write failure rolls the transaction back.
    pub async fn create_sale(&self, sale: &NewSale) -> DbResult<SaleWithItems> {
        debug!(
            items = sale.items.len(),
            final_total = sale.final_total,
            "Creating sale"
        );

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let header = sqlx::query(
            r#"
            INSERT INTO sales (client_id, total_amount, tax_tps, tax_tvq, final_total, payment_method, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(sale.client_id)
        .bind(sale.total_amount)
        .bind(sale.tax_tps)
        .bind(sale.tax_tvq)
        .bind(sale.final_total)
        .bind(sale.payment_method)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let sale_id = header.last_insert_rowid();

        // Items are inserted in input order; ascending row ids preserve
        // line order for readers.
        for item in &sale.items {
            // Catalog lines decrement stock first, with a single-statement
            // delta. A zero-row UPDATE means the product doesn't exist;
            // bailing out here, before the item row insert, keeps the
            // error a NotFound instead of the row's foreign key firing.
            if !item.is_manual {
                let product_id = item
                    .product_id
                    .ok_or_else(|| DbError::not_found("Product", "missing product_id"))?;

                let result = sqlx::query(
                    r#"
                    UPDATE products
                    SET stock_quantity = stock_quantity - ?2
                    WHERE id = ?1
                    "#,
                )
                .bind(product_id)
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    // Dropping the transaction rolls everything back.
                    return Err(DbError::not_found("Product", product_id));
                }
            }

            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, unit_price, is_manual, manual_name, repair_id, phone_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(sale_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.is_manual)
            .bind(&item.manual_name)
            .bind(item.repair_id)
            .bind(item.phone_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO payments (sale_id, repair_id, amount, method, created_at)
            VALUES (?1, NULL, ?2, ?3, ?4)
            "#,
        )
        .bind(sale_id)
        .bind(sale.final_total)
        .bind(sale.payment_method)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(id = %sale_id, "Sale committed");

        let stored = self
            .get_by_id(sale_id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", sale_id))?;
        let items = self.get_items(sale_id).await?;

        Ok(SaleWithItems {
            sale: stored,
            items,
        })
    }

    /// Gets a sale header by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale, in line order.
    pub async fn get_items(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM sale_items WHERE sale_id = ?1 ORDER BY id"
        ))
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists all sales with their items, newest first.
    pub async fn list_with_items(&self) -> DbResult<Vec<SaleWithItems>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        // One items query per sale; sale volume at a single shop makes
        // this fine, and it keeps the mapping obvious.
        let mut out = Vec::with_capacity(sales.len());
        for sale in sales {
            let items = self.get_items(sale.id).await?;
            out.push(SaleWithItems { sale, items });
        }

        Ok(out)
    }

    /// Lists sale headers for one client, newest first.
    pub async fn list_for_client(&self, client_id: i64) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE client_id = ?1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use atelier_core::{NewProduct, NewSaleItem, PaymentMethod};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, sku: &str, stock: i64) -> i64 {
        db.products()
            .insert(&NewProduct {
                name: format!("Part {sku}"),
                sku: sku.to_string(),
                price: 50.0,
                cost: 20.0,
                stock_quantity: stock,
                category: Some("parts".to_string()),
            })
            .await
            .unwrap()
            .id
    }

    fn catalog_item(product_id: i64, quantity: i64, unit_price: f64) -> NewSaleItem {
        NewSaleItem {
            product_id: Some(product_id),
            quantity,
            unit_price,
            is_manual: false,
            manual_name: None,
            repair_id: None,
            phone_id: None,
        }
    }

    fn manual_item(name: &str, unit_price: f64) -> NewSaleItem {
        NewSaleItem {
            product_id: None,
            quantity: 1,
            unit_price,
            is_manual: true,
            manual_name: Some(name.to_string()),
            repair_id: None,
            phone_id: None,
        }
    }

    fn sale_of(items: Vec<NewSaleItem>, total: f64) -> NewSale {
        NewSale {
            client_id: None,
            total_amount: total,
            tax_tps: 0.0,
            tax_tvq: 0.0,
            final_total: total,
            payment_method: PaymentMethod::Cash,
            items,
        }
    }

    #[tokio::test]
    async fn test_create_sale_decrements_stock() {
        // Screen X, qty 3 of 10: stock lands on 7, total on 150.
        let db = test_db().await;
        let product_id = seed_product(&db, "SCR-1", 10).await;

        let created = db
            .sales()
            .create_sale(&sale_of(vec![catalog_item(product_id, 3, 50.0)], 150.0))
            .await
            .unwrap();

        assert_eq!(created.sale.total_amount, 150.0);
        assert_eq!(created.items.len(), 1);
        assert_eq!(created.items[0].product_id, Some(product_id));

        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, 7);
    }

    #[tokio::test]
    async fn test_manual_items_skip_stock() {
        let db = test_db().await;
        let product_id = seed_product(&db, "SCR-1", 10).await;

        let created = db
            .sales()
            .create_sale(&sale_of(
                vec![
                    catalog_item(product_id, 2, 50.0),
                    manual_item("Unlock service", 40.0),
                ],
                140.0,
            ))
            .await
            .unwrap();

        assert_eq!(created.items.len(), 2);
        assert!(created.items[1].is_manual);
        assert!(created.items[1].product_id.is_none());
        assert_eq!(
            created.items[1].manual_name.as_deref(),
            Some("Unlock service")
        );

        // Only the catalog line touched stock.
        let product = db.products().get_by_id(product_id).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, 8);
    }

    #[tokio::test]
    async fn test_items_keep_input_order() {
        let db = test_db().await;
        let a = seed_product(&db, "AAA-1", 5).await;
        let b = seed_product(&db, "BBB-1", 5).await;

        let created = db
            .sales()
            .create_sale(&sale_of(
                vec![
                    catalog_item(b, 1, 10.0),
                    manual_item("Cleaning", 15.0),
                    catalog_item(a, 1, 10.0),
                ],
                35.0,
            ))
            .await
            .unwrap();

        let products: Vec<Option<i64>> =
            created.items.iter().map(|i| i.product_id).collect();
        assert_eq!(products, vec![Some(b), None, Some(a)]);
    }

    #[tokio::test]
    async fn test_unknown_product_rolls_back_everything() {
        let db = test_db().await;
        let good = seed_product(&db, "SCR-1", 10).await;

        let err = db
            .sales()
            .create_sale(&sale_of(
                vec![catalog_item(good, 2, 50.0), catalog_item(9999, 1, 5.0)],
                105.0,
            ))
            .await
            .unwrap_err();
        // A missing product is a lookup failure, not a constraint error:
        // callers map NotFound to 404.
        assert!(
            matches!(err, DbError::NotFound { .. }),
            "expected NotFound, got {err:?}"
        );

        // No sale, no items, no payment, and the first item's stock
        // decrement was rolled back too.
        let sales = db.sales().list_with_items().await.unwrap();
        assert!(sales.is_empty());

        let orphan_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphan_items, 0);

        let payments = db.payments().list().await.unwrap();
        assert!(payments.is_empty());

        let product = db.products().get_by_id(good).await.unwrap().unwrap();
        assert_eq!(product.stock_quantity, 10);
    }

    #[tokio::test]
    async fn test_sale_records_payment() {
        let db = test_db().await;
        let product_id = seed_product(&db, "SCR-1", 10).await;

        let created = db
            .sales()
            .create_sale(&NewSale {
                client_id: None,
                total_amount: 100.0,
                tax_tps: 5.0,
                tax_tvq: 9.98,
                final_total: 114.98,
                payment_method: PaymentMethod::Debit,
                items: vec![catalog_item(product_id, 2, 50.0)],
            })
            .await
            .unwrap();

        let payments = db.payments().list().await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].sale_id, Some(created.sale.id));
        assert_eq!(payments[0].amount, 114.98);
        assert_eq!(payments[0].method, PaymentMethod::Debit);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = test_db().await;
        let product_id = seed_product(&db, "SCR-1", 10).await;

        for qty in 1..=3 {
            db.sales()
                .create_sale(&sale_of(
                    vec![catalog_item(product_id, qty, 50.0)],
                    50.0 * qty as f64,
                ))
                .await
                .unwrap();
        }

        let sales = db.sales().list_with_items().await.unwrap();
        assert_eq!(sales.len(), 3);
        assert!(sales[0].sale.id > sales[2].sale.id);
    }
}
