//! # Inventory Taxonomy Repository
//!
//! The category → brand → model tree that classifies devices. Each
//! level cascades on delete, so removing a category takes its brands
//! and their models with it.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use atelier_core::{Brand, BrandNode, CategoryNode, DeviceCategory, DeviceModel, ModelNode};

/// Repository for the device taxonomy tables.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Returns the whole taxonomy as a nested tree, ordered by name at
    /// every level.
    ///
    /// Three flat queries, assembled in memory. The tables stay small
    /// (tens of categories, hundreds of models), so no pagination.
    pub async fn hierarchy(&self) -> DbResult<Vec<CategoryNode>> {
        let categories = sqlx::query_as::<_, DeviceCategory>(
            "SELECT id, name FROM device_categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let brands = sqlx::query_as::<_, Brand>(
            "SELECT id, category_id, name FROM brands ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let models = sqlx::query_as::<_, DeviceModel>(
            "SELECT id, brand_id, name FROM models ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let tree = categories
            .into_iter()
            .map(|category| CategoryNode {
                brands: brands
                    .iter()
                    .filter(|b| b.category_id == category.id)
                    .map(|brand| BrandNode {
                        id: brand.id,
                        name: brand.name.clone(),
                        models: models
                            .iter()
                            .filter(|m| m.brand_id == brand.id)
                            .map(|model| ModelNode {
                                id: model.id,
                                name: model.name.clone(),
                            })
                            .collect(),
                    })
                    .collect(),
                id: category.id,
                name: category.name,
            })
            .collect();

        Ok(tree)
    }

    // ===== Categories =====

    /// Creates a device category. Names are unique.
    pub async fn create_category(&self, name: &str) -> DbResult<DeviceCategory> {
        let result = sqlx::query("INSERT INTO device_categories (name) VALUES (?1)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        debug!(name, "Category created");

        Ok(DeviceCategory {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Deletes a category and, by cascade, its brands and models.
    pub async fn delete_category(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM device_categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }
        Ok(())
    }

    // ===== Brands =====

    /// Creates a brand under an existing category.
    pub async fn create_brand(&self, category_id: i64, name: &str) -> DbResult<Brand> {
        let result = sqlx::query("INSERT INTO brands (category_id, name) VALUES (?1, ?2)")
            .bind(category_id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(Brand {
            id: result.last_insert_rowid(),
            category_id,
            name: name.to_string(),
        })
    }

    /// Deletes a brand and, by cascade, its models.
    pub async fn delete_brand(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM brands WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Brand", id));
        }
        Ok(())
    }

    // ===== Models =====

    /// Creates a model under an existing brand.
    pub async fn create_model(&self, brand_id: i64, name: &str) -> DbResult<DeviceModel> {
        let result = sqlx::query("INSERT INTO models (brand_id, name) VALUES (?1, ?2)")
            .bind(brand_id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(DeviceModel {
            id: result.last_insert_rowid(),
            brand_id,
            name: name.to_string(),
        })
    }

    /// Deletes a model.
    pub async fn delete_model(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM models WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Model", id));
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::DbError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_hierarchy_is_nested_and_name_ordered() {
        let db = test_db().await;
        let inv = db.inventory();

        let phones = inv.create_category("Phones").await.unwrap();
        let laptops = inv.create_category("Laptops").await.unwrap();

        let samsung = inv.create_brand(phones.id, "Samsung").await.unwrap();
        let apple = inv.create_brand(phones.id, "Apple").await.unwrap();
        inv.create_model(apple.id, "iPhone 15").await.unwrap();
        inv.create_model(apple.id, "iPhone 13").await.unwrap();
        inv.create_model(samsung.id, "Galaxy S24").await.unwrap();

        let tree = inv.hierarchy().await.unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "Laptops");
        assert_eq!(tree[1].name, "Phones");
        assert!(tree[0].brands.is_empty());

        let brands = &tree[1].brands;
        assert_eq!(brands[0].name, "Apple");
        assert_eq!(brands[1].name, "Samsung");
        assert_eq!(brands[0].models[0].name, "iPhone 13");
        assert_eq!(brands[0].models[1].name, "iPhone 15");
        assert_eq!(brands[1].models[0].name, "Galaxy S24");
    }

    #[tokio::test]
    async fn test_duplicate_category_name_rejected() {
        let db = test_db().await;
        let inv = db.inventory();

        inv.create_category("Phones").await.unwrap();
        let err = inv.create_category("Phones").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_brand_requires_existing_category() {
        let db = test_db().await;
        let err = db.inventory().create_brand(999, "Apple").await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_category_delete_cascades() {
        let db = test_db().await;
        let inv = db.inventory();

        let phones = inv.create_category("Phones").await.unwrap();
        let apple = inv.create_brand(phones.id, "Apple").await.unwrap();
        inv.create_model(apple.id, "iPhone 15").await.unwrap();

        inv.delete_category(phones.id).await.unwrap();

        assert!(inv.hierarchy().await.unwrap().is_empty());
        // The cascaded brand is gone too.
        let err = inv.delete_brand(apple.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_model_is_not_found() {
        let db = test_db().await;
        let err = db.inventory().delete_model(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
