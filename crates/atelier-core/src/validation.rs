//! # Validation Module
//!
//! Input validation rules for Atelier.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Axum extractors (Rust)                                       │
//! │  └── Type validation (JSON deserialization into typed payloads)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (runs before any write)                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (sku, settings key)                            │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: each layer catches different errors                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{NewProduct, NewSale};
use crate::{MAX_ITEM_QUANTITY, MAX_SALE_ITEMS};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use atelier_core::validation::validate_sku;
///
/// assert!(validate_sku("SCR-1").is_ok());
/// assert!(validate_sku("").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::Required {
            field: "sku (letters, numbers, hyphens, underscores)".to_string(),
        });
    }

    Ok(())
}

/// Validates a required display name (client, product, taxonomy entry).
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a repair status label. Free text, but never empty.
pub fn validate_status(status: &str) -> ValidationResult<()> {
    if status.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "status".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a monetary amount. Zero is allowed (free items).
pub fn validate_amount(field: &str, amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a product payload before insert or update.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_name("name", &product.name)?;
    validate_sku(&product.sku)?;
    validate_amount("price", product.price)?;
    validate_amount("cost", product.cost)?;
    Ok(())
}

/// Validates a sale payload before the transactional write.
///
/// ## Rules
/// - At least one item, at most [`MAX_SALE_ITEMS`]
/// - Every quantity positive
/// - A non-manual item must reference a product
/// - A manual item must carry a non-empty manual_name
///
/// ## Example
/// ```text
/// items: [{product_id: 7, quantity: 3}]            → Ok
/// items: []                                        → Empty
/// items: [{quantity: 1}]                           → MissingProductReference
/// items: [{is_manual: true, quantity: 1}]          → MissingManualName
/// ```
pub fn validate_new_sale(sale: &NewSale) -> ValidationResult<()> {
    if sale.items.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    if sale.items.len() > MAX_SALE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_SALE_ITEMS as i64,
        });
    }

    validate_amount("total_amount", sale.total_amount)?;
    validate_amount("final_total", sale.final_total)?;

    for (index, item) in sale.items.iter().enumerate() {
        validate_quantity(item.quantity)?;
        validate_amount("unit_price", item.unit_price)?;

        if item.is_manual {
            let named = item
                .manual_name
                .as_deref()
                .map(|n| !n.trim().is_empty())
                .unwrap_or(false);
            if !named {
                return Err(ValidationError::MissingManualName { index });
            }
        } else if item.product_id.is_none() {
            return Err(ValidationError::MissingProductReference { index });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewSaleItem, PaymentMethod};

    fn sale_with_items(items: Vec<NewSaleItem>) -> NewSale {
        NewSale {
            client_id: None,
            total_amount: 10.0,
            tax_tps: 0.5,
            tax_tvq: 1.0,
            final_total: 11.5,
            payment_method: PaymentMethod::Cash,
            items,
        }
    }

    fn catalog_item(product_id: i64, quantity: i64) -> NewSaleItem {
        NewSaleItem {
            product_id: Some(product_id),
            quantity,
            unit_price: 10.0,
            is_manual: false,
            manual_name: None,
            repair_id: None,
            phone_id: None,
        }
    }

    #[test]
    fn test_sku_rules() {
        assert!(validate_sku("SCR-1").is_ok());
        assert!(validate_sku("screen_x2").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku("bad sku!").is_err());
        assert!(validate_sku(&"A".repeat(60)).is_err());
    }

    #[test]
    fn test_quantity_rules() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_amount_rejects_negative_and_nan() {
        assert!(validate_amount("price", 0.0).is_ok());
        assert!(validate_amount("price", 49.99).is_ok());
        assert!(validate_amount("price", -1.0).is_err());
        assert!(validate_amount("price", f64::NAN).is_err());
    }

    #[test]
    fn test_sale_requires_items() {
        let err = validate_new_sale(&sale_with_items(vec![])).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn test_non_manual_item_requires_product() {
        let mut item = catalog_item(1, 1);
        item.product_id = None;
        let err = validate_new_sale(&sale_with_items(vec![item])).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingProductReference { index: 0 }
        ));
    }

    #[test]
    fn test_manual_item_requires_name() {
        let item = NewSaleItem {
            product_id: None,
            quantity: 1,
            unit_price: 25.0,
            is_manual: true,
            manual_name: Some("   ".to_string()),
            repair_id: None,
            phone_id: None,
        };
        let err = validate_new_sale(&sale_with_items(vec![item])).unwrap_err();
        assert!(matches!(err, ValidationError::MissingManualName { index: 0 }));
    }

    #[test]
    fn test_valid_mixed_sale_passes() {
        let manual = NewSaleItem {
            product_id: None,
            quantity: 1,
            unit_price: 25.0,
            is_manual: true,
            manual_name: Some("Screen protector install".to_string()),
            repair_id: None,
            phone_id: None,
        };
        let sale = sale_with_items(vec![catalog_item(7, 3), manual]);
        assert!(validate_new_sale(&sale).is_ok());
    }
}
