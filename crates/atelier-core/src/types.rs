//! # Domain Types
//!
//! Core domain types used throughout Atelier.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │     Product     │   │     Repair      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name / phone   │   │  sku (unique)   │   │  client_id (FK) │       │
//! │  │  email          │   │  price / cost   │   │  status (text)  │       │
//! │  └─────────────────┘   │  stock_quantity │   │  cost_estimate  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │──▶│    SaleItem     │   │    Payment      │       │
//! │  │  totals + taxes │ * │  product or     │   │  sale_id (FK)   │       │
//! │  │  payment_method │   │  manual line    │   │  amount         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` values (i64).
//! Monetary amounts are dollar-valued f64, mirroring the JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Debit card on the shop terminal.
    Debit,
    /// Credit card on the shop terminal.
    Credit,
}

// =============================================================================
// Client
// =============================================================================

/// A customer of the shop, referenced by sales and repairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or updating a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product (part or accessory) available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,
    /// Selling price.
    pub price: f64,
    /// Cost basis, used by the dashboard profit aggregate.
    pub cost: f64,
    /// Current stock level. Decremented by sale creation; nothing
    /// prevents it from going negative.
    pub stock_quantity: i64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub category: Option<String>,
}

// =============================================================================
// Repair
// =============================================================================

/// A repair job for a client's device.
///
/// `status` is a free-text label; [`crate::OPEN_REPAIR_STATUSES`] lists
/// the labels counted as ongoing by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Repair {
    pub id: i64,
    pub client_id: Option<i64>,
    pub device_details: Option<String>,
    pub issue_description: Option<String>,
    pub status: String,
    pub cost_estimate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Columns added after the initial schema (migration 002).
    pub parts_list: Option<String>,
    pub warranty: Option<String>,
    pub depot: f64,
    pub repair_type: Option<String>,
    pub notes: Option<String>,
}

/// Payload for creating or fully updating a repair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRepair {
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub device_details: Option<String>,
    #[serde(default)]
    pub issue_description: Option<String>,
    #[serde(default = "default_repair_status")]
    pub status: String,
    #[serde(default)]
    pub cost_estimate: f64,
    #[serde(default)]
    pub parts_list: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default)]
    pub depot: f64,
    #[serde(default)]
    pub repair_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_repair_status() -> String {
    "received".to_string()
}

// =============================================================================
// Sale
// =============================================================================

/// A sale header: totals, taxes, payment method.
///
/// Sales are append-only; once written they are never updated or
/// deleted through the API. `final_total` is caller-supplied and
/// assumed (not validated) to equal `total_amount + tax_tps + tax_tvq`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub client_id: Option<i64>,
    pub total_amount: f64,
    /// Federal sales tax (TPS/GST).
    pub tax_tps: f64,
    /// Provincial sales tax (TVQ/QST).
    pub tax_tvq: f64,
    pub final_total: f64,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// One line of a sale: either a catalog product or a manual entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    /// NULL when the line is manual.
    pub product_id: Option<i64>,
    pub quantity: i64,
    pub unit_price: f64,
    pub is_manual: bool,
    /// Free-text name, used only when `is_manual` is true.
    pub manual_name: Option<String>,
    pub repair_id: Option<i64>,
    pub phone_id: Option<i64>,
}

/// A sale header together with its line items, in line order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

/// Payload for creating a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    #[serde(default)]
    pub client_id: Option<i64>,
    pub total_amount: f64,
    #[serde(default)]
    pub tax_tps: f64,
    #[serde(default)]
    pub tax_tvq: f64,
    pub final_total: f64,
    pub payment_method: PaymentMethod,
    pub items: Vec<NewSaleItem>,
}

/// One input line of a sale payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleItem {
    #[serde(default)]
    pub product_id: Option<i64>,
    pub quantity: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub is_manual: bool,
    #[serde(default)]
    pub manual_name: Option<String>,
    #[serde(default)]
    pub repair_id: Option<i64>,
    #[serde(default)]
    pub phone_id: Option<i64>,
}

// =============================================================================
// Payment
// =============================================================================

/// A recorded payment; written as part of sale creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub sale_id: Option<i64>,
    pub repair_id: Option<i64>,
    pub amount: f64,
    pub method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Statistics
// =============================================================================

/// Read-only dashboard aggregates. See `StatsRepository::dashboard`
/// in atelier-db for the exact queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// SUM(final_total) for the current UTC calendar day.
    pub today_sales: f64,
    /// SUM(final_total) for the current UTC month.
    pub month_sales: f64,
    /// Revenue minus recorded cost basis over today's sale items.
    pub today_profit: f64,
    /// Repairs whose status is in [`crate::OPEN_REPAIR_STATUSES`].
    pub ongoing_repairs: i64,
    /// Products below the configured low-stock threshold.
    pub low_stock_count: i64,
    /// Most recently updated repairs, bounded.
    pub recent_repairs: Vec<Repair>,
    /// Lowest-stock products below the threshold, bounded.
    pub low_stock_items: Vec<Product>,
}

/// One day of the daily time series, ascending by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStat {
    /// Calendar day, `YYYY-MM-DD` (UTC).
    pub date: String,
    pub sales_total: f64,
    pub sales_count: i64,
    pub repairs_count: i64,
}

// =============================================================================
// Client History
// =============================================================================

/// A client together with their sale and repair history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientHistory {
    pub client: Client,
    pub repairs: Vec<Repair>,
    pub sales: Vec<Sale>,
}

// =============================================================================
// Inventory Taxonomy
// =============================================================================

/// Top level of the device taxonomy (e.g. "Smartphone", "Tablet").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DeviceCategory {
    pub id: i64,
    pub name: String,
}

/// A brand under a device category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Brand {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
}

/// A model under a brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DeviceModel {
    pub id: i64,
    pub brand_id: i64,
    pub name: String,
}

/// Category node of the nested hierarchy response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: i64,
    pub name: String,
    pub brands: Vec<BrandNode>,
}

/// Brand node of the nested hierarchy response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandNode {
    pub id: i64,
    pub name: String,
    pub models: Vec<ModelNode>,
}

/// Model leaf of the nested hierarchy response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelNode {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
