//! # atelier-core: Pure Domain Logic for Atelier
//!
//! Domain types, validation rules, and domain errors for the Atelier
//! back office. Everything here is pure: no database, no network, no
//! file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atelier Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/api (Axum HTTP Server)                     │   │
//! │  │    /api/clients  /api/products  /api/sales  /api/stats  ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atelier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐      ┌────────────┐      ┌───────────┐         │   │
//! │  │   │   types   │      │ validation │      │   error   │         │   │
//! │  │   │  Product  │      │ sale rules │      │ Validation│         │   │
//! │  │   │   Sale    │      │ field rules│      │   Error   │         │   │
//! │  │   └───────────┘      └────────────┘      └───────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  atelier-db (Database Layer)                    │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Product, Repair, Sale, ...)
//! - [`error`] - Validation error type
//! - [`validation`] - Input validation rules

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Settings key holding the low-stock threshold.
///
/// ## Why a settings key?
/// The threshold is operator-tunable; reading it through the settings
/// store means no redeploy to change it. [`DEFAULT_LOW_STOCK_THRESHOLD`]
/// applies when the key is absent or unparseable.
pub const LOW_STOCK_THRESHOLD_KEY: &str = "low_stock_threshold";

/// Stock level below which a product counts as low-stock on the
/// dashboard, when no `low_stock_threshold` setting is present.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Repair status labels counted as "ongoing" by the dashboard.
///
/// Status is free text at the storage level; these are the labels the
/// shop front end assigns before a repair is closed out.
pub const OPEN_REPAIR_STATUSES: [&str; 4] =
    ["received", "diagnosed", "in_progress", "waiting_parts"];

/// Maximum items allowed in a single sale.
///
/// ## Business Reason
/// Prevents runaway payloads and keeps transaction sizes reasonable.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity of a single sale line.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
