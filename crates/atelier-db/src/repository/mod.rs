//! # Repository Module
//!
//! Database repository implementations for Atelier.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.sales().create_sale(&payload)                              │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── create_sale(&self, sale)     ← one transaction                    │
//! │  ├── list_with_items(&self)                                            │
//! │  └── get_items(&self, sale_id)                                         │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place per entity                             │
//! │  • Easy to test against an in-memory database                          │
//! │  • Handlers stay a thin JSON adapter                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`client::ClientRepository`] - Client CRUD and history
//! - [`product::ProductRepository`] - Product CRUD, search, stock deltas
//! - [`repair::RepairRepository`] - Repair CRUD and status updates
//! - [`sale::SaleRepository`] - Transactional sale creation, listing
//! - [`payment::PaymentRepository`] - Payment listing
//! - [`settings::SettingsRepository`] - Key-value settings with upsert
//! - [`stats::StatsRepository`] - Dashboard and daily aggregates
//! - [`inventory::InventoryRepository`] - Category/brand/model taxonomy

pub mod client;
pub mod inventory;
pub mod payment;
pub mod product;
pub mod repair;
pub mod sale;
pub mod settings;
pub mod stats;
