//! Route wiring.
//!
//! One module per entity family; each contributes its routes to the
//! `/api` subtree.

pub mod clients;
pub mod inventory;
pub mod payments;
pub mod products;
pub mod repairs;
pub mod sales;
pub mod settings;
pub mod stats;

use std::sync::Arc;

use axum::Router;
use serde::Serialize;

use crate::AppState;

/// Response body for DELETE endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

impl Deleted {
    pub fn yes() -> Self {
        Deleted { deleted: true }
    }
}

/// Assembles every entity router under one subtree.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(clients::router())
        .merge(products::router())
        .merge(repairs::router())
        .merge(sales::router())
        .merge(payments::router())
        .merge(settings::router())
        .merge(stats::router())
        .merge(inventory::router())
}
