//! # Atelier API
//!
//! Axum HTTP layer over the repositories. This crate is deliberately
//! thin: handlers validate the payload, call one repository method, and
//! map the result to JSON. All business rules live in `atelier-core`
//! and `atelier-db`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;

use atelier_db::Database;

use crate::config::ApiConfig;

/// Shared application state, injected into every handler via axum
/// `State`. The pool inside `db` is the only shared mutable resource.
pub struct AppState {
    pub db: Database,
    pub config: ApiConfig,
}

/// Builds the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", routes::api_router())
        .with_state(state)
}
