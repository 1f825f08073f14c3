//! Payment endpoints. Read-only: rows are written by sale creation.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use atelier_core::Payment;

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/payments", get(list))
}

async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Payment>>> {
    Ok(Json(state.db.payments().list().await?))
}
