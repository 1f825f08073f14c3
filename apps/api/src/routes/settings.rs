//! Settings endpoints.
//!
//! The payload is a flat string map by contract. POST merges: keys
//! absent from the body are left untouched, and the response is the
//! full resulting map.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_all).post(upsert))
}

async fn get_all(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BTreeMap<String, String>>> {
    Ok(Json(state.db.settings().get_all().await?))
}

async fn upsert(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BTreeMap<String, String>>,
) -> ApiResult<Json<BTreeMap<String, String>>> {
    Ok(Json(state.db.settings().upsert_many(&body).await?))
}
