//! Statistics endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use atelier_core::{DailyStat, DashboardStats};

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats/dashboard", get(dashboard))
        .route("/stats/daily", get(daily))
}

async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(state.db.stats().dashboard().await?))
}

/// The window length is server configuration, not a query parameter.
async fn daily(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<DailyStat>>> {
    let days = state.config.daily_stats_days;
    Ok(Json(state.db.stats().daily(days).await?))
}
