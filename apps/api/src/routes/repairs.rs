//! Repair endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use atelier_core::validation::validate_status;
use atelier_core::{NewRepair, Repair};

use crate::error::ApiResult;
use crate::routes::Deleted;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/repairs", get(list).post(create))
        .route("/repairs/{id}", put(update).delete(remove))
        .route("/repairs/{id}/status", put(update_status))
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: String,
}

async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Repair>>> {
    Ok(Json(state.db.repairs().list().await?))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewRepair>,
) -> ApiResult<(StatusCode, Json<Repair>)> {
    validate_status(&body.status)?;
    let repair = state.db.repairs().insert(&body).await?;
    Ok((StatusCode::CREATED, Json(repair)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewRepair>,
) -> ApiResult<Json<Repair>> {
    validate_status(&body.status)?;
    Ok(Json(state.db.repairs().update(id, &body).await?))
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<StatusUpdate>,
) -> ApiResult<Json<Repair>> {
    validate_status(&body.status)?;
    Ok(Json(state.db.repairs().update_status(id, &body.status).await?))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Deleted>> {
    state.db.repairs().delete(id).await?;
    Ok(Json(Deleted::yes()))
}
