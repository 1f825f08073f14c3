//! Client endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use atelier_core::validation::validate_name;
use atelier_core::{Client, ClientHistory, NewClient};

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients", get(list).post(create))
        .route("/clients/{id}", put(update))
        .route("/clients/{id}/history", get(history))
}

async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Client>>> {
    Ok(Json(state.db.clients().list().await?))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewClient>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    validate_name("name", &body.name)?;
    let client = state.db.clients().insert(&body).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewClient>,
) -> ApiResult<Json<Client>> {
    validate_name("name", &body.name)?;
    Ok(Json(state.db.clients().update(id, &body).await?))
}

async fn history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ClientHistory>> {
    Ok(Json(state.db.clients().history(id).await?))
}
