//! Inventory taxonomy endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;

use atelier_core::validation::validate_name;
use atelier_core::{Brand, CategoryNode, DeviceCategory, DeviceModel};

use crate::error::ApiResult;
use crate::routes::Deleted;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/inventory/hierarchy", get(hierarchy))
        .route("/inventory/categories", post(create_category))
        .route("/inventory/categories/{id}", delete(delete_category))
        .route("/inventory/brands", post(create_brand))
        .route("/inventory/brands/{id}", delete(delete_brand))
        .route("/inventory/models", post(create_model))
        .route("/inventory/models/{id}", delete(delete_model))
}

#[derive(Debug, Deserialize)]
struct NewCategory {
    name: String,
}

#[derive(Debug, Deserialize)]
struct NewBrand {
    category_id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct NewModel {
    brand_id: i64,
    name: String,
}

async fn hierarchy(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<CategoryNode>>> {
    Ok(Json(state.db.inventory().hierarchy().await?))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<DeviceCategory>)> {
    validate_name("name", &body.name)?;
    let category = state.db.inventory().create_category(&body.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Deleted>> {
    state.db.inventory().delete_category(id).await?;
    Ok(Json(Deleted::yes()))
}

async fn create_brand(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewBrand>,
) -> ApiResult<(StatusCode, Json<Brand>)> {
    validate_name("name", &body.name)?;
    let brand = state
        .db
        .inventory()
        .create_brand(body.category_id, &body.name)
        .await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

async fn delete_brand(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Deleted>> {
    state.db.inventory().delete_brand(id).await?;
    Ok(Json(Deleted::yes()))
}

async fn create_model(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewModel>,
) -> ApiResult<(StatusCode, Json<DeviceModel>)> {
    validate_name("name", &body.name)?;
    let model = state
        .db
        .inventory()
        .create_model(body.brand_id, &body.name)
        .await?;
    Ok((StatusCode::CREATED, Json(model)))
}

async fn delete_model(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Deleted>> {
    state.db.inventory().delete_model(id).await?;
    Ok(Json(Deleted::yes()))
}
