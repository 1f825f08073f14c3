//! Product endpoints.
//!
//! `GET /products` doubles as the search endpoint: with a `?search=`
//! query parameter it filters by name/SKU substring, without one it
//! lists the whole catalog.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use atelier_core::validation::validate_new_product;
use atelier_core::{NewProduct, Product};

use crate::error::{ApiError, ApiResult};
use crate::routes::Deleted;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/sku/{sku}", get(get_by_sku))
        .route("/products/{id}", put(update).delete(remove))
        .route("/products/{id}/stock", put(update_stock))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    search: Option<String>,
}

/// Signed stock adjustment: positive restocks, negative consumes.
#[derive(Debug, Deserialize)]
struct StockDelta {
    delta: i64,
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = match params.search.as_deref() {
        Some(query) if !query.trim().is_empty() => state.db.products().search(query).await?,
        _ => state.db.products().list().await?,
    };
    Ok(Json(products))
}

async fn get_by_sku(
    State(state): State<Arc<AppState>>,
    Path(sku): Path<String>,
) -> ApiResult<Json<Product>> {
    let product = state
        .db
        .products()
        .get_by_sku(&sku)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &sku))?;
    Ok(Json(product))
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    validate_new_product(&body)?;
    let product = state.db.products().insert(&body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewProduct>,
) -> ApiResult<Json<Product>> {
    validate_new_product(&body)?;
    Ok(Json(state.db.products().update(id, &body).await?))
}

async fn update_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<StockDelta>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.db.products().update_stock(id, body.delta).await?))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Deleted>> {
    state.db.products().delete(id).await?;
    Ok(Json(Deleted::yes()))
}
