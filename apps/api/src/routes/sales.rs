//! Sale endpoints.
//!
//! Sales are append-only: creation and listing, no update or delete.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use atelier_core::validation::validate_new_sale;
use atelier_core::{NewSale, SaleWithItems};

use crate::error::ApiResult;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sales", get(list).post(create))
}

async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<SaleWithItems>>> {
    Ok(Json(state.db.sales().list_with_items().await?))
}

/// Creates a sale: validation here, everything transactional in the
/// repository. An unknown product in any line fails the whole request
/// with 404 and leaves no partial writes behind.
async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewSale>,
) -> ApiResult<(StatusCode, Json<SaleWithItems>)> {
    validate_new_sale(&body)?;
    let sale = state.db.sales().create_sale(&body).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
