//! HTTP error mapping.
//!
//! Every failure leaving a handler becomes a JSON envelope
//! `{"error": "<message>"}` with a status that reflects the cause:
//! validation failures are 400, missing rows 404, unique-key conflicts
//! 409, everything else 500. The underlying error is logged server-side
//! before it is flattened into the envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use atelier_core::ValidationError;
use atelier_db::DbError;

/// Errors a request handler can produce.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ApiError {
    /// Shorthand for a 404 on an entity looked up by id.
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        ApiError::Db(DbError::not_found(entity, id))
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Db(DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Db(DbError::UniqueViolation { .. }) => StatusCode::CONFLICT,
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let validation: ApiError = ValidationError::Empty {
            field: "items".to_string(),
        }
        .into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        assert_eq!(
            ApiError::not_found("Product", 42).status(),
            StatusCode::NOT_FOUND
        );

        let conflict: ApiError = DbError::UniqueViolation {
            field: "sku".to_string(),
        }
        .into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let internal: ApiError = DbError::PoolExhausted.into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
