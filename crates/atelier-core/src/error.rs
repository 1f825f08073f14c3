//! # Error Types
//!
//! Validation errors for atelier-core.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atelier-core (this file)                                              │
//! │  └── ValidationError  - Input validation failures          → HTTP 400  │
//! │                                                                         │
//! │  atelier-db (separate crate)                                           │
//! │  └── DbError          - Database operation failures        → 404/409/  │
//! │                                                               500      │
//! │                                                                         │
//! │  apps/api                                                              │
//! │  └── ApiError         - What the HTTP client sees (JSON)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, item index)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// Raised before any write reaches the database; the HTTP layer maps
/// every variant to 400 Bad Request.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A collection that must carry at least one entry is empty.
    #[error("{field} must contain at least one entry")]
    Empty { field: String },

    /// A non-manual sale line carries no product reference.
    #[error("item {index} is not manual and has no product_id")]
    MissingProductReference { index: usize },

    /// A manual sale line carries no name.
    #[error("item {index} is manual and has no manual_name")]
    MissingManualName { index: usize },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MissingProductReference { index: 2 };
        assert_eq!(err.to_string(), "item 2 is not manual and has no product_id");

        let err = ValidationError::Empty {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items must contain at least one entry");
    }
}
