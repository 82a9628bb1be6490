//! Error types for songbook
//!
//! One error enum for the whole service, mapped onto HTTP responses via
//! `IntoResponse`. Validation failures carry the full field-to-message
//! mapping so the client sees every problem at once.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::api::validate::ValidationErrors;

/// Convenience Result type using songbook Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for songbook
#[derive(Error, Debug)]
pub enum Error {
    /// Database connection or query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body failed field validation
    #[error("Validation failed")]
    Validation(ValidationErrors),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // Body is the raw field-to-message mapping, not wrapped in "error"
            Error::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            Error::NotFound(what) => {
                let body = Json(json!({ "error": format!("Not found: {}", what) }));
                (StatusCode::NOT_FOUND, body).into_response()
            }
            Error::Database(e) => {
                tracing::error!("Database error: {}", e);
                let body = Json(json!({ "error": "Internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
