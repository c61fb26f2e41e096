//! Unified error types for the board API.
//!
//! Every request-level failure maps to a status code and a JSON body of the
//! form `{"error": "..."}`.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::api::response::PrettyJson;
use crate::db::DbError;

// ============================================================================
// API Errors (request handling)
// ============================================================================

/// Errors that can occur while handling a board request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Create payload lacks `body` or `username`.
    #[error("Missing 'body' or 'username'")]
    MissingFields,

    /// Edit payload is unusable or carries a non-string `body`.
    #[error("Invalid 'body'")]
    InvalidBody,

    #[error("Message not found")]
    NotFound,

    /// No route matches the request path.
    #[error("Not found")]
    UnknownRoute,

    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl ApiError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidBody => "invalid_body",
            Self::NotFound => "not_found",
            Self::UnknownRoute => "unknown_route",
            Self::Database(_) => "database_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::UnknownRoute => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-visible message. Store failures are not echoed back.
    fn client_message(&self) -> String {
        match self {
            Self::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "Request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "Request rejected");
        }

        let body = serde_json::json!({ "error": self.client_message() });
        (status, PrettyJson(body)).into_response()
    }
}

/// Result type for board handlers.
pub type ApiResult<T> = Result<T, ApiError>;
