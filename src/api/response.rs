//! Pretty-printed JSON responses.

use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::Serialize;

/// JSON body rendered with two-space indentation and a trailing newline.
#[derive(Debug, Clone)]
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(mut bytes) => {
                bytes.push(b'\n');
                (
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("application/json"),
                    )],
                    bytes,
                )
                    .into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
