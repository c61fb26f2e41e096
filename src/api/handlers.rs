//! Handlers for the collection and item endpoints.

use axum::body::Bytes;
use axum::extract::{Path, State};
use http::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::AppState;
use super::payload::{parse_edit, parse_new_message};
use super::response::PrettyJson;
use crate::db::Message;
use crate::error::{ApiError, ApiResult};
use crate::metrics;

/// GET /messages - every message, oldest first.
pub async fn list_messages(State(state): State<AppState>) -> ApiResult<PrettyJson<Vec<Message>>> {
    let messages = state.db.messages().list().await?;
    debug!(count = messages.len(), "Listed messages");
    Ok(PrettyJson(messages))
}

/// POST /messages - create from `{body, username}`.
pub async fn create_message(
    State(state): State<AppState>,
    raw: Bytes,
) -> ApiResult<(StatusCode, PrettyJson<Message>)> {
    let new = parse_new_message(&raw)?;
    let message = state
        .db
        .messages()
        .create(&new.body, &new.username)
        .await?;

    metrics::record_created();
    info!(id = message.id, username = %message.username, "Message created");
    Ok((StatusCode::CREATED, PrettyJson(message)))
}

/// Resolve the `{id}` path segment to a stored message.
///
/// Ids that are not integers can never match a row and are reported the
/// same way as unknown ones.
async fn lookup(state: &AppState, raw_id: &str) -> ApiResult<Message> {
    let id: i64 = raw_id.parse().map_err(|_| ApiError::NotFound)?;
    state
        .db
        .messages()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)
}

/// GET /messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PrettyJson<Message>> {
    let message = lookup(&state, &id).await?;
    Ok(PrettyJson(message))
}

/// PATCH /messages/{id} - replace `body` if given. Without `body` the row is
/// committed unchanged and returned as is.
pub async fn update_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    raw: Bytes,
) -> ApiResult<PrettyJson<Message>> {
    let current = lookup(&state, &id).await?;
    let edit = parse_edit(&raw)?;

    let updated = state
        .db
        .messages()
        .update_body(&current, edit.body.as_deref())
        .await?
        // Deleted between lookup and update.
        .ok_or(ApiError::NotFound)?;

    if edit.body.is_some() {
        metrics::record_updated();
        info!(id = updated.id, "Message edited");
    }
    Ok(PrettyJson(updated))
}

/// DELETE /messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PrettyJson<Value>> {
    let current = lookup(&state, &id).await?;

    if !state.db.messages().delete(current.id).await? {
        return Err(ApiError::NotFound);
    }

    metrics::record_deleted();
    info!(id = current.id, "Message deleted");
    Ok(PrettyJson(json!({ "message": "Message deleted" })))
}

/// Anything outside the board's routes.
pub async fn fallback() -> ApiError {
    ApiError::UnknownRoute
}
