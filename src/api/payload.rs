//! Request payload parsing.
//!
//! Bodies arrive as raw bytes so that item lookups can answer 404 before the
//! payload is ever looked at.

use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// Fields required to create a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub body: String,
    pub username: String,
}

/// Fields accepted when editing a message. Anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageEdit {
    pub body: Option<String>,
}

fn json_object(raw: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(raw).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Parse a create payload. Both `body` and `username` must be strings;
/// empty strings are fine.
pub fn parse_new_message(raw: &[u8]) -> ApiResult<NewMessage> {
    let mut map = json_object(raw).ok_or(ApiError::MissingFields)?;

    let mut take = |key: &str| match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };

    match (take("body"), take("username")) {
        (Some(body), Some(username)) => Ok(NewMessage { body, username }),
        _ => Err(ApiError::MissingFields),
    }
}

/// Parse an edit payload. An empty request body means "no changes".
pub fn parse_edit(raw: &[u8]) -> ApiResult<MessageEdit> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(MessageEdit::default());
    }

    let mut map = json_object(raw).ok_or(ApiError::InvalidBody)?;
    match map.remove("body") {
        None => Ok(MessageEdit::default()),
        Some(Value::String(body)) => Ok(MessageEdit { body: Some(body) }),
        Some(_) => Err(ApiError::InvalidBody),
    }
}
