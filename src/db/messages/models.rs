//! Message database models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::DbError;

/// Column tuple selected for every message query.
pub(crate) type MessageRow = (i64, String, String, String, String);

/// A posted message.
///
/// Serializes to the wire shape `{id, body, username, created_at, updated_at}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: i64,
    pub body: String,
    pub username: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = DbError;

    fn try_from(
        (id, body, username, created_at, updated_at): MessageRow,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            body,
            username,
            created_at: timestamp::parse(&created_at)?,
            updated_at: timestamp::parse(&updated_at)?,
        })
    }
}

/// Textual timestamp handling.
///
/// Timestamps are UTC with microsecond precision, rendered the way SQLite
/// renders datetimes by default: `YYYY-MM-DD HH:MM:SS.ffffff`.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeDelta, Utc};
    use serde::Serializer;

    use crate::db::DbError;

    /// Storage and wire layout.
    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

    const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    /// Current UTC time truncated to what the store keeps.
    pub fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    /// Next `updated_at` after `previous`: the current time, or one
    /// microsecond past `previous` if the clock has not moved on.
    pub fn advance(previous: DateTime<Utc>) -> DateTime<Utc> {
        now().max(previous + TimeDelta::microseconds(1))
    }

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.format(FORMAT).to_string()
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, DbError> {
        NaiveDateTime::parse_from_str(raw, PARSE_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| DbError::InvalidTimestamp(raw.to_string()))
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }
}
