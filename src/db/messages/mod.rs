//! Message repository for the board.
//!
//! Handles creation, lookup, body edits and deletion of messages.

pub mod models;
pub mod queries;

pub use models::Message;
pub use queries::MessageRepository;
