//! Chat and message records.

use serde::Serialize;
use time::OffsetDateTime;

/// A single chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    /// Chat identifier.
    pub id: String,
    /// Display name of the other participant.
    pub name: String,
    /// Avatar URL.
    pub picture: Option<String>,
    /// Id of the most recent message, if any.
    pub last_message: Option<String>,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    /// Message identifier.
    pub id: String,
    /// Message text.
    pub content: String,
    /// When the message was sent.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
