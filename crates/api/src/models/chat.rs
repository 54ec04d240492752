//! Chat relay message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartbuy_core::ChatMessageId;

/// A chat message as persisted and broadcast.
///
/// Serialized directly onto the wire for WebSocket subscribers, so this
/// one type carries both serde derives and the row mapping.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
    /// Unique message ID.
    pub id: ChatMessageId,
    /// Sender's email address.
    pub sender: String,
    /// Message text.
    pub body: String,
    /// Server-assigned timestamp.
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_serialization() {
        let message = ChatMessage {
            id: ChatMessageId::new(1),
            sender: "a@b.c".to_string(),
            body: "hello".to_string(),
            sent_at: Utc::now(),
        };

        let json = serde_json::to_string(&message).expect("serialize");
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"sender\":\"a@b.c\""));
        assert!(json.contains("\"body\":\"hello\""));
    }
}
