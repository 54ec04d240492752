//! Chat relay hub.

use tokio::sync::broadcast;

use crate::models::chat::ChatMessage;

/// Buffered messages per subscriber before lagging kicks in.
const CHANNEL_CAPACITY: usize = 256;

/// In-process fan-out channel for chat messages.
///
/// Every connected WebSocket subscribes to the hub; a published message
/// reaches all current subscribers, including the sender's own
/// connection.
#[derive(Debug, Clone)]
pub struct ChatHub {
    tx: broadcast::Sender<ChatMessage>,
}

impl ChatHub {
    /// Create a new hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to all messages published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.tx.subscribe()
    }

    /// Broadcast a message to all subscribers.
    ///
    /// A send with no subscribers is not an error; the message is simply
    /// dropped.
    pub fn publish(&self, message: ChatMessage) {
        let _ = self.tx.send(message);
    }
}

impl Default for ChatHub {
    fn default() -> Self {
        Self::new()
    }
}
