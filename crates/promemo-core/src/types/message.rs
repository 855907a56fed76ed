//! Inbound/outbound channel message types.

use serde::{Deserialize, Serialize};

/// Incoming message from a channel (the webhook body, already decoded).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub channel: String,
    pub sender: String,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl IncomingMessage {
    pub fn new(
        channel: impl Into<String>,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            sender: sender.into(),
            content: content.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Outgoing message to a channel recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub to: String,
    pub content: String,
}

impl OutgoingMessage {
    pub fn new(to: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            content: content.into(),
        }
    }
}
