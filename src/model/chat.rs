use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message in an agent's chat bucket.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "msg-" prefixed identifier
    pub msg_id: String,

    /// Agent id the conversation belongs to
    pub user: String,

    pub role: ChatRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,

    /// Attachment link (e.g., a requested screenshot)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Message fields supplied by the caller; id and timestamp are generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewChatMessage {
    pub user: String,
    pub role: ChatRole,
    pub message: String,
    #[serde(default)]
    pub status: Option<MessageStatus>,
    #[serde(default)]
    pub url: Option<String>,
}

impl NewChatMessage {
    pub fn new(user: impl Into<String>, role: ChatRole, message: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            role,
            message: message.into(),
            status: None,
            url: None,
        }
    }

    pub fn with_status(mut self, status: MessageStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) fn into_message(self, msg_id: String, timestamp: DateTime<Utc>) -> ChatMessage {
        ChatMessage {
            msg_id,
            user: self.user,
            role: self.role,
            message: self.message,
            timestamp,
            status: self.status,
            url: self.url,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    It,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Seen,
}
