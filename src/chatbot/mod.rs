//! Local assistant conversation.
//!
//! Unlike support chat, chatbot messages live only in the session that owns
//! the [`ChatbotSession`]; nothing is written to the store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

use crate::classify::chatbot_reply;
use crate::sim::SessionTasks;

pub const GREETING: &str = "Hello! I'm your IT Support assistant. How can I help you today? \
I can assist with:\n\n• Software issues\n• Network connectivity\n• Password resets\n\
• Hardware problems\n• General IT questions";

/// Canned prompts offered as one-click messages
pub const QUICK_REPLIES: [&str; 4] = [
    "My computer is running slow",
    "I can't connect to the VPN",
    "How do I reset my password?",
    "Printer not working",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BotRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BotMessage {
    pub id: u64,
    pub role: BotRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Conversation with the keyword chatbot. Clones share the same conversation.
#[derive(Clone)]
pub struct ChatbotSession {
    messages: Arc<Mutex<Vec<BotMessage>>>,
    next_id: Arc<AtomicU64>,
    awaiting_reply: Arc<AtomicBool>,
}

impl ChatbotSession {
    /// New conversation opened by the assistant greeting
    pub fn new() -> Self {
        let session = Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            awaiting_reply: Arc::new(AtomicBool::new(false)),
        };
        session.push(BotRole::Assistant, GREETING.to_string());
        session
    }

    pub fn messages(&self) -> Vec<BotMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True between a scheduled send and its reply
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply.load(Ordering::SeqCst)
    }

    /// Append a user message. Blank input is ignored.
    pub fn send(&self, text: &str) -> Option<BotMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.push(BotRole::User, text.to_string()))
    }

    /// Append the assistant's answer to `text`.
    pub fn reply_to(&self, text: &str) -> BotMessage {
        self.push(BotRole::Assistant, chatbot_reply(text).to_string())
    }

    /// Send `text` and answer it after `delay`.
    pub fn send_and_schedule(
        &self,
        tasks: &SessionTasks,
        text: &str,
        delay: Duration,
    ) -> Option<BotMessage> {
        let sent = self.send(text)?;
        self.awaiting_reply.store(true, Ordering::SeqCst);

        let session = self.clone();
        let prompt = sent.content.clone();
        tasks.schedule(delay, async move {
            session.reply_to(&prompt);
            session.awaiting_reply.store(false, Ordering::SeqCst);
        });

        Some(sent)
    }

    fn push(&self, role: BotRole, content: String) -> BotMessage {
        let message = BotMessage {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            role,
            content,
            timestamp: Utc::now(),
        };
        debug!(id = message.id, role = ?role, "Chatbot message");
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        message
    }
}

impl Default for ChatbotSession {
    fn default() -> Self {
        Self::new()
    }
}
