//! Simulated asynchronous responses.
//!
//! Stand-ins for server replies run as delayed tasks owned by a
//! [`SessionTasks`]. Tasks can be cancelled explicitly and are aborted when
//! the owning session is dropped, so nothing fires into a torn-down session.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::model::{ChatRole, MessageStatus, NewChatMessage};
use crate::state::AppStore;

#[cfg(test)]
mod tests;

/// Automatic acknowledgement posted in support chat
pub const IT_AUTO_REPLY: &str = "Thank you for reaching out. An IT team member will respond shortly.";

/// Pending simulated responses of one session.
///
/// Must be used from within a tokio runtime.
#[derive(Default)]
pub struct SessionTasks {
    tasks: Mutex<JoinSet<()>>,
}

impl SessionTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`.
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        // Reap finished tasks so the set does not grow unbounded
        while tasks.try_join_next().is_some() {}
        tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        debug!(delay_ms = delay.as_millis() as u64, pending = tasks.len(), "Scheduled simulated response");
    }

    /// Number of scheduled tasks that have not finished yet
    pub fn pending(&self) -> usize {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        while tasks.try_join_next().is_some() {}
        tasks.len()
    }

    /// Abort every pending task. Aborted tasks never run their action.
    pub fn cancel_all(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        if !tasks.is_empty() {
            info!(pending = tasks.len(), "Cancelling simulated responses");
        }
        tasks.abort_all();
        // Aborted handles stay in the set until joined; drop them outright
        *tasks = JoinSet::new();
    }
}

/// Post the automatic IT reply to `agent_id`'s chat after `delay`.
pub fn schedule_it_reply(
    tasks: &SessionTasks,
    store: Arc<AppStore>,
    agent_id: String,
    delay: Duration,
) {
    tasks.schedule(delay, async move {
        let reply = NewChatMessage::new(agent_id.clone(), ChatRole::It, IT_AUTO_REPLY)
            .with_status(MessageStatus::Delivered);
        store.add_chat_message(&agent_id, reply);
    });
}
