//! One running client session: the store plus the feature services and the
//! simulated responders that act on it.
//!
//! The session is the dependency-injection root. The entry point builds one
//! and hands out `Arc<AppStore>` (or wraps work in `context::provide`).
//! Dropping the session cancels every pending simulated response.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::chatbot::{BotMessage, ChatbotSession};
use crate::classify::categorize_ticket;
use crate::config::HelpdeskConfig;
use crate::installer::AppInstaller;
use crate::model::{
    AppRequest, ChatMessage, ChatRole, HealthReport, MessageStatus, NewChatMessage, NewTicket,
    Ticket, TicketPriority,
};
use crate::seed::SeedData;
use crate::sim::{schedule_it_reply, SessionTasks};
use crate::state::AppStore;
use crate::troubleshoot::{RestartError, Troubleshooter};

pub struct Session {
    config: HelpdeskConfig,
    store: Arc<AppStore>,
    tasks: SessionTasks,
    chatbot: ChatbotSession,
    troubleshooter: Troubleshooter,
    installer: AppInstaller,
    health_report: Option<HealthReport>,
}

impl Session {
    pub fn new(config: HelpdeskConfig, seed: SeedData) -> Self {
        let store = Arc::new(AppStore::from_seed(&seed, &config));
        let troubleshooter = Troubleshooter::new(seed.services, &config.simulation);
        let installer = AppInstaller::new(seed.available_apps, seed.app_requests, config.ids.strategy);

        Self {
            store,
            tasks: SessionTasks::new(),
            chatbot: ChatbotSession::new(),
            troubleshooter,
            installer,
            health_report: seed.health_report,
            config,
        }
    }

    /// Build a session from the seed named in `config` (builtin if unset).
    pub fn from_config(config: HelpdeskConfig) -> Result<Self> {
        let seed = config.load_seed()?;
        Ok(Self::new(config, seed))
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn tasks(&self) -> &SessionTasks {
        &self.tasks
    }

    pub fn chatbot(&self) -> &ChatbotSession {
        &self.chatbot
    }

    pub fn troubleshooter(&self) -> &Troubleshooter {
        &self.troubleshooter
    }

    pub fn installer(&self) -> &AppInstaller {
        &self.installer
    }

    pub fn health_report(&self) -> Option<&HealthReport> {
        self.health_report.as_ref()
    }

    /// File a ticket for the active agent, categorized from the issue text.
    ///
    /// Blank issues are rejected here (None); the store itself accepts any text.
    pub fn submit_ticket(&self, issue: &str) -> Option<Ticket> {
        if issue.trim().is_empty() {
            debug!("Ignoring blank ticket submission");
            return None;
        }

        let mut fields = NewTicket::new(issue, categorize_ticket(issue))
            .with_priority(TicketPriority::Medium);
        if let Some(agent) = self.store.active_agent() {
            fields.username = Some(agent.username);
            fields.hostname = Some(agent.hostname);
        }
        Some(self.store.add_ticket(fields))
    }

    /// Post a user message to the active agent's support chat and schedule the
    /// automatic IT acknowledgement.
    pub fn send_support_message(&self, text: &str) -> Option<ChatMessage> {
        let text = text.trim();
        let agent = self.store.active_agent()?;
        if text.is_empty() {
            return None;
        }

        let message = self.store.add_chat_message(
            &agent.agent_id,
            NewChatMessage::new(agent.agent_id.clone(), ChatRole::User, text)
                .with_status(MessageStatus::Sent),
        );
        schedule_it_reply(
            &self.tasks,
            self.store.clone(),
            agent.agent_id,
            self.config.simulation.it_reply_delay(),
        );
        Some(message)
    }

    /// Reply as IT to the agent selected in the admin console.
    ///
    /// Requires admin status and a selected chat agent.
    pub fn send_admin_message(&self, text: &str) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() || !self.store.is_admin() {
            return None;
        }
        let agent_id = self.store.selected_chat_agent()?;

        Some(self.store.add_chat_message(
            &agent_id,
            NewChatMessage::new(agent_id.clone(), ChatRole::It, text)
                .with_status(MessageStatus::Sent),
        ))
    }

    /// Ask the chatbot; the answer arrives after the configured delay.
    pub fn ask_chatbot(&self, text: &str) -> Option<BotMessage> {
        self.chatbot
            .send_and_schedule(&self.tasks, text, self.config.simulation.chatbot_reply_delay())
    }

    pub fn restart_service(&self, name: &str) -> Result<(), RestartError> {
        self.troubleshooter.schedule_restart(&self.tasks, name)
    }

    /// Request an app install for the active agent.
    pub fn request_app(&self, app_name: &str) -> AppRequest {
        let agent = self.store.active_agent();
        self.installer.request(app_name, agent.as_ref())
    }

    /// Requests filed by the active agent's user or device
    pub fn my_app_requests(&self) -> Vec<AppRequest> {
        match self.store.active_agent() {
            Some(agent) => self.installer.requests_for(&agent),
            None => Vec::new(),
        }
    }

    /// Cancel pending simulated responses.
    pub fn shutdown(&self) {
        info!(pending = self.tasks.pending(), "Session shutting down");
        self.tasks.cancel_all();
    }
}
