use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::classify::categorize_ticket;
use crate::config::HelpdeskConfig;
use crate::model::{
    Agent, ChatMessage, ChatRole, NewChatMessage, NewTicket, Ticket, TicketStatus,
};
use crate::seed::SeedData;
use crate::state::events::StoreEvent;
use crate::state::ids::{IdGenerator, MESSAGE_PREFIX, TICKET_PREFIX};

/// Single source of truth for agents, tickets, chat buckets and selections.
///
/// One store exists per session. It is built by the entry point and handed to
/// consumers (usually as `Arc<AppStore>`). Reads return owned snapshots;
/// all writes go through the methods below and are visible to every reader
/// as soon as the call returns.
pub struct AppStore {
    /// Seeded once, never mutated
    agents: Vec<Agent>,

    /// Newest-first
    tickets: RwLock<Vec<Ticket>>,

    /// agent_id -> messages in append order (buckets created lazily)
    chat_messages: DashMap<String, Vec<ChatMessage>>,

    active_agent: RwLock<Option<Agent>>,
    selected_chat_agent: RwLock<Option<String>>,

    /// Usernames allowed into the admin portal
    admin_usernames: HashSet<String>,

    ids: IdGenerator,

    /// Broadcast channel for change events
    events_tx: broadcast::Sender<StoreEvent>,
}

/// Read-only view of the whole store at one point in time
#[derive(Clone, Debug, Serialize)]
pub struct AppSnapshot {
    pub agents: Vec<Agent>,
    pub tickets: Vec<Ticket>,
    pub chat_messages: BTreeMap<String, Vec<ChatMessage>>,
    pub active_agent: Option<Agent>,
    pub is_admin: bool,
    pub selected_chat_agent: Option<String>,
}

/// Ticket list filter: substring query on issue or id, optional status
#[derive(Clone, Debug, Default)]
pub struct TicketFilter {
    pub query: String,
    pub status: Option<TicketStatus>,
}

impl TicketFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        let query = self.query.to_lowercase();
        let matches_query = ticket.issue.to_lowercase().contains(&query)
            || ticket.ticket_id.to_lowercase().contains(&query);
        let matches_status = self.status.map_or(true, |s| ticket.status == s);
        matches_query && matches_status
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub unresolved: usize,
    pub pending: usize,
    pub resolved: usize,
}

impl AppStore {
    /// Build a store from seed data. The first seeded agent becomes active.
    pub fn from_seed(seed: &SeedData, config: &HelpdeskConfig) -> Self {
        let (events_tx, _) = broadcast::channel(1000);

        let chat_messages = DashMap::new();
        for (agent_id, messages) in &seed.chat_messages {
            chat_messages.insert(agent_id.clone(), messages.clone());
        }

        let store = Self {
            agents: seed.agents.clone(),
            tickets: RwLock::new(seed.tickets.clone()),
            chat_messages,
            active_agent: RwLock::new(seed.agents.first().cloned()),
            selected_chat_agent: RwLock::new(None),
            admin_usernames: config.admin.usernames.iter().cloned().collect(),
            ids: IdGenerator::new(config.ids.strategy),
            events_tx,
        };

        info!(
            agents = store.agents.len(),
            tickets = seed.tickets.len(),
            chat_buckets = store.chat_messages.len(),
            "Store initialized from seed"
        );

        store
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events_tx.subscribe()
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events_tx.send(event);
    }

    // ── Agents ──────────────────────────────────────────────────────────────

    pub fn agents(&self) -> Vec<Agent> {
        self.agents.clone()
    }

    pub fn agent(&self, agent_id: &str) -> Option<Agent> {
        self.agents.iter().find(|a| a.agent_id == agent_id).cloned()
    }

    pub fn online_agents(&self) -> Vec<Agent> {
        self.agents.iter().filter(|a| a.online).cloned().collect()
    }

    pub fn offline_agents(&self) -> Vec<Agent> {
        self.agents.iter().filter(|a| !a.online).cloned().collect()
    }

    /// Case-insensitive match on hostname, username or agent id
    pub fn search_agents(&self, query: &str) -> Vec<Agent> {
        self.agents
            .iter()
            .filter(|a| a.matches_query(query))
            .cloned()
            .collect()
    }

    pub fn active_agent(&self) -> Option<Agent> {
        self.active_agent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the active agent. Admin status follows on the next read.
    pub fn set_active_agent(&self, agent: Option<Agent>) {
        let agent_id = agent.as_ref().map(|a| a.agent_id.clone());
        let is_admin = agent
            .as_ref()
            .is_some_and(|a| self.admin_usernames.contains(&a.username));

        *self
            .active_agent
            .write()
            .unwrap_or_else(PoisonError::into_inner) = agent;

        info!(agent_id = ?agent_id, is_admin, "Active agent changed");
        self.publish(StoreEvent::ActiveAgentChanged { agent_id, is_admin });
    }

    /// Activate a seeded agent by id. Returns false (and changes nothing) for
    /// unknown ids.
    pub fn activate_agent(&self, agent_id: &str) -> bool {
        match self.agent(agent_id) {
            Some(agent) => {
                self.set_active_agent(Some(agent));
                true
            }
            None => {
                debug!(agent_id = %agent_id, "Unknown agent, active agent unchanged");
                false
            }
        }
    }

    /// True iff an active agent exists and its username is on the allow-list.
    ///
    /// Computed from the current active agent on every call.
    pub fn is_admin(&self) -> bool {
        self.active_agent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|a| self.admin_usernames.contains(&a.username))
    }

    // ── Tickets ─────────────────────────────────────────────────────────────

    /// Newest-first
    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn ticket(&self, ticket_id: &str) -> Option<Ticket> {
        self.tickets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|t| t.ticket_id == ticket_id)
            .cloned()
    }

    /// Create a ticket and put it at the front of the collection.
    ///
    /// The issue text is stored as given, empty included.
    pub fn add_ticket(&self, fields: NewTicket) -> Ticket {
        // Id and timestamp are issued under the write lock so collection order
        // always matches id order.
        let ticket = {
            let mut tickets = self
                .tickets
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let ticket = fields.into_ticket(self.ids.next(TICKET_PREFIX), Utc::now());
            tickets.insert(0, ticket.clone());
            ticket
        };

        info!(
            ticket_id = %ticket.ticket_id,
            category = %ticket.category,
            status = %ticket.status,
            "Ticket added"
        );
        self.publish(StoreEvent::TicketAdded {
            ticket: ticket.clone(),
        });

        ticket
    }

    /// Set the status of the ticket with `ticket_id`; no other field changes.
    ///
    /// Returns false and leaves the collection untouched if no ticket matches.
    pub fn update_ticket_status(&self, ticket_id: &str, status: TicketStatus) -> bool {
        let old_status = {
            let mut tickets = self
                .tickets
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            match tickets.iter_mut().find(|t| t.ticket_id == ticket_id) {
                Some(ticket) => std::mem::replace(&mut ticket.status, status),
                None => {
                    debug!(ticket_id = %ticket_id, "Status update for unknown ticket ignored");
                    return false;
                }
            }
        };

        info!(
            ticket_id = %ticket_id,
            old_status = %old_status,
            new_status = %status,
            "Ticket status updated"
        );
        self.publish(StoreEvent::TicketStatusChanged {
            ticket_id: ticket_id.to_string(),
            old_status,
            new_status: status,
        });

        true
    }

    pub fn search_tickets(&self, filter: &TicketFilter) -> Vec<Ticket> {
        self.tickets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn ticket_stats(&self) -> TicketStats {
        let tickets = self.tickets.read().unwrap_or_else(PoisonError::into_inner);
        let mut stats = TicketStats {
            total: tickets.len(),
            ..TicketStats::default()
        };
        for ticket in tickets.iter() {
            match ticket.status {
                TicketStatus::Unresolved => stats.unresolved += 1,
                TicketStatus::Pending => stats.pending += 1,
                TicketStatus::Resolved => stats.resolved += 1,
            }
        }
        stats
    }

    // ── Chat ────────────────────────────────────────────────────────────────

    /// Messages for one agent in chronological order (empty if no bucket)
    pub fn chat_messages(&self, agent_id: &str) -> Vec<ChatMessage> {
        self.chat_messages
            .get(agent_id)
            .map(|bucket| bucket.clone())
            .unwrap_or_default()
    }

    /// Every bucket, keyed by agent id
    pub fn all_chat_messages(&self) -> BTreeMap<String, Vec<ChatMessage>> {
        self.chat_messages
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Append a message to the agent's bucket, creating the bucket if needed.
    pub fn add_chat_message(&self, agent_id: &str, fields: NewChatMessage) -> ChatMessage {
        // Issued while the bucket entry is held, so append order matches id order
        let message = {
            let mut bucket = self.chat_messages.entry(agent_id.to_string()).or_default();
            let message = fields.into_message(self.ids.next(MESSAGE_PREFIX), Utc::now());
            bucket.push(message.clone());
            message
        };

        debug!(
            agent_id = %agent_id,
            msg_id = %message.msg_id,
            role = ?message.role,
            "Chat message added"
        );
        self.publish(StoreEvent::ChatMessageAdded {
            agent_id: agent_id.to_string(),
            message: message.clone(),
        });

        message
    }

    pub fn selected_chat_agent(&self) -> Option<String> {
        self.selected_chat_agent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Track which device the admin chat console shows. Independent of the
    /// active agent.
    pub fn set_selected_chat_agent(&self, agent_id: Option<String>) {
        *self
            .selected_chat_agent
            .write()
            .unwrap_or_else(PoisonError::into_inner) = agent_id.clone();

        debug!(agent_id = ?agent_id, "Selected chat agent changed");
        self.publish(StoreEvent::SelectedChatAgentChanged { agent_id });
    }

    /// Open a ticket from the user side of an agent's chat.
    ///
    /// The issue is the user messages joined by newlines, categorized by
    /// keyword. Returns None when the bucket holds no user messages.
    pub fn escalate_chat(&self, agent_id: &str) -> Option<Ticket> {
        let issue = self
            .chat_messages(agent_id)
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .map(|m| m.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if issue.is_empty() {
            return None;
        }

        let category = categorize_ticket(&issue);
        let mut fields = NewTicket::new(issue, category);
        if let Some(agent) = self.agent(agent_id) {
            fields = fields.with_reporter(agent.username, agent.hostname);
        }

        info!(agent_id = %agent_id, "Escalating chat to ticket");
        Some(self.add_ticket(fields))
    }

    // ── Snapshot ────────────────────────────────────────────────────────────

    /// Tickets, active agent, admin flag and chat selection are read under one
    /// combined read scope and are mutually consistent. Chat buckets are
    /// copied afterwards, shard by shard, and may include messages appended
    /// after the other fields were read.
    pub fn snapshot(&self) -> AppSnapshot {
        let (tickets, active_agent, selected_chat_agent) = {
            let tickets = self.tickets.read().unwrap_or_else(PoisonError::into_inner);
            let active_agent = self
                .active_agent
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            let selected = self
                .selected_chat_agent
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            (tickets.clone(), active_agent.clone(), selected.clone())
        };
        let is_admin = active_agent
            .as_ref()
            .is_some_and(|a| self.admin_usernames.contains(&a.username));

        AppSnapshot {
            agents: self.agents(),
            tickets,
            chat_messages: self.all_chat_messages(),
            active_agent,
            is_admin,
            selected_chat_agent,
        }
    }
}
