use serde::Serialize;

use crate::model::{ChatMessage, Ticket, TicketStatus};

/// Change notification broadcast after each store mutation.
///
/// The mutation is already applied when the event is sent, so a subscriber
/// reading the store in response always sees the new state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    ActiveAgentChanged {
        agent_id: Option<String>,
        is_admin: bool,
    },
    TicketAdded {
        ticket: Ticket,
    },
    TicketStatusChanged {
        ticket_id: String,
        old_status: TicketStatus,
        new_status: TicketStatus,
    },
    ChatMessageAdded {
        agent_id: String,
        message: ChatMessage,
    },
    SelectedChatAgentChanged {
        agent_id: Option<String>,
    },
}
