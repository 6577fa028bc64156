use super::*;
use crate::config::{HelpdeskConfig, IdStrategy};
use crate::model::{
    ChatRole, MessageStatus, NewChatMessage, NewTicket, TicketPriority, TicketStatus,
};
use crate::seed::SeedData;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn seeded_store() -> AppStore {
    AppStore::from_seed(&SeedData::builtin().unwrap(), &HelpdeskConfig::default())
}

fn admin_agent() -> crate::model::Agent {
    let mut agent = SeedData::builtin().unwrap().agents[0].clone();
    agent.agent_id = "INL-PC-999-admin".to_string();
    agent.username = "admin".to_string();
    agent
}

fn vpn_ticket() -> NewTicket {
    NewTicket::new("VPN is down", "Network").with_priority(TicketPriority::High)
}

#[test]
fn test_first_seeded_agent_is_active() {
    let store = seeded_store();
    let active = store.active_agent().unwrap();
    assert_eq!(active.agent_id, "INL-PC-001-abc123");
    assert!(store.selected_chat_agent().is_none());
}

#[test]
fn test_empty_seed_has_no_active_agent() {
    let store = AppStore::from_seed(&SeedData::default(), &HelpdeskConfig::default());
    assert!(store.active_agent().is_none());
    assert!(!store.is_admin());
    assert!(store.tickets().is_empty());
}

#[test]
fn test_is_admin_false_without_active_agent() {
    let store = seeded_store();
    store.set_active_agent(None);
    assert!(!store.is_admin());
}

#[test]
fn test_is_admin_follows_active_agent() {
    let store = seeded_store();
    assert!(!store.is_admin()); // JohnDoe

    store.set_active_agent(Some(admin_agent()));
    assert!(store.is_admin());

    for agent in store.agents() {
        store.set_active_agent(Some(agent));
        assert!(!store.is_admin());
    }
}

#[test]
fn test_admin_allow_list_from_config() {
    let mut config = HelpdeskConfig::default();
    config.admin.usernames = vec!["JaneSmith".to_string()];
    let store = AppStore::from_seed(&SeedData::builtin().unwrap(), &config);

    assert!(store.activate_agent("INL-PC-002-def456"));
    assert!(store.is_admin());
    assert!(store.activate_agent("INL-PC-001-abc123"));
    assert!(!store.is_admin());
}

#[test]
fn test_activate_unknown_agent_is_noop() {
    let store = seeded_store();
    assert!(!store.activate_agent("INL-PC-404"));
    assert_eq!(store.active_agent().unwrap().agent_id, "INL-PC-001-abc123");
}

#[test]
fn test_add_ticket_prepends_with_generated_fields() {
    let store = seeded_store();
    let ticket = store.add_ticket(vpn_ticket());

    assert!(ticket.ticket_id.starts_with("TKT-"));
    assert_eq!(ticket.issue, "VPN is down");
    assert_eq!(ticket.category, "Network");
    assert_eq!(ticket.status, TicketStatus::Unresolved);
    assert_eq!(ticket.priority, Some(TicketPriority::High));

    let tickets = store.tickets();
    assert_eq!(tickets.len(), 5);
    assert_eq!(tickets[0], ticket);
    assert_eq!(tickets[1].ticket_id, "TKT-2024-001");
}

#[test]
fn test_add_ticket_accepts_empty_issue() {
    let store = seeded_store();
    let ticket = store.add_ticket(NewTicket::new("", "General"));
    assert_eq!(ticket.issue, "");
    assert_eq!(store.tickets().len(), 5);
}

#[test]
fn test_added_tickets_newest_first() {
    let store = seeded_store();
    let seed_ids: HashSet<String> = store.tickets().into_iter().map(|t| t.ticket_id).collect();

    let added: Vec<_> = (0..20)
        .map(|i| store.add_ticket(NewTicket::new(format!("issue {}", i), "General")))
        .collect();

    let tickets = store.tickets();
    for (i, ticket) in added.iter().rev().enumerate() {
        assert_eq!(&tickets[i], ticket);
        assert!(!seed_ids.contains(&ticket.ticket_id));
    }
    for pair in tickets[..20].windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[test]
fn test_same_millisecond_tickets_get_distinct_ids() {
    // Two back-to-back calls land in the same millisecond on any modern machine
    let store = seeded_store();
    let first = store.add_ticket(vpn_ticket());
    let second = store.add_ticket(vpn_ticket());

    assert_ne!(first.ticket_id, second.ticket_id);
    assert_eq!(store.tickets().len(), 6);
    assert_eq!(store.ticket(&first.ticket_id).unwrap(), first);
    assert_eq!(store.ticket(&second.ticket_id).unwrap(), second);
}

#[test]
fn test_uuid_strategy_ticket_ids() {
    let mut config = HelpdeskConfig::default();
    config.ids.strategy = IdStrategy::Uuid;
    let store = AppStore::from_seed(&SeedData::builtin().unwrap(), &config);

    let ticket = store.add_ticket(vpn_ticket());
    assert!(ticket.ticket_id.starts_with("TKT-"));
    assert_eq!(ticket.ticket_id.len(), "TKT-".len() + 36);
}

#[test]
fn test_update_known_ticket_status() {
    let store = seeded_store();
    let before = store.tickets();

    assert!(store.update_ticket_status("TKT-2024-001", TicketStatus::Resolved));

    let after = store.tickets();
    assert_eq!(after.len(), before.len());
    assert_eq!(after[0].status, TicketStatus::Resolved);

    let mut expected = before[0].clone();
    expected.status = TicketStatus::Resolved;
    assert_eq!(after[0], expected);
    assert_eq!(&after[1..], &before[1..]);
}

#[test]
fn test_update_unknown_ticket_is_noop() {
    let store = seeded_store();
    let before = store.tickets();

    assert!(!store.update_ticket_status("TKT-0000-404", TicketStatus::Resolved));
    assert_eq!(store.tickets(), before);
}

#[test]
fn test_add_chat_message_creates_then_appends() {
    let store = seeded_store();
    assert!(store.chat_messages("INL-PC-003-ghi789").is_empty());

    let first = store.add_chat_message(
        "INL-PC-003-ghi789",
        NewChatMessage::new("INL-PC-003-ghi789", ChatRole::User, "Hello?")
            .with_status(MessageStatus::Sent),
    );
    assert!(first.msg_id.starts_with("msg-"));
    assert_eq!(store.chat_messages("INL-PC-003-ghi789"), vec![first.clone()]);

    let second = store.add_chat_message(
        "INL-PC-003-ghi789",
        NewChatMessage::new("INL-PC-003-ghi789", ChatRole::It, "Hi Bob"),
    );
    let bucket = store.chat_messages("INL-PC-003-ghi789");
    assert_eq!(bucket, vec![first, second]);
}

#[test]
fn test_add_chat_message_keeps_seeded_history() {
    let store = seeded_store();
    store.add_chat_message(
        "INL-PC-001-abc123",
        NewChatMessage::new("INL-PC-001-abc123", ChatRole::It, "Try reconnecting"),
    );

    let bucket = store.chat_messages("INL-PC-001-abc123");
    assert_eq!(bucket.len(), 4);
    assert_eq!(bucket[0].msg_id, "msg-001");
    assert_eq!(bucket[3].message, "Try reconnecting");
    // Other buckets untouched
    assert_eq!(store.chat_messages("INL-PC-002-def456").len(), 1);
}

#[test]
fn test_selected_chat_agent_independent_of_active_agent() {
    let store = seeded_store();
    store.set_selected_chat_agent(Some("INL-PC-004-jkl012".to_string()));

    assert_eq!(store.selected_chat_agent().as_deref(), Some("INL-PC-004-jkl012"));
    assert_eq!(store.active_agent().unwrap().agent_id, "INL-PC-001-abc123");

    store.set_active_agent(None);
    assert_eq!(store.selected_chat_agent().as_deref(), Some("INL-PC-004-jkl012"));

    store.set_selected_chat_agent(None);
    assert!(store.selected_chat_agent().is_none());
}

#[test]
fn test_search_tickets() {
    let store = seeded_store();

    let vpn = store.search_tickets(&TicketFilter {
        query: "vpn".to_string(),
        status: None,
    });
    assert_eq!(vpn.len(), 1);
    assert_eq!(vpn[0].ticket_id, "TKT-2024-001");

    let by_id = store.search_tickets(&TicketFilter {
        query: "tkt-2024-00".to_string(),
        status: Some(TicketStatus::Unresolved),
    });
    let ids: Vec<&str> = by_id.iter().map(|t| t.ticket_id.as_str()).collect();
    assert_eq!(ids, vec!["TKT-2024-001", "TKT-2024-004"]);

    assert_eq!(store.search_tickets(&TicketFilter::default()).len(), 4);
}

#[test]
fn test_ticket_stats() {
    let store = seeded_store();
    assert_eq!(
        store.ticket_stats(),
        TicketStats {
            total: 4,
            unresolved: 2,
            pending: 1,
            resolved: 1
        }
    );

    store.update_ticket_status("TKT-2024-004", TicketStatus::Pending);
    let stats = store.ticket_stats();
    assert_eq!(stats.unresolved, 1);
    assert_eq!(stats.pending, 2);
}

#[test]
fn test_agent_queries() {
    let store = seeded_store();
    assert_eq!(store.online_agents().len(), 3);
    assert_eq!(store.offline_agents()[0].hostname, "WORKSTATION-03");
    assert_eq!(store.search_agents("finance").len(), 1);
    assert_eq!(store.search_agents("inl-pc").len(), 4);
    assert!(store.agent("INL-PC-002-def456").is_some());
    assert!(store.agent("missing").is_none());
}

#[test]
fn test_escalate_chat_creates_categorized_ticket() {
    let store = seeded_store();
    let ticket = store.escalate_chat("INL-PC-001-abc123").unwrap();

    assert_eq!(ticket.category, "Network");
    assert_eq!(ticket.status, TicketStatus::Unresolved);
    assert_eq!(ticket.username.as_deref(), Some("JohnDoe"));
    assert!(ticket.issue.contains("VPN connection"));
    assert!(ticket.issue.contains("Connection timed out"));
    // IT replies are not part of the issue
    assert!(!ticket.issue.contains("happy to help"));
    assert_eq!(store.tickets()[0], ticket);
}

#[test]
fn test_escalate_empty_chat_is_noop() {
    let store = seeded_store();
    assert!(store.escalate_chat("INL-PC-003-ghi789").is_none());
    assert_eq!(store.tickets().len(), 4);
}

#[test]
fn test_snapshot_reflects_mutations() {
    let store = seeded_store();
    store.set_active_agent(Some(admin_agent()));
    store.set_selected_chat_agent(Some("INL-PC-002-def456".to_string()));
    store.add_ticket(vpn_ticket());

    let snapshot = store.snapshot();
    assert_eq!(snapshot.agents.len(), 4);
    assert_eq!(snapshot.tickets.len(), 5);
    assert_eq!(snapshot.chat_messages.len(), 2);
    assert!(snapshot.is_admin);
    assert_eq!(snapshot.active_agent.unwrap().username, "admin");
    assert_eq!(snapshot.selected_chat_agent.as_deref(), Some("INL-PC-002-def456"));
}

#[test]
fn test_mutations_broadcast_events() {
    let store = seeded_store();
    let mut rx = store.subscribe();

    let ticket = store.add_ticket(vpn_ticket());
    store.update_ticket_status(&ticket.ticket_id, TicketStatus::Pending);
    store.update_ticket_status("missing", TicketStatus::Pending);
    store.set_active_agent(Some(admin_agent()));

    assert_eq!(rx.try_recv().unwrap(), StoreEvent::TicketAdded { ticket: ticket.clone() });
    assert_eq!(
        rx.try_recv().unwrap(),
        StoreEvent::TicketStatusChanged {
            ticket_id: ticket.ticket_id.clone(),
            old_status: TicketStatus::Unresolved,
            new_status: TicketStatus::Pending,
        }
    );
    // Unknown id produced no event
    assert_eq!(
        rx.try_recv().unwrap(),
        StoreEvent::ActiveAgentChanged {
            agent_id: Some("INL-PC-999-admin".to_string()),
            is_admin: true,
        }
    );
    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[test]
fn test_concurrent_chat_appends() {
    let store = Arc::new(seeded_store());
    let mut handles = vec![];

    // Spawn 10 threads appending to the same fresh bucket
    for i in 0..10 {
        let store_clone = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            store_clone.add_chat_message(
                "shared-agent",
                NewChatMessage::new("shared-agent", ChatRole::User, format!("m{}", i)),
            )
        }));
    }

    let msg_ids: HashSet<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().msg_id)
        .collect();

    assert_eq!(store.chat_messages("shared-agent").len(), 10);
    assert_eq!(msg_ids.len(), 10);
}

#[test]
fn test_concurrent_add_ticket_keeps_newest_first() {
    let store = Arc::new(seeded_store());
    let mut handles = vec![];

    for i in 0..8 {
        let store_clone = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for j in 0..200 {
                store_clone.add_ticket(NewTicket::new(format!("issue {}-{}", i, j), "Other"));
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let stamps: Vec<i64> = store
        .tickets()
        .iter()
        .filter(|t| !t.ticket_id.starts_with("TKT-2024-"))
        .map(|t| t.ticket_id["TKT-".len()..].parse().unwrap())
        .collect();
    assert_eq!(stamps.len(), 1600);
    assert!(stamps.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn test_concurrent_chat_appends_keep_id_order() {
    let store = Arc::new(seeded_store());
    let mut handles = vec![];

    for _ in 0..8 {
        let store_clone = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for j in 0..100 {
                store_clone.add_chat_message(
                    "shared-agent",
                    NewChatMessage::new("shared-agent", ChatRole::User, format!("m{}", j)),
                );
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let stamps: Vec<i64> = store
        .chat_messages("shared-agent")
        .iter()
        .map(|m| m.msg_id["msg-".len()..].parse().unwrap())
        .collect();
    assert_eq!(stamps.len(), 800);
    assert!(stamps.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_snapshot_admin_flag_matches_active_agent() {
    let store = Arc::new(seeded_store());
    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            let regular = store.agents()[0].clone();
            for i in 0..2000 {
                let agent = if i % 2 == 0 { admin_agent() } else { regular.clone() };
                store.set_active_agent(Some(agent));
            }
        })
    };

    for _ in 0..2000 {
        let snapshot = store.snapshot();
        let username = snapshot.active_agent.as_ref().map(|a| a.username.as_str());
        assert_eq!(snapshot.is_admin, username == Some("admin"));
    }
    writer.join().unwrap();
}
