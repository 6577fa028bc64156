use super::*;
use crate::config::HelpdeskConfig;
use crate::model::ChatRole;
use crate::seed::SeedData;

fn seeded_store() -> Arc<AppStore> {
    Arc::new(AppStore::from_seed(
        &SeedData::builtin().unwrap(),
        &HelpdeskConfig::default(),
    ))
}

const AGENT: &str = "INL-PC-002-def456";

#[tokio::test(start_paused = true)]
async fn test_it_reply_fires_after_delay() {
    let store = seeded_store();
    let tasks = SessionTasks::new();

    schedule_it_reply(&tasks, store.clone(), AGENT.to_string(), Duration::from_millis(1000));
    assert_eq!(tasks.pending(), 1);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(store.chat_messages(AGENT).len(), 1);

    tokio::time::sleep(Duration::from_millis(600)).await;
    let bucket = store.chat_messages(AGENT);
    assert_eq!(bucket.len(), 2);
    assert_eq!(bucket[1].role, ChatRole::It);
    assert_eq!(bucket[1].message, IT_AUTO_REPLY);
    assert_eq!(bucket[1].status, Some(MessageStatus::Delivered));
    assert_eq!(tasks.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_all_prevents_reply() {
    let store = seeded_store();
    let tasks = SessionTasks::new();

    schedule_it_reply(&tasks, store.clone(), AGENT.to_string(), Duration::from_millis(1000));
    tasks.cancel_all();
    assert_eq!(tasks.pending(), 0);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(store.chat_messages(AGENT).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_tasks_cancels_pending() {
    let store = seeded_store();
    {
        let tasks = SessionTasks::new();
        schedule_it_reply(&tasks, store.clone(), AGENT.to_string(), Duration::from_millis(1000));
    }

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(store.chat_messages(AGENT).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_tasks_fire_in_delay_order() {
    let store = seeded_store();
    let tasks = SessionTasks::new();

    schedule_it_reply(&tasks, store.clone(), "late".to_string(), Duration::from_millis(300));
    schedule_it_reply(&tasks, store.clone(), "early".to_string(), Duration::from_millis(100));
    assert_eq!(tasks.pending(), 2);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(store.chat_messages("early").len(), 1);
    assert!(store.chat_messages("late").is_empty());
    assert_eq!(tasks.pending(), 1);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(store.chat_messages("late").len(), 1);
}
