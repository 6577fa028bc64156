use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

use crate::config::IdStrategy;

pub const TICKET_PREFIX: &str = "TKT";
pub const MESSAGE_PREFIX: &str = "msg";
pub const REQUEST_PREFIX: &str = "req";

/// Generates "PREFIX-<suffix>" record identifiers.
///
/// With `IdStrategy::Timestamp` the suffix is the creation time in epoch
/// milliseconds. The value is strictly increasing per generator: if the clock
/// has not moved past the last issued value, `last + 1` is used instead, so two
/// records created in the same millisecond never share an id.
pub struct IdGenerator {
    strategy: IdStrategy,
    last_millis: AtomicI64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            last_millis: AtomicI64::new(0),
        }
    }

    pub fn next(&self, prefix: &str) -> String {
        match self.strategy {
            IdStrategy::Timestamp => format!("{}-{}", prefix, self.next_millis()),
            IdStrategy::Uuid => format!("{}-{}", prefix, Uuid::now_v7()),
        }
    }

    fn next_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let prev = self
            .last_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(prev + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_timestamp_ids_have_prefix_and_millis() {
        let ids = IdGenerator::new(IdStrategy::Timestamp);
        let before = Utc::now().timestamp_millis();
        let id = ids.next(TICKET_PREFIX);

        let millis: i64 = id.strip_prefix("TKT-").unwrap().parse().unwrap();
        assert!(millis >= before);
    }

    #[test]
    fn test_timestamp_ids_unique_within_same_millisecond() {
        let ids = IdGenerator::new(IdStrategy::Timestamp);
        let generated: Vec<String> = (0..1000).map(|_| ids.next(MESSAGE_PREFIX)).collect();
        let unique: HashSet<&String> = generated.iter().collect();
        assert_eq!(unique.len(), generated.len());
    }

    #[test]
    fn test_timestamp_ids_strictly_increase() {
        let ids = IdGenerator::new(IdStrategy::Timestamp);
        let a: i64 = ids.next("x").strip_prefix("x-").unwrap().parse().unwrap();
        let b: i64 = ids.next("x").strip_prefix("x-").unwrap().parse().unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_uuid_ids() {
        let ids = IdGenerator::new(IdStrategy::Uuid);
        let id = ids.next(REQUEST_PREFIX);
        let uuid = Uuid::parse_str(id.strip_prefix("req-").unwrap()).unwrap();
        assert_eq!(uuid.get_version_num(), 7);
        assert_ne!(ids.next(REQUEST_PREFIX), id);
    }
}
