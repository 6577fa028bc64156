use tracing::warn;

use super::{HelpdeskConfig, IdStrategy};

/// Comma-separated admin usernames, replaces the configured allow-list
pub const ENV_ADMIN_USERS: &str = "HELPDESK_ADMIN_USERS";
/// "timestamp" or "uuid"
pub const ENV_ID_STRATEGY: &str = "HELPDESK_ID_STRATEGY";
/// Float in 0.0..=1.0
pub const ENV_RESTART_SUCCESS_RATE: &str = "HELPDESK_RESTART_SUCCESS_RATE";

impl HelpdeskConfig {
    /// Apply environment overrides on top of file/default values.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_env(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_ADMIN_USERS) {
            self.admin.usernames = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = lookup(ENV_ID_STRATEGY) {
            match v.trim().to_ascii_lowercase().as_str() {
                "timestamp" => self.ids.strategy = IdStrategy::Timestamp,
                "uuid" => self.ids.strategy = IdStrategy::Uuid,
                other => warn!(value = %other, "Ignoring unknown {}", ENV_ID_STRATEGY),
            }
        }
        if let Some(v) = lookup(ENV_RESTART_SUCCESS_RATE) {
            match v.trim().parse::<f64>() {
                Ok(rate) if (0.0..=1.0).contains(&rate) => {
                    self.simulation.restart_success_rate = rate
                }
                _ => warn!(value = %v, "Ignoring invalid {}", ENV_RESTART_SUCCESS_RATE),
            }
        }
    }
}
