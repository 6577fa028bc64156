use serde::{Deserialize, Serialize};

/// A monitored device and the user session running on it.
///
/// Agents are seeded at startup and never mutated afterwards; `online` and
/// `metrics` are point-in-time values from the seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier (e.g., "INL-PC-001-abc123")
    pub agent_id: String,
    pub hostname: String,
    pub username: String,
    pub ip_address: String,
    pub os: String,
    pub online: bool,
    pub metrics: AgentMetrics,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,

    /// Human-readable "last seen" label (e.g., "2 min ago")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_human: Option<String>,

    /// Only present for offline agents (e.g., "2 hr 15 min")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offline_duration_display: Option<String>,

    /// Current session length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_duration: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_human: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_app_today: Option<TopApp>,
}

impl Agent {
    /// Worst level across cpu, ram and disk usage.
    pub fn health_level(&self) -> MetricLevel {
        let m = &self.metrics;
        [m.cpu_usage, m.ram_usage, m.disk_usage]
            .into_iter()
            .map(MetricLevel::from_usage)
            .max()
            .unwrap_or(MetricLevel::Normal)
    }

    /// Case-insensitive substring match on hostname, username or agent id.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.hostname.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
            || self.agent_id.to_lowercase().contains(&query)
    }
}

/// Resource usage percentages (0-100)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetrics {
    pub cpu_usage: u8,
    pub ram_usage: u8,
    pub disk_usage: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
}

/// Most used application today
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopApp {
    pub name: String,
    pub seconds: u64,
}

/// Severity bucket for a usage percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricLevel {
    Normal,
    Warning,
    Critical,
}

impl MetricLevel {
    /// Above 80 is critical, above 60 is a warning.
    pub fn from_usage(usage: u8) -> Self {
        if usage > 80 {
            MetricLevel::Critical
        } else if usage > 60 {
            MetricLevel::Warning
        } else {
            MetricLevel::Normal
        }
    }
}
