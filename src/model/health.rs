use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MetricLevel;

/// Health report for the active device
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub metrics: HealthMetrics,
    pub updates: UpdateStatus,
    #[serde(default)]
    pub critical_event_logs: Vec<EventLog>,
    #[serde(default)]
    pub alerts: Vec<String>,
}

impl HealthReport {
    /// Levels for (cpu, ram, disk)
    pub fn levels(&self) -> (MetricLevel, MetricLevel, MetricLevel) {
        (
            MetricLevel::from_usage(self.metrics.cpu_usage),
            MetricLevel::from_usage(self.metrics.ram_usage),
            MetricLevel::from_usage(self.metrics.disk_usage),
        )
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty() || !self.critical_event_logs.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub cpu_usage: u8,
    pub ram_usage: u8,
    pub disk_usage: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub pending_updates: bool,
    pub reboot_required: bool,
    #[serde(default)]
    pub update_details: Vec<HotFix>,
}

/// Installed OS hotfix (field names follow the Windows inventory format)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HotFix {
    #[serde(rename = "HotFixID")]
    pub hotfix_id: String,
    #[serde(rename = "InstalledOn")]
    pub installed_on: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    #[serde(rename = "EventID", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(rename = "Source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
