use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application install request awaiting admin approval
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppRequest {
    /// "req-" prefixed identifier
    pub id: String,
    pub app_name: String,
    pub username: String,
    pub hostname: String,
    pub status: AppRequestStatus,
    pub requested_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// Installable application from the catalog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogApp {
    pub name: String,
    pub category: String,
}

/// OS service that can be restarted from the troubleshooter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub display_name: String,
    pub service_name: String,
}
