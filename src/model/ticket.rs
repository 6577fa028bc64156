use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked support issue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// "TKT-" prefixed identifier
    pub ticket_id: String,

    /// Free text, stored as given
    pub issue: String,

    /// Category label (see `TicketCategory` for the builtin ones)
    pub category: String,

    pub status: TicketStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,

    /// Reporting user, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Creation time (ISO-8601 on the wire)
    pub created_at: DateTime<Utc>,
}

/// Ticket fields supplied by the caller; id and creation time are generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTicket {
    pub issue: String,
    pub category: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
}

impl NewTicket {
    /// Unresolved ticket with the given issue and category, no reporter.
    pub fn new(issue: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            category: category.into(),
            status: TicketStatus::Unresolved,
            priority: None,
            username: None,
            hostname: None,
        }
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_reporter(mut self, username: impl Into<String>, hostname: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.hostname = Some(hostname.into());
        self
    }

    pub(crate) fn into_ticket(self, ticket_id: String, created_at: DateTime<Utc>) -> Ticket {
        Ticket {
            ticket_id,
            issue: self.issue,
            category: self.category,
            status: self.status,
            priority: self.priority,
            username: self.username,
            hostname: self.hostname,
            created_at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Unresolved,
    Pending,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Unresolved => "unresolved",
            TicketStatus::Pending => "pending",
            TicketStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

/// Builtin ticket categories assigned by keyword classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketCategory {
    Network,
    Software,
    Hardware,
    Performance,
    General,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Network => "Network",
            TicketCategory::Software => "Software",
            TicketCategory::Hardware => "Hardware",
            TicketCategory::Performance => "Performance",
            TicketCategory::General => "General",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TicketCategory> for String {
    fn from(category: TicketCategory) -> Self {
        category.as_str().to_string()
    }
}
