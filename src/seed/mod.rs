//! Static seed data loaded into the store at startup.
//!
//! The builtin fixture is embedded at compile time. A replacement fixture with
//! the same JSON layout can be loaded from disk (see `[seed] path` in config).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::model::{Agent, AppRequest, CatalogApp, ChatMessage, HealthReport, Service, Ticket};

const BUILTIN_SEED: &str = include_str!("builtin.json");

/// Every seeded collection. Missing sections default to empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub agents: Vec<Agent>,
    /// Newest-first
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    /// agent_id -> messages in chronological order
    #[serde(default)]
    pub chat_messages: BTreeMap<String, Vec<ChatMessage>>,
    #[serde(default)]
    pub health_report: Option<HealthReport>,
    #[serde(default)]
    pub app_requests: Vec<AppRequest>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub available_apps: Vec<CatalogApp>,
}

impl SeedData {
    /// Parse the embedded fixture.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_SEED).context("Failed to parse builtin seed data")
    }

    /// Load a fixture from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        Ok(seed)
    }
}
