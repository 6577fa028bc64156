pub mod env;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::seed::SeedData;

/// Complete helpdesk configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub ids: IdConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl HelpdeskConfig {
    /// Seed data from `[seed] path`, or the builtin fixture when unset.
    pub fn load_seed(&self) -> Result<SeedData> {
        match &self.seed.path {
            Some(path) => SeedData::load(path),
            None => SeedData::builtin(),
        }
    }
}

/// Administrator allow-list
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_usernames")]
    pub usernames: Vec<String>,
}

fn default_admin_usernames() -> Vec<String> {
    vec!["admin".to_string(), "administrator".to_string()]
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            usernames: default_admin_usernames(),
        }
    }
}

/// Delays and outcomes of simulated responses
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Delay before the automatic IT reply in support chat
    #[serde(default = "default_it_reply_delay")]
    pub it_reply_delay_ms: u64,
    /// Delay before the chatbot answers
    #[serde(default = "default_chatbot_reply_delay")]
    pub chatbot_reply_delay_ms: u64,
    /// Time a simulated service restart takes
    #[serde(default = "default_service_restart_delay")]
    pub service_restart_delay_ms: u64,
    /// Probability (0.0-1.0) that a simulated restart succeeds
    #[serde(default = "default_restart_success_rate")]
    pub restart_success_rate: f64,
}

fn default_it_reply_delay() -> u64 {
    1000
}

fn default_chatbot_reply_delay() -> u64 {
    1500
}

fn default_service_restart_delay() -> u64 {
    2000
}

fn default_restart_success_rate() -> f64 {
    0.8
}

impl SimulationConfig {
    pub fn it_reply_delay(&self) -> Duration {
        Duration::from_millis(self.it_reply_delay_ms)
    }

    pub fn chatbot_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chatbot_reply_delay_ms)
    }

    pub fn service_restart_delay(&self) -> Duration {
        Duration::from_millis(self.service_restart_delay_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            it_reply_delay_ms: default_it_reply_delay(),
            chatbot_reply_delay_ms: default_chatbot_reply_delay(),
            service_restart_delay_ms: default_service_restart_delay(),
            restart_success_rate: default_restart_success_rate(),
        }
    }
}

/// How record identifiers are generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// "PREFIX-<millis>", bumped by one when the clock has not advanced
    #[default]
    Timestamp,
    /// "PREFIX-<uuid v7>"
    Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// JSON fixture replacing the builtin seed
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl HelpdeskConfig {
    /// Reject values the simulation cannot run with (TOML accepts `nan`/`inf`)
    pub fn validate(&self) -> Result<()> {
        let rate = self.simulation.restart_success_rate;
        anyhow::ensure!(
            (0.0..=1.0).contains(&rate),
            "simulation.restart_success_rate must be within 0.0..=1.0, got {}",
            rate
        );
        Ok(())
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &Path) -> Result<HelpdeskConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: HelpdeskConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
