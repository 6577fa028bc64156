// Simulated restarts of OS services, with a newest-first history

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::model::Service;
use crate::sim::SessionTasks;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestartStatus {
    Success,
    /// Restart attempted but may need elevated privileges
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RestartRecord {
    /// Service name as listed (e.g., "Printer Service")
    pub service: String,
    pub status: RestartStatus,
    pub time: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestartError {
    UnknownService(String),
}

impl fmt::Display for RestartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartError::UnknownService(name) => write!(f, "unknown service '{}'", name),
        }
    }
}

impl std::error::Error for RestartError {}

/// Restarts services from a fixed list. Clones share the same history.
#[derive(Clone)]
pub struct Troubleshooter {
    services: Arc<Vec<Service>>,
    history: Arc<Mutex<Vec<RestartRecord>>>,
    success_rate: f64,
    delay: Duration,
}

impl Troubleshooter {
    pub fn new(services: Vec<Service>, config: &SimulationConfig) -> Self {
        // NaN survives clamp and would panic in gen_bool
        let rate = config.restart_success_rate;
        let success_rate = if rate.is_nan() {
            warn!("restart_success_rate is NaN, using default");
            SimulationConfig::default().restart_success_rate
        } else {
            rate.clamp(0.0, 1.0)
        };

        Self {
            services: Arc::new(services),
            history: Arc::new(Mutex::new(Vec::new())),
            success_rate,
            delay: config.service_restart_delay(),
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Newest-first
    pub fn history(&self) -> Vec<RestartRecord> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Restart `name`, resolving after the configured delay.
    pub async fn restart(&self, name: &str) -> Result<RestartRecord, RestartError> {
        let service = self
            .service(name)
            .cloned()
            .ok_or_else(|| RestartError::UnknownService(name.to_string()))?;

        tokio::time::sleep(self.delay).await;
        Ok(self.record_outcome(&service))
    }

    /// Start a restart owned by `tasks`; the outcome lands in the history.
    pub fn schedule_restart(&self, tasks: &SessionTasks, name: &str) -> Result<(), RestartError> {
        let service = self
            .service(name)
            .cloned()
            .ok_or_else(|| RestartError::UnknownService(name.to_string()))?;

        let troubleshooter = self.clone();
        tasks.schedule(self.delay, async move {
            troubleshooter.record_outcome(&service);
        });
        Ok(())
    }

    fn record_outcome(&self, service: &Service) -> RestartRecord {
        let success = rand::thread_rng().gen_bool(self.success_rate);
        let record = if success {
            info!(service = %service.service_name, "Service restarted");
            RestartRecord {
                service: service.name.clone(),
                status: RestartStatus::Success,
                time: Utc::now(),
                message: format!("{} restarted successfully", service.display_name),
            }
        } else {
            warn!(service = %service.service_name, "Service restart may require admin privileges");
            RestartRecord {
                service: service.name.clone(),
                status: RestartStatus::Warning,
                time: Utc::now(),
                message: format!(
                    "{} restart attempted - may require admin privileges",
                    service.display_name
                ),
            }
        };

        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, record.clone());
        record
    }
}
