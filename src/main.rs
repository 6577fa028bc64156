use anyhow::{Context, Result};
use helpdesk::config::{load_config, HelpdeskConfig};
use helpdesk::{context, Session};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk=info".into()),
        )
        .init();

    info!("Helpdesk starting...");

    let config = match std::env::var("HELPDESK_CONFIG") {
        Ok(path) => load_config(&PathBuf::from(path))?,
        Err(_) => HelpdeskConfig::default(),
    }
    .apply_env();

    let session = Session::from_config(config).context("Failed to build session")?;

    let summary = context::provide(session.store().clone(), || -> Result<String> {
        let store = context::current()?;
        let stats = store.ticket_stats();
        Ok(format!(
            "{} agents ({} online), {} tickets ({} unresolved)",
            store.agents().len(),
            store.online_agents().len(),
            stats.total,
            stats.unresolved
        ))
    })?;
    info!(summary = %summary, "Session ready");

    let snapshot = session.store().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    session.shutdown();
    Ok(())
}
