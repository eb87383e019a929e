use anyhow::Result;
use cfdns::{config::Config, reconcile::Reconciler};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let config = Config::load(&config_file)?;

    let reconciler = Reconciler::new(config.client());
    let outcomes = reconciler.apply(&config.records).await?;
    info!("Reconciled {} record(s)", outcomes.len());
    Ok(())
}
