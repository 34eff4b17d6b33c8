mod cli;

use clap::Parser;
use tracing::{error, info, Instrument};

use marketplace_admin::app_system::{setup_tracing, AppConfig};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    info!(environment = %config.environment, "Starting marketplace admin");

    let span = tracing::info_span!("command");
    let result = cli::execute(cli, config).instrument(span).await;
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}
