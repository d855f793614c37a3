//! # Roster API Main Entry Point
//!
//! Loads configuration, prepares the database and either serves the API or
//! only synchronizes the schema.

use anyhow::Context;
use clap::{Parser, Subcommand};
use roster::{config::ConfigLoader, db, schema, server::run_server, telemetry};
use tracing::info;

/// Command line options for the Roster API.
#[derive(Debug, Parser)]
#[command(about = "User and company records service", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Synchronize the schema, then serve the API (default)
    Serve,
    /// Synchronize the schema and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;
    telemetry::init_tracing(&config).context("failed to initialize telemetry")?;

    info!(profile = %config.profile, "configuration loaded");
    if let Ok(redacted) = config.redacted_json() {
        tracing::debug!(config = %redacted, "effective configuration");
    }

    let db = db::init_pool(&config).await?;

    let reports = schema::sync_all(&db)
        .await
        .context("schema synchronization failed")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            for report in &reports {
                info!(
                    entity = report.entity,
                    table = %report.table,
                    outcome = %report.outcome,
                    "migration result"
                );
            }
            Ok(())
        }
        Command::Serve => run_server(config, db).await,
    }
}
