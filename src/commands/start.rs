use anyhow::Result;
use aws_cost_calculator::{config, init_tracing, server};
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// Loads configuration, applies the CLI port override, then serves until
/// SIGTERM/SIGINT.
pub async fn execute(config_path: &Path, port: Option<u16>) -> Result<()> {
    let mut cfg = config::load_config(config_path)?;
    if let Some(port) = port {
        cfg.server.port = port;
        config::validate_config(&cfg)?;
    }

    init_tracing(&cfg.server.log_level, cfg.server.log_format == "json");

    println!("{}", "Starting AWS cost calculator...".green());
    info!(
        config = %config_path.display(),
        mode = ?cfg.pricing.mode,
        "Configuration loaded"
    );

    server::start_server(cfg).await?;

    Ok(())
}
