use anyhow::Result;
use aws_cost_calculator::config::{self, Config};
use aws_cost_calculator::logging::redact_optional;
use colored::Colorize;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Pricing Mode: {:?}", cfg.pricing.mode);
    println!("  Fallback To Static: {}", cfg.pricing.fallback_to_static);
    println!(
        "  Credentials: {}",
        if cfg.pricing.live.credentials().is_some() {
            "configured"
        } else {
            "none"
        }
    );

    Ok(())
}

/// Mask AWS credentials for safe display
fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    let live = &mut sanitized.pricing.live;

    live.access_key_id = redact_optional(live.access_key_id.as_deref());
    live.secret_access_key = redact_optional(live.secret_access_key.as_deref());
    live.session_token = redact_optional(live.session_token.as_deref());

    sanitized
}
