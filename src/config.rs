use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub pricing: PricingConfig,
    pub session: SessionConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

/// Which pricing backend to run with. Decided once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Live API when credentials work, static table otherwise
    #[default]
    Auto,
    /// Always use the built-in price table
    Static,
    /// Always use the live API; never fall back
    Live,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    pub mode: BackendMode,

    /// Best-effort JSON mirror of the price table (not authoritative)
    pub cache_file: Option<String>,

    /// In auto mode, use the static table when the live API probe fails
    pub fallback_to_static: bool,

    pub live: LiveApiConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Auto,
            cache_file: Some(default_cache_file()),
            fallback_to_static: true,
            live: LiveApiConfig::default(),
        }
    }
}

/// AWS Price List Query API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LiveApiConfig {
    pub endpoint: String,
    /// Signing region (the Price List API lives in us-east-1)
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for LiveApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.pricing.us-east-1.amazonaws.com".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            timeout_seconds: 30,
        }
    }
}

/// Static AWS credentials used to sign live pricing requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl LiveApiConfig {
    /// Credentials, if both halves of the key pair are present and non-empty
    pub fn credentials(&self) -> Option<AwsCredentials> {
        let access_key_id = self.access_key_id.as_deref().filter(|k| !k.is_empty())?;
        let secret_access_key = self
            .secret_access_key
            .as_deref()
            .filter(|k| !k.is_empty())?;

        Some(AwsCredentials {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: self.session_token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Fill unset credentials from the standard AWS environment variables
    fn apply_env_credentials(&mut self) {
        if self.access_key_id.is_none() {
            self.access_key_id = std::env::var("AWS_ACCESS_KEY_ID").ok();
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok();
        }
        if self.session_token.is_none() {
            self.session_token = std::env::var("AWS_SESSION_TOKEN").ok();
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Add the `Secure` attribute to the session cookie
    pub secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session_id".to_string(),
            secure: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "/metrics".to_string(),
        }
    }
}

fn default_cache_file() -> String {
    "pricing_cache/scraped_pricing.json".to_string()
}

/// Load configuration from an optional TOML file plus `AWS_CALC__*` overrides
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("AWS_CALC").separator("__"))
        .build()?;

    let mut cfg: Config = settings.try_deserialize()?;
    cfg.pricing.live.apply_env_credentials();
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.trim().is_empty() {
        anyhow::bail!("Server host cannot be empty");
    }

    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be greater than 0");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}': expected 'text' or 'json'", other),
    }

    if cfg.pricing.live.timeout_seconds == 0 {
        anyhow::bail!("Live pricing timeout must be greater than 0");
    }

    if url::Url::parse(&cfg.pricing.live.endpoint).is_err() {
        anyhow::bail!(
            "Live pricing endpoint is not a valid URL: {}",
            cfg.pricing.live.endpoint
        );
    }

    if cfg.pricing.mode == BackendMode::Live && cfg.pricing.live.credentials().is_none() {
        anyhow::bail!("Pricing mode 'live' requires AWS credentials");
    }

    if cfg.session.cookie_name.trim().is_empty() {
        anyhow::bail!("Session cookie name cannot be empty");
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!("Metrics endpoint must start with '/'");
    }

    Ok(())
}
