//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "AFLOAT_CONFIG";

pub const PORT_ENV: &str = "PORT";
pub const PORT_CALL_API_KEY_ENV: &str = "PORT_CALL_API_KEY";
pub const BERTH_CALL_API_KEY_ENV: &str = "BERTH_CALL_API_KEY";
pub const BASE_URL_ENV: &str = "MARINE_TRAFFIC_BASE_URL";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the process configuration.
///
/// Order: defaults, then the TOML file named by `AFLOAT_CONFIG` (if any),
/// then environment variables. A `.env` file in the working directory is
/// loaded into the environment first.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = ?path, "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    let config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.is_empty() => load_config(Path::new(&path))?,
        _ => GatewayConfig::default(),
    };

    let config = apply_env_overrides(config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto a configuration.
///
/// `lookup` abstracts the environment so the overlay can be tested without
/// mutating process state. Empty values are treated as unset.
pub fn apply_env_overrides<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = get(PORT_ENV) {
        config.listener.port = port.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Env {
            name: PORT_ENV,
            reason: e.to_string(),
        })?;
    }

    if let Some(key) = get(PORT_CALL_API_KEY_ENV) {
        config.credentials.port_call_api_key = Some(key);
    }
    if let Some(key) = get(BERTH_CALL_API_KEY_ENV) {
        config.credentials.berth_call_api_key = Some(key);
    }
    if let Some(url) = get(BASE_URL_ENV) {
        config.upstream.base_url = Some(url);
    }

    if let Some(level) = get(LOG_LEVEL_ENV) {
        config.observability.log_level = level;
    }
    if let Some(format) = get(LOG_FORMAT_ENV) {
        config.observability.log_format = format
            .parse()
            .map_err(|reason| ConfigError::Env { name: LOG_FORMAT_ENV, reason })?;
    }

    Ok(config)
}
