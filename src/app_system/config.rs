use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_SESSION_FILE: &str = ".marketplace-admin/session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not a valid URL ({value:?}): {message}")]
    InvalidUrl { key: &'static str, value: String, message: String },

    #[error("{key} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env`, loaded by `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Public key of the payment gateway. Carried for completeness; the
    /// admin tools never charge cards.
    pub paystack_public_key: Option<String>,
    pub environment: String,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let first = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
        };

        let api_base_url = first(&["API_BASE_URL", "REACT_APP_API_BASE_URL"]).unwrap_or_else(|| {
            info!("API_BASE_URL not set, using default: {DEFAULT_API_BASE_URL}");
            DEFAULT_API_BASE_URL.to_string()
        });
        reqwest::Url::parse(&api_base_url).map_err(|e| ConfigError::InvalidUrl {
            key: "API_BASE_URL",
            value: api_base_url.clone(),
            message: e.to_string(),
        })?;

        let http_timeout = match first(&["HTTP_TIMEOUT_SECS"]) {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!("Invalid HTTP_TIMEOUT_SECS value: {raw}");
                    return Err(ConfigError::InvalidTimeout { key: "HTTP_TIMEOUT_SECS", value: raw });
                }
            },
        };

        let config = Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            paystack_public_key: first(&["PAYSTACK_PUBLIC_KEY", "REACT_APP_PAYSTACK_PUBLIC_KEY"]),
            environment: first(&["APP_ENV", "REACT_APP_ENV", "NODE_ENV"]).unwrap_or_else(|| "development".to_string()),
            session_file: first(&["SESSION_FILE"])
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
            http_timeout,
        };
        debug!(api_base_url = %config.api_base_url, environment = %config.environment, "Configuration loaded");
        Ok(config)
    }
}
