use crate::error::ConfigError;
use std::env;
use std::time::Duration;

/// Default queue-length threshold that triggers an immediate flush.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default maximum time a record may wait in the queue before an automatic
/// flush is attempted.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(5000);

/// Configuration for a [`crate::LoggerClient`] instance.
///
/// Set once at construction and immutable thereafter. `endpoint` and
/// `api_key` are required; a client built without them disables itself
/// permanently instead of failing.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the log ingestion endpoint.
    pub endpoint: String,
    /// Credential sent as the `x-api-key` header on every delivery.
    pub api_key: String,
    /// Source tag attached to every record produced by this instance.
    pub source: String,
    /// Whether the client accepts and ships records.
    pub enabled: bool,
    /// Queue length that triggers an immediate flush.
    pub batch_size: usize,
    /// Maximum time a record waits in the queue before an automatic flush.
    pub flush_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            source: "unknown".to_string(),
            enabled: true,
            batch_size: DEFAULT_BATCH_SIZE,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }
}

impl Config {
    /// Create configuration from `RELAYLOG_*` environment variables.
    ///
    /// Unset optional variables fall back to their defaults; unparseable
    /// numeric values are ignored the same way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = env::var("RELAYLOG_ENDPOINT").unwrap_or_default();
        let api_key = env::var("RELAYLOG_API_KEY").unwrap_or_default();
        let source = env::var("RELAYLOG_SOURCE").unwrap_or_else(|_| "unknown".to_string());
        let enabled = env::var("RELAYLOG_ENABLED")
            .map(|val| val.to_lowercase() != "false")
            .unwrap_or(true);
        let batch_size = env::var("RELAYLOG_BATCH_SIZE")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_BATCH_SIZE);
        let flush_interval = env::var("RELAYLOG_FLUSH_INTERVAL_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_FLUSH_INTERVAL);

        let config = Self {
            endpoint,
            api_key,
            source,
            enabled,
            batch_size,
            flush_interval,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        if self.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "batch size must be greater than 0".to_string(),
            ));
        }

        if self.flush_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "flush interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
