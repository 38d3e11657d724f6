/// Errors produced while validating client configuration.
///
/// Construction never propagates these to the caller: a client built from an
/// invalid configuration logs the error and disables itself. They are exposed
/// so applications can pre-check configuration with [`crate::Config::validate`]
/// or [`crate::Config::from_env`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("endpoint is required")]
    MissingEndpoint,

    #[error("api key is required")]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure to deliver a single log record to the ingestion endpoint.
///
/// Never leaves the crate: `flush()` converts delivery failures into the
/// bounded requeue side effect and diagnostic output.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DeliveryError {
    #[error("failed to send log record: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ingestion endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        assert_eq!(ConfigError::MissingEndpoint.to_string(), "endpoint is required");
        assert_eq!(ConfigError::MissingApiKey.to_string(), "api key is required");
        assert_eq!(
            ConfigError::Invalid("batch size must be greater than 0".to_string()).to_string(),
            "invalid configuration: batch size must be greater than 0"
        );
    }

    #[test]
    fn test_delivery_error_status_display() {
        let error = DeliveryError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().contains("500"));
    }
}
