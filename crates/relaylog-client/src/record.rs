//! Log record model shared by the queue and the delivery path.
//!
//! A [`LogRecord`] is immutable once enqueued: the client stamps the
//! timestamp and source at enqueue time and never rewrites a record
//! afterwards, even across failed-delivery requeues. The `data` payload is
//! opaque to the engine; it is carried as semi-structured JSON and serialized
//! as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Open key/value payload attached to a record. May be empty.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Severity of a log record.
///
/// The wire names are the lowercase variant names; the ingestion API accepts
/// exactly this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Wire name of the level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!(
                "Invalid log level '{other}'. Must be one of: error, warn, info, debug"
            )),
        }
    }
}

/// A single log record as delivered to the ingestion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    /// Instant the record was created, stamped by the client.
    pub timestamp: DateTime<Utc>,
    /// Severity level.
    pub level: LogLevel,
    /// Log message text.
    pub message: String,
    /// Source tag of the producing client instance.
    pub source: String,
    /// Open payload; serialized opaquely, never interpreted.
    pub data: Fields,
}

impl LogRecord {
    /// Builds a record stamped with the current time.
    #[must_use]
    pub fn new(level: LogLevel, message: String, source: String, data: Fields) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message,
            source,
            data,
        }
    }
}

/// Input accepted by [`crate::LoggerClient::error`].
///
/// Either a plain message (via `From<&str>` / `From<String>`) or an
/// error value (via [`ErrorDetail::from_error`]), in which case the error's
/// type name and source chain travel along and are merged into the record's
/// `data` payload.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    pub name: Option<String>,
    pub stack: Option<String>,
}

impl ErrorDetail {
    /// Captures an error value: the message from its `Display` output, the
    /// name from its concrete type, and the stack from its `source()` chain.
    #[must_use]
    pub fn from_error<E: Error>(err: &E) -> Self {
        let mut frames = Vec::new();
        let mut cause: Option<&dyn Error> = err.source();
        while let Some(inner) = cause {
            frames.push(inner.to_string());
            cause = inner.source();
        }

        let name = std::any::type_name::<E>()
            .rsplit("::")
            .next()
            .unwrap_or("Error")
            .to_string();

        Self {
            message: err.to_string(),
            name: Some(name),
            stack: if frames.is_empty() {
                None
            } else {
                Some(frames.join("\n"))
            },
        }
    }
}

impl From<&str> for ErrorDetail {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
            name: None,
            stack: None,
        }
    }
}

impl From<String> for ErrorDetail {
    fn from(message: String) -> Self {
        Self {
            message,
            name: None,
            stack: None,
        }
    }
}
