//! Client SDK for the relaylog centralized logging stack.
//!
//! Applications embed [`LoggerClient`] to ship log records to the relaylog
//! ingestion API. Log calls are synchronous and fire-and-forget: records are
//! buffered in an in-memory queue and delivered in the background, so a
//! logging call can never block the caller on network I/O or surface a
//! delivery error to it.
//!
//! # Pipeline
//!
//! ```text
//!   info()/warn()/debug()/error()
//!            │
//!            v
//!     ┌─────────────┐
//!     │ RecordQueue │ (FIFO, atomic drain-and-swap)
//!     └──────┬──────┘
//!            │ batch size reached / flush timer / shutdown
//!            v
//!     ┌─────────────┐
//!     │   Flusher   │ (one JSON POST per record, concurrent)
//!     └──────┬──────┘
//!            │ any delivery failed
//!            v
//!     bounded requeue (≤ 2 × batch size) or drop
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use relaylog_client::{Config, LoggerClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = LoggerClient::new(Config {
//!         endpoint: "https://logs.example.com/api/log".to_string(),
//!         api_key: "secret".to_string(),
//!         source: "payments".to_string(),
//!         ..Default::default()
//!     });
//!
//!     client.info("payment accepted", None);
//!     client.flush().await;
//!     client.shutdown();
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod record;

mod flusher;
mod queue;

pub use client::LoggerClient;
pub use config::Config;
pub use error::ConfigError;
pub use record::{ErrorDetail, Fields, LogLevel, LogRecord};
