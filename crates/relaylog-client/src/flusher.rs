//! Outbound delivery of individual log records.
//!
//! Each record is shipped as its own authenticated JSON POST; records are
//! never combined into a single payload. A delivery succeeds or fails as a
//! unit: any 2xx acknowledgment is success, everything else (including
//! transport errors) marks the record failed for this attempt. No per-request
//! timeout is imposed; a hung request only delays the settlement of its own
//! flush attempt.

use crate::error::DeliveryError;
use crate::record::LogRecord;

/// Header carrying the configured credential on every delivery.
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone)]
pub(crate) struct Flusher {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl Flusher {
    pub(crate) fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    /// Delivers one record to the ingestion endpoint.
    pub(crate) async fn send(&self, record: &LogRecord) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Fields, LogLevel};

    fn test_record() -> LogRecord {
        LogRecord::new(
            LogLevel::Info,
            "hello".to_string(),
            "test-app".to_string(),
            Fields::new(),
        )
    }

    #[tokio::test]
    async fn test_send_success_on_2xx() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/log")
            .match_header("x-api-key", "test-key")
            .match_header("content-type", "application/json")
            .with_status(201)
            .create_async()
            .await;

        let flusher = Flusher::new(format!("{}/api/log", server.url()), "test-key".to_string());
        let result = flusher.send(&test_record()).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_serializes_record_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/log")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "level": "info",
                "message": "hello",
                "source": "test-app",
                "data": {},
            })))
            .with_status(200)
            .create_async()
            .await;

        let flusher = Flusher::new(format!("{}/api/log", server.url()), "test-key".to_string());
        flusher.send(&test_record()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_non_success_status_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/log")
            .with_status(401)
            .create_async()
            .await;

        let flusher = Flusher::new(format!("{}/api/log", server.url()), "bad-key".to_string());
        let result = flusher.send(&test_record()).await;

        assert!(matches!(result, Err(DeliveryError::Status(status)) if status.as_u16() == 401));
    }

    #[tokio::test]
    async fn test_send_unreachable_endpoint_is_transport_failure() {
        // Port 9 (discard) is assumed closed
        let flusher = Flusher::new(
            "http://127.0.0.1:9/api/log".to_string(),
            "test-key".to_string(),
        );
        let result = flusher.send(&test_record()).await;

        assert!(matches!(result, Err(DeliveryError::Transport(_))));
    }
}
