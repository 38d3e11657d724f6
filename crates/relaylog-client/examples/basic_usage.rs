//! Basic usage of the relaylog client.
//!
//! Points at a local ingestion endpoint; run the relaylog API on port 3000
//! (or adjust the endpoint) to see records arrive.

use relaylog_client::{Config, ErrorDetail, Fields, LoggerClient};
use serde_json::json;
use std::time::Duration;

fn fields<const N: usize>(entries: [(&str, serde_json::Value); N]) -> Fields {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let client = LoggerClient::new(Config {
        endpoint: "http://localhost:3000/api/log".to_string(),
        api_key: "your-api-key".to_string(),
        source: "example-application".to_string(),
        batch_size: 5,
        flush_interval: Duration::from_secs(10),
        ..Default::default()
    });

    client.info("Application started", Some(fields([("version", json!("1.0.0"))])));
    client.debug(
        "Configuration loaded",
        Some(fields([(
            "config",
            json!({ "debug": true, "environment": "development" }),
        )])),
    );
    client.warn(
        "API rate limit approaching",
        Some(fields([
            ("endpoint", json!("/users")),
            ("remaining", json!(10)),
        ])),
    );

    // Log an error value; its type name and cause chain travel in `data`
    let err = std::io::Error::new(std::io::ErrorKind::Other, "Failed to process data");
    client.error(
        ErrorDetail::from_error(&err),
        Some(fields([
            ("user_id", json!("123")),
            ("operation", json!("data-processing")),
        ])),
    );

    println!("Pending logs: {}", client.queued_records().len());

    // Manually flush queued records to the server
    client.flush().await;
    println!("Logs have been sent to the server");

    client.shutdown();
}
