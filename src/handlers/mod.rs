pub mod alerts;
pub mod archive;
pub mod auth;
pub mod community;
pub mod drafts;
pub mod export;
pub mod health;
pub mod mood;
pub mod records;
pub mod reports;
pub mod surveys;

use crate::config::Config;

/// Fixed artificial delay for mock operations. The delay carries no retry or
/// cancellation semantics; it only simulates network latency for clients.
pub async fn simulate_latency(config: &Config) {
    if config.mock_latency_ms > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(config.mock_latency_ms)).await;
    }
}
