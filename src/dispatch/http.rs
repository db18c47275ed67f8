//! HTTP dispatch strategy
//!
//! Posts pull commands as JSON to the target node's control-plane API.

use std::time::Duration;

use async_trait::async_trait;

use super::command::StartPullCommand;
use super::Dispatch;

/// Fire-and-forget HTTP sender for pull commands
pub struct HttpDispatch {
    client: reqwest::Client,
}

impl HttpDispatch {
    /// Create a sender with a bounded per-request timeout
    ///
    /// The timeout keeps a dead node from pinning a task indefinitely; its
    /// value is a deployment choice, not a coordinator contract.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

impl Default for HttpDispatch {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[async_trait]
impl Dispatch for HttpDispatch {
    async fn send(&self, api_addr: &str, command: StartPullCommand) {
        let url = format!("http://{api_addr}/api/ctrl/start_pull");

        tracing::info!(
            url = %url,
            stream = %command.stream_name,
            source = %command.addr,
            "Sending cascade pull command"
        );

        match self.client.post(&url).json(&command).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!(url = %url, status = %resp.status(), "Pull command accepted");
            }
            Ok(resp) => {
                tracing::warn!(url = %url, status = %resp.status(), "Pull command rejected");
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Pull command failed");
            }
        }
    }
}
