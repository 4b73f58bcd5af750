// Snapshot acquisition
use async_trait::async_trait;
use serde_json::Value;

use crate::config::TUNING;
use crate::domain::Snapshot;
use crate::error::FetchError;

/// Where snapshots come from. The engine only talks to this trait, so tests
/// script cycles with an in-memory source and the binary plugs in HTTP.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    fn signature(&self) -> &'static str;

    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError>;
}

/// Polls the producer's JSON endpoint over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn at_default_endpoint() -> Self {
        Self::new(TUNING.refresh.endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SnapshotSource for HttpFetcher {
    fn signature(&self) -> &'static str {
        "HTTP endpoint"
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();

        if !status.is_success() {
            // The producer reports failures as JSON bodies with an `error`
            // field; fall back to the status line when the body is not that.
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| status.to_string());
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
