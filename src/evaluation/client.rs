use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Returns the label the service predicted for `text`.
    async fn predict(&self, text: &str, true_sentiment: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct PredictionBody {
    sentiment: String,
}

/// HTTP client for a running prediction service.
pub struct ApiClient {
    http: reqwest::Client,
    predict_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            predict_url: format!("{}/predict", base_url.trim_end_matches('/')),
        }
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

#[async_trait]
impl PredictionClient for ApiClient {
    async fn predict(&self, text: &str, true_sentiment: &str) -> Result<String> {
        let payload = json!({
            "text": text,
            "true_sentiment": true_sentiment,
        });

        let response = self
            .http
            .post(&self.predict_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::remote_call(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::remote_call(format!("status code {}", status.as_u16())));
        }

        let body: PredictionBody = response
            .json()
            .await
            .map_err(|e| Error::remote_call(format!("invalid response body: {}", e)))?;

        debug!("Service predicted '{}'", body.sentiment);
        Ok(body.sentiment)
    }
}
