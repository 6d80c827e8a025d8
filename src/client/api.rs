use super::types::{RiskResult, ScoreRequestBody, TransactionInput};
use crate::{Error, Result};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait ScoreApi: Send + Sync {
    async fn score(&self, input: &TransactionInput) -> Result<RiskResult>;
}

/// HTTP client for the scoring proxy.
pub struct GuardianClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GuardianClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScoreApi for GuardianClient {
    async fn score(&self, input: &TransactionInput) -> Result<RiskResult> {
        debug!("Submitting transaction to {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&ScoreRequestBody { transaction: input })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream(status.as_u16(), body));
        }

        Ok(response.json::<RiskResult>().await?)
    }
}
