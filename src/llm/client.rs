use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_openai::types as openai_types;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// Request bodies are built with the `async-openai` builders; the call itself
/// goes through `reqwest` so that a non-2xx reply keeps its status code and
/// body text for the caller.
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Ok(Self {
            http: builder.build()?,
            endpoint,
            api_key: config.api_key,
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<openai_types::CreateChatCompletionRequest> {
        let mut messages = Vec::with_capacity(request.messages.len());
        for msg in &request.messages {
            messages.push(msg.to_openai_message()?);
        }

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        Ok(request_builder.build()?)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            "Creating chat completion with {} messages",
            request.messages.len()
        );

        let body = self.build_request(request)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| Error::config(format!("API key is not a valid header value: {}", e)))?;

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, bearer)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Upstream completion failed with HTTP {}", status.as_u16());
            return Err(Error::upstream(status.as_u16(), detail));
        }

        let text = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| Error::llm(format!("Malformed completion response: {}", e)))?;

        debug!(
            "Received chat completion response with {} choices",
            completion.choices.len()
        );

        Ok(completion)
    }
}
