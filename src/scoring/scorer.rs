use super::{DEFAULT_SYSTEM_PROMPT, RiskAssessment, Transaction, build_prompt, parse_model_output};
use crate::{
    Result,
    config::LlmConfig,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns a transaction into a risk assessment with a single upstream call.
pub struct RiskScorer {
    llm: Arc<dyn LlmClient>,
    model: String,
    backend: String,
    temperature: f32,
    system_prompt: String,
}

impl RiskScorer {
    pub fn new(llm: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            llm,
            model: config.model.clone(),
            backend: config.provider.clone(),
            temperature: config.temperature,
            system_prompt: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub async fn score(&self, transaction: &Transaction) -> Result<RiskAssessment> {
        let prompt = build_prompt(transaction)?;
        debug!("Scoring prompt is {} bytes", prompt.len());

        let request = ChatCompletionRequest {
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(prompt),
            ],
            temperature: Some(self.temperature),
        };

        let response = self.llm.create_chat_completion(request).await?;
        let outcome = parse_model_output(response.first_content()?);

        info!(
            risk_score = outcome.risk_score(),
            fallback = outcome.is_fallback(),
            "Transaction scored"
        );

        Ok(RiskAssessment {
            outcome,
            model: self.model.clone(),
            backend: self.backend.clone(),
            timestamp: Utc::now(),
        })
    }
}
