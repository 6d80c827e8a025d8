use async_trait::async_trait;
use transaction_guardian::{
    Error, Result,
    client::{RiskResult, ScoreApi, TransactionInput},
    llm::{ChatCompletionRequest, ChatCompletionResponse, LlmClient},
};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockFailure {
    Upstream(u16, String),
    Llm(String),
    Panic(String),
}

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub failure: Option<MockFailure>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    /// Answers every call with one choice carrying `content`.
    pub fn replying(content: &str) -> Self {
        let mock = Self::new();
        for _ in 0..16 {
            mock.add_response(completion(content));
        }
        mock
    }

    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn add_response(&self, response: ChatCompletionResponse) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        match &self.failure {
            Some(MockFailure::Upstream(status, body)) => {
                return Err(Error::upstream(*status, body.clone()));
            }
            Some(MockFailure::Llm(message)) => return Err(Error::llm(message.clone())),
            Some(MockFailure::Panic(message)) => panic!("{}", message),
            None => {}
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

pub fn completion(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse::with_content(content)
}

/// Mock scoring API for driving the client form
pub struct MockScoreApi {
    pub result: std::result::Result<RiskResult, u16>,
    pub calls: Mutex<Vec<TransactionInput>>,
}

impl MockScoreApi {
    pub fn succeeding(result: RiskResult) -> Self {
        Self {
            result: Ok(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            result: Err(status),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ScoreApi for MockScoreApi {
    async fn score(&self, input: &TransactionInput) -> Result<RiskResult> {
        self.calls.lock().unwrap().push(input.clone());
        match &self.result {
            Ok(result) => Ok(result.clone()),
            Err(status) => Err(Error::upstream(*status, "mock failure")),
        }
    }
}
