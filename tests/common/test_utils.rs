use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`
use transaction_guardian::{
    config::{Config, LlmConfig, LogsConfig, ServerConfig},
    llm::LlmClient,
    scoring::RiskScorer,
    server::{self, handlers::AppState},
};

pub const TEST_MODEL: &str = "openai/gpt-oss-20b";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        llm: LlmConfig {
            provider: "groq".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: "test-api-key".to_string(),
            model: TEST_MODEL.to_string(),
            temperature: 0.0,
            system_prompt: None,
            timeout_secs: None,
        },
    }
}

pub fn create_test_app(llm: Arc<dyn LlmClient>) -> Router {
    let config = create_test_config();
    server::router(AppState::new(RiskScorer::new(llm, &config.llm)))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn post_json(app: Router, body: &Value) -> TestResponse {
    send(app, Method::POST, "/", Body::from(body.to_string())).await
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"

llm:
  provider: "groq"
  base_url: "https://api.groq.com/openai/v1"
  api_key: "test-api-key"
  model: "openai/gpt-oss-20b"
  temperature: 0.2
  system_prompt: "You score card transactions."
  timeout_secs: 30
"#;
