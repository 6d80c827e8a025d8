use common::{
    mocks::{MockLlmClient, MockScoreApi},
    test_utils::create_test_app,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use transaction_guardian::{
    Error,
    client::{
        DemoScenario, FormState, GENERIC_ERROR, GuardianClient, Layout, RiskResult, ScoreApi,
        ScoreForm, TransactionInput, render,
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method},
};

mod common;

fn sample_result() -> RiskResult {
    serde_json::from_value(json!({
        "risk_score": 5,
        "reason": "routine subscription",
        "signals": [],
        "model": "openai/gpt-oss-20b",
        "backend": "groq",
        "timestamp": "2026-10-19T10:00:00.000Z"
    }))
    .unwrap()
}

#[tokio::test]
async fn test_guardian_client_posts_wrapped_transaction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "transaction": { "amount": "24.99", "merchant": "Streaming Service Subscription" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "risk_score": 5,
            "reason": "routine subscription",
            "signals": [],
            "model": "openai/gpt-oss-20b",
            "backend": "groq",
            "timestamp": "2026-10-19T10:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GuardianClient::new(server.uri());
    let result = client
        .score(&TransactionInput::new("24.99", "Streaming Service Subscription"))
        .await
        .unwrap();

    assert_eq!(result, sample_result());
}

#[tokio::test]
async fn test_guardian_client_reports_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Missing transaction payload"
        })))
        .mount(&server)
        .await;

    let client = GuardianClient::new(server.uri());
    let err = client
        .score(&TransactionInput::new("1", "x"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Upstream { status: 400, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_submit_success_stores_result() {
    let api = MockScoreApi::succeeding(sample_result());
    let mut form = ScoreForm::new(TransactionInput::new("24.99", "Streaming Service"));

    let state = form.submit(&api).await.unwrap().clone();

    assert_eq!(state, FormState::Scored(sample_result()));
    assert!(form.can_submit());
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn test_submit_failure_stores_generic_message() {
    let api = MockScoreApi::failing(500);
    let mut form = ScoreForm::new(TransactionInput::new("24.99", "Streaming Service"));

    form.submit(&api).await.unwrap();

    assert_eq!(
        *form.current_state(),
        FormState::Failed(GENERIC_ERROR.to_string())
    );
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_resubmit_replaces_previous_error() {
    let mut form = ScoreForm::new(TransactionInput::new("24.99", "Streaming Service"));

    form.submit(&MockScoreApi::failing(502)).await.unwrap();
    assert!(matches!(form.current_state(), FormState::Failed(_)));

    form.submit(&MockScoreApi::succeeding(sample_result()))
        .await
        .unwrap();
    assert!(matches!(form.current_state(), FormState::Scored(_)));
}

#[tokio::test]
async fn test_blank_input_never_reaches_api() {
    let api = MockScoreApi::succeeding(sample_result());
    let mut form = ScoreForm::new(TransactionInput::new("", "Streaming Service"));

    let err = form.submit(&api).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(*form.current_state(), FormState::Idle);
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn test_form_against_running_proxy() {
    let llm = Arc::new(MockLlmClient::replying("not json at all"));
    let app = create_test_app(llm);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = GuardianClient::new(format!("http://{addr}"));
    let mut form = ScoreForm::new(TransactionInput::new("15.00", "Corner Store"));
    form.submit(&client).await.unwrap();

    let FormState::Scored(result) = form.current_state() else {
        panic!("expected scored state, got {:?}", form.current_state());
    };
    assert_eq!(result.risk_score, 50.0);
    assert!(result.signals.is_empty());
    assert_eq!(result.backend.as_deref(), Some("groq"));
    assert_eq!(result.extra["raw"], json!("not json at all"));

    let rendered = render(&form, Layout::Stacked);
    assert!(rendered.contains("Medium Risk"));
    assert!(rendered.contains("Model returned invalid JSON"));
}

#[tokio::test]
async fn test_loosely_typed_model_fields_still_render() {
    let llm = Arc::new(MockLlmClient::replying(
        r#"{"risk_score": 84, "reason": null, "explanation": "wire to new payee", "signals": [{"name": "velocity"}, "new payee"]}"#,
    ));
    let app = create_test_app(llm);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = GuardianClient::new(format!("http://{addr}"));
    let mut form = ScoreForm::new(TransactionInput::demo(DemoScenario::High));
    form.submit(&client).await.unwrap();

    let FormState::Scored(result) = form.current_state() else {
        panic!("expected scored state, got {:?}", form.current_state());
    };
    assert_eq!(result.reason, None);
    assert_eq!(
        result.signals,
        vec![r#"{"name":"velocity"}"#.to_string(), "new payee".to_string()]
    );

    let rendered = render(&form, Layout::Split);
    assert!(rendered.contains("High Risk"));
    assert!(rendered.contains("wire to new payee"));

    form.reset().unwrap();
    assert_eq!(*form.current_state(), FormState::Idle);
    assert_eq!(form.input, TransactionInput::default());
}
