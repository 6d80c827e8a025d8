use super::types::ErrorResponse;
use crate::{
    Error,
    scoring::{RequestError, RiskScorer, ScoreRequest},
};
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::{any::Any, sync::Arc};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<RiskScorer>,
}

impl AppState {
    pub fn new(scorer: RiskScorer) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }
}

pub type Rejection = (StatusCode, Json<ErrorResponse>);

/// Single scoring endpoint. Preflight requests are answered by the CORS
/// layer before reaching this handler.
pub async fn score(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<Value>, Rejection> {
    let request_id = Uuid::new_v4();

    if method != Method::POST {
        warn!(%request_id, %method, "Rejected request with unsupported method");
        return Err(reject(
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::new("POST only"),
        ));
    }

    let request = ScoreRequest::from_json(&body).map_err(|e| {
        warn!(%request_id, "Rejected scoring request: {}", e);
        invalid_request(e)
    })?;

    info!(%request_id, "Received scoring request");

    match state.scorer.score(&request.transaction).await {
        Ok(assessment) => {
            info!(%request_id, "Successfully scored transaction");
            Ok(Json(assessment.into_json()))
        }
        Err(e) => {
            error!(%request_id, "Failed to score transaction: {}", e);
            Err(scoring_failure(e))
        }
    }
}

fn reject(status: StatusCode, body: ErrorResponse) -> Rejection {
    (status, Json(body))
}

fn invalid_request(err: RequestError) -> Rejection {
    let body = match err {
        RequestError::InvalidJson(detail) => {
            ErrorResponse::new("Invalid JSON body").with_detail(detail)
        }
        RequestError::MissingTransaction => ErrorResponse::new("Missing transaction payload"),
    };
    reject(StatusCode::BAD_REQUEST, body)
}

fn scoring_failure(err: Error) -> Rejection {
    let body = match err {
        Error::Upstream { status, body } => ErrorResponse::new("Upstream API error")
            .with_status(status)
            .with_detail(body),
        other => ErrorResponse::new("Internal error").with_detail(other.to_string()),
    };
    reject(StatusCode::INTERNAL_SERVER_ERROR, body)
}

/// Converts a panic inside the service into a JSON 500.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    error!("Request handler panicked: {}", detail);

    reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new("Internal error").with_detail(detail),
    )
    .into_response()
}
