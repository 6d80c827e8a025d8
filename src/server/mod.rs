pub mod handlers;
pub mod types;

use crate::{Result, config::Config, llm::OpenAiClient, scoring::RiskScorer};
use axum::{
    Router,
    http::{Method, header},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Every path and method lands on the scoring handler; the CORS layer sits
/// outermost so error and panic responses carry the headers too.
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::score)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub async fn run(config: Config) -> Result<()> {
    let llm = OpenAiClient::new(config.llm.clone())?;
    info!(
        "Scoring with model {} via {} ({})",
        llm.model(),
        config.llm.provider,
        llm.endpoint()
    );

    let scorer = RiskScorer::new(Arc::new(llm), &config.llm);
    let app = router(AppState::new(scorer));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
