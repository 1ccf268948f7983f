use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

mod config;
mod gemini;
mod models;
mod prompt;

use config::Config;
use gemini::GeminiClient;
use models::{AssistantRequest, AssistantResponse};

const GENERIC_FAILURE: &str = "Failed to generate content";

#[derive(Clone)]
struct AppState {
    gemini: Arc<GeminiClient>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let gemini = GeminiClient::new(config.gemini)?;
    if !gemini.is_configured() {
        tracing::warn!("GEMINI_API_URL is not set; assistant requests will fail");
    }

    let app = app(AppState {
        gemini: Arc::new(gemini),
    });

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/assistant/generate", post(generate_endpoint))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn generate_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<AssistantRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected assistant request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(AssistantResponse::failed(rejection.body_text())),
            )
                .into_response();
        }
    };

    tracing::info!(
        prompt_len = req.prompt.as_deref().map_or(0, str::len),
        has_blog_data = req.blog_data.is_some(),
        "assistant request"
    );

    let instruction = prompt::build_instruction(req.prompt.as_deref(), req.blog_data.as_ref());

    match state.gemini.generate(&instruction).await {
        Ok(text) => (StatusCode::OK, Json(AssistantResponse::ok(text))).into_response(),
        Err(e) => {
            tracing::error!(
                error = %e,
                upstream_status = e.upstream_status().map(|s| s.as_u16()),
                "assistant generation failed"
            );
            let mut message = e.to_string();
            if message.trim().is_empty() {
                message = GENERIC_FAILURE.to_string();
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AssistantResponse::failed(message)),
            )
                .into_response()
        }
    }
}
