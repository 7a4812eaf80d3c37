//! HTTP surface: the ask endpoint and a health probe.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::pipeline::SupportService;
use crate::pipeline::query::NOT_FOUND_ANSWER;

/// Shared state injected into the handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SupportService>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub status: &'static str,
    pub answer: String,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ask-ai", post(ask))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "success" }))
}

/// Pipeline failures never surface as HTTP errors: the envelope stays a
/// success and the answer degrades to the fixed fallback.
async fn ask(State(state): State<AppState>, Json(request): Json<AskRequest>) -> Response {
    if request.content.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "status": "error", "message": "content is required" })),
        )
            .into_response();
    }

    let answer = match state.service.answer(&request.content).await {
        Ok(answer) => answer,
        Err(err) => {
            error!(error = %err, "answer pipeline failed");
            NOT_FOUND_ANSWER.to_string()
        }
    };

    Json(AskResponse {
        status: "success",
        answer,
    })
    .into_response()
}
