use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::gemini::{self, GeminiError};
use crate::AppState;

use super::models::{AskRequest, AskResponse, ErrorResponse, HealthResponse};

pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.question.trim().is_empty() {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "Question cannot be empty",
        ));
    }

    let answer = gemini::answer_question(
        &payload.question,
        payload.context.as_deref(),
        &state.client,
        &state.gemini,
    )
    .await
    .map_err(translate)?;

    Ok(Json(AskResponse { answer }))
}

/// Maps caller failures to HTTP responses; first match wins.
fn translate(err: GeminiError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        GeminiError::UpstreamStatus(429) => {
            warn!("Gemini rate limit hit");
            error_body(
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Try again in a few minutes or check your Gemini API quota.",
            )
        }
        GeminiError::UpstreamStatus(status) => {
            warn!(status, "Gemini returned an error status");
            error_body(StatusCode::BAD_GATEWAY, format!("Gemini API error: {status}"))
        }
        err @ (GeminiError::EmptyQuestion
        | GeminiError::NoCandidates
        | GeminiError::EmptyParts) => error_body(StatusCode::BAD_REQUEST, err.to_string()),
        err => {
            warn!(error = %err, "ask request failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn error_body(
    status: StatusCode,
    detail: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        environment: state.environment.clone(),
        service: "ask-service".to_string(),
    })
}

pub async fn not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "route not found").into_response()
}
