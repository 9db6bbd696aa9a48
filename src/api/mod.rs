mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use handlers::{ask, health, not_found};
pub use models::{AskRequest, AskResponse, ErrorResponse, HealthResponse};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/healthz", get(health))
        .fallback(not_found)
        .with_state(state)
}
