pub mod api;
pub mod config;
pub mod gemini;

use std::sync::Arc;

use axum::Router;
use reqwest::Client;

use config::AppConfig;
use gemini::GeminiConfig;

/// Read-only state shared by every request: configuration plus one reused
/// outbound HTTP client.
pub struct AppState {
    pub environment: String,
    pub gemini: GeminiConfig,
    pub client: Client,
}

impl AppState {
    pub fn from_config(cfg: &AppConfig) -> Arc<Self> {
        Arc::new(Self {
            environment: cfg.environment.clone(),
            gemini: GeminiConfig::new(&cfg.gemini_api_key, &cfg.gemini_url, cfg.timeout_ms),
            client: Client::new(),
        })
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "listening");
    axum::serve(listener, app).await
}
