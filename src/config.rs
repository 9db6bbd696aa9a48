use std::env;

use thiserror::Error;

pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Immutable process configuration, read from the environment once at startup.
pub struct AppConfig {
    pub port: u16,
    pub environment: String,
    pub gemini_api_key: String,
    pub gemini_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Error)]
#[error("GEMINI_API_KEY is not set; refusing to serve requests")]
pub struct MissingApiKey;

impl AppConfig {
    /// Reads configuration from the environment. The API key is the only
    /// required value; its absence is a startup failure, not a per-request one.
    pub fn from_env() -> Result<Self, MissingApiKey> {
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(MissingApiKey)?;

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8000);

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let gemini_url = env::var("GEMINI_URL").unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string());

        let timeout_ms = env::var("ASK_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(30_000);

        Ok(Self {
            port,
            environment,
            gemini_api_key,
            gemini_url,
            timeout_ms,
        })
    }
}
