use std::error::Error;

use tracing_subscriber::EnvFilter;

use ask_service::{build_app, config::AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ask_service=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = AppConfig::from_env()?;
    let state = AppState::from_config(&cfg);
    let app = build_app(state);

    ask_service::run_server(app, cfg.port).await?;

    Ok(())
}
