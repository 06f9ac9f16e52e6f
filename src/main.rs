use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use portfolio_api::config::AppConfig;
use portfolio_api::{app, database, AppState};

#[tokio::main]
async fn main() {
    // Load .env first so every config lookup below sees it
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("FATAL: {err}");
            std::process::exit(1);
        }
    };

    tracing::info!("starting portfolio API in {:?} mode", config.environment);
    for origin in &config.allowed_origins {
        tracing::info!("CORS: allowing origin {origin}");
    }

    let pool = match database::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("FATAL: database connection failed: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = database::bootstrap(&pool).await {
        tracing::error!("FATAL: schema bootstrap failed: {err}");
        std::process::exit(1);
    }

    let port = config.port;
    let state = AppState {
        pool,
        config: Arc::new(config),
    };
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("FATAL: failed to bind {bind_addr}: {err}");
            std::process::exit(1);
        }
    };

    tracing::info!("Server running on http://{bind_addr}");
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {err}");
        std::process::exit(1);
    }
}
