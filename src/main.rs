use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use eastsyria::config::AppConfig;
use eastsyria::database::SqliteStore;
use eastsyria::services::mail_service::HttpMailRelay;
use eastsyria::state::AppState;
use eastsyria::web;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // 2. Database (schema is created when missing)
    info!("Connecting to database: {}", config.database_url);
    let store = Arc::new(SqliteStore::connect(&config.database_url).await?);

    // 3. Services and routes
    let mail = Arc::new(HttpMailRelay::new(&config.mail));
    let state = AppState::new(store, mail);
    let app = web::router(state);

    // 4. Serve, falling back to the next port when the configured one is taken
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback: SocketAddr =
                format!("{}:{}", config.host, config.port.saturating_add(1)).parse()?;
            warn!(
                "⚠️  Could not bind {}: {}. Trying fallback {}",
                addr, e, fallback
            );
            tokio::net::TcpListener::bind(fallback).await?
        }
    };

    info!("🚀 Server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
