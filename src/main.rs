//! Prime Gateway - Main entry point
//!
//! Loads configuration from the environment and serves the gateway router.

use anyhow::Result;
use prime_gateway::{
    build_router,
    core::{init_metrics, init_tracing, AppConfig},
    services::build_http_client,
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;

fn main() -> Result<()> {
    // Load .env file if present (before reading any environment variables)
    dotenvy::dotenv().ok();

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(threads) = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
    {
        builder.worker_threads(threads);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    init_tracing();
    init_metrics();

    let config = AppConfig::from_env()?;
    for var in config.missing_credentials() {
        tracing::warn!("{} is not set; the endpoints that need it will fail", var);
    }

    let http_client = build_http_client(&config)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = Arc::new(AppState::new(config, http_client));
    let app = build_router(state);

    tracing::info!("Starting Prime Gateway on {}", addr);
    tracing::info!("Chat: /api/llama, /api/deepseek, /api/gpt-oss");
    tracing::info!("Tools: /api/search, /api/image, /api/domain");
    tracing::info!("Metrics endpoint: /metrics");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
