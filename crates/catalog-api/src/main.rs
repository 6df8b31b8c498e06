//! 카탈로그 API 서버 바이너리.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use catalog_api::{
    build_router, connect_pool, repository::schema, serve, shutdown_signal, AppState, TokenConfig,
};
use catalog_core::{init_logging, AppConfig, LogConfig};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("failed to load configuration")?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!("Starting Catalog API server...");

    let pool = connect_pool(&config.database)
        .await
        .context("failed to connect to database")?;
    schema::migrate(&pool)
        .await
        .context("failed to prepare database schema")?;

    let token = TokenConfig::new(config.auth.jwt_secret, config.auth.jwt_expires_in);
    info!(ttl_secs = token.ttl_secs(), "Token issuer configured");

    let state = Arc::new(AppState::with_sqlite(pool, token));
    let app = build_router(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    serve(
        listener,
        app,
        Duration::from_secs(config.server.shutdown_grace_secs),
        shutdown,
    )
    .await?;

    Ok(())
}
