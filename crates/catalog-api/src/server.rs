//! HTTP 서버 구동 및 종료 처리.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use catalog_core::DatabaseConfig;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::auth::AuthGate;
use crate::routes::create_api_router;
use crate::state::AppState;

/// 서버 에러.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// 유예 시간 안에 진행 중인 요청이 끝나지 않음
    #[error("graceful shutdown did not finish within {0:?}")]
    ShutdownTimeout(Duration),
}

/// 애플리케이션 라우터 생성.
pub fn build_router(state: Arc<AppState>) -> Router {
    let gate = AuthGate::new(state.token.clone());
    create_api_router(&gate).with_state(state)
}

/// 데이터베이스 연결 풀 생성.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool connected");
    Ok(pool)
}

/// 종료 토큰이 취소될 때까지 요청을 처리합니다.
///
/// 취소 후에는 새 연결을 받지 않고, 진행 중인 요청을 최대 `grace` 동안 기다립니다.
/// 유예 시간을 넘기면 [`ServerError::ShutdownTimeout`]을 반환합니다.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    grace: Duration,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    info!(%addr, "API server listening");

    let signal = shutdown.clone();
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move { signal.cancelled().await });
    let mut server_task = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut server_task => {
            // 종료 요청 전에 서버가 멈춤
            result??;
            return Ok(());
        }
        _ = shutdown.cancelled() => {}
    }

    info!(grace_secs = grace.as_secs_f64(), "Shutdown requested, draining in-flight requests");

    match tokio::time::timeout(grace, &mut server_task).await {
        Ok(result) => {
            result??;
            info!("Server stopped gracefully");
            Ok(())
        }
        Err(_) => {
            server_task.abort();
            error!(grace_secs = grace.as_secs_f64(), "Shutdown grace period exceeded");
            Err(ServerError::ShutdownTimeout(grace))
        }
    }
}

/// 종료 시그널 대기.
///
/// SIGINT, SIGTERM, SIGHUP (non-unix에서는 Ctrl+C) 수신 시 종료 토큰을 취소합니다.
/// 시그널 핸들러 설치에 실패한 시그널은 로그만 남기고 무시합니다.
pub async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let unix_signal = |kind: tokio::signal::unix::SignalKind, name: &'static str| async move {
        match tokio::signal::unix::signal(kind) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(signal = name, error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = unix_signal(tokio::signal::unix::SignalKind::terminate(), "SIGTERM");
    #[cfg(unix)]
    let hangup = unix_signal(tokio::signal::unix::SignalKind::hangup(), "SIGHUP");

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    #[cfg(not(unix))]
    let hangup = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
        _ = hangup => {
            warn!("Received SIGHUP, initiating graceful shutdown...");
        }
        _ = shutdown.cancelled() => {}
    }

    shutdown.cancel();
}
