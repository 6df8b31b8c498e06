//! HTTP 접근 로그 middleware.
//!
//! 요청마다 응답이 만들어진 뒤 한 줄의 구조화 로그를 남깁니다.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// 접근 로그의 tracing target.
pub const ACCESS_LOG_TARGET: &str = "catalog_api::access";

/// 요청 처리 결과를 기록하는 미들웨어 레이어.
///
/// 기록 필드:
/// - `method`: HTTP 메서드
/// - `path`: 요청 경로 (쿼리 제외)
/// - `status`: 응답 상태 코드
/// - `latency_ms`: 처리 시간 (밀리초)
pub async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        target: ACCESS_LOG_TARGET,
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms,
        "request completed"
    );

    response
}
