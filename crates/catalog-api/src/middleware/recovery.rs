//! 패닉 복구.
//!
//! 핸들러 패닉을 500 응답으로 바꿔 서버가 계속 요청을 처리하도록 합니다.
//! 패닉 메시지는 로그에만 남고 응답 본문에는 포함되지 않습니다.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::error::ApiErrorResponse;

/// `CatchPanicLayer::custom`에 전달되는 응답 생성기.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    error!(panic = %detail, "Handler panicked");

    let body = Json(ApiErrorResponse::new(
        "INTERNAL_ERROR",
        "Internal server error",
    ));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
