//! Axum용 인증 게이트.
//!
//! 라우트는 배선 시점에 공개 체인 또는 보호 체인 중 하나에 고정됩니다.
//!
//! - 공개 체인: 접근 로그 → 패닉 복구 → 핸들러
//! - 보호 체인: 공개 체인 → 토큰 검증 → 인증 확인 → 핸들러
//!
//! 토큰 검증 단계는 결과를 요청 extension에 기록만 하고,
//! 인증 확인 단계가 실패한 결과를 401로 거절합니다.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::debug;

use super::jwt::{Claims, TokenConfig, TokenError};
use crate::error::ApiErrorResponse;
use crate::middleware::{access_log, panic_response};

/// 인증 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization token is required")]
    MissingToken,
    #[error("invalid Authorization header format")]
    InvalidAuthHeader,
    #[error("token has expired")]
    TokenExpired,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl AuthError {
    /// 응답 본문에 쓰이는 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::InvalidSignature => "INVALID_SIGNATURE",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::SignatureInvalid => AuthError::InvalidSignature,
            TokenError::Malformed | TokenError::Encoding => AuthError::InvalidToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorResponse::new(self.code(), self.to_string()));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// 토큰 검증 단계의 결과.
///
/// 인증 확인 단계가 이 값을 소비합니다.
#[derive(Debug, Clone)]
pub struct TokenVerification(pub Result<Claims, AuthError>);

/// 인증이 확인된 요청의 주체.
///
/// 보호 체인을 통과한 요청에서만 추출할 수 있습니다.
///
/// ```rust,ignore
/// async fn protected_handler(user: AuthenticatedUser) -> impl IntoResponse {
///     format!("Authenticated user: {}", user.subject)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// 토큰의 subject (사용자 ID)
    pub subject: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Authorization 헤더에서 Bearer 토큰 추출.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// 토큰 검증 미들웨어.
///
/// 요청을 거절하지 않고 [`TokenVerification`]만 기록합니다.
pub async fn verify_token(
    State(config): State<TokenConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = bearer_token(request.headers())
        .and_then(|token| config.verify(token).map_err(AuthError::from));

    request.extensions_mut().insert(TokenVerification(outcome));
    next.run(request).await
}

/// 인증 확인 미들웨어.
///
/// 검증 결과가 없거나 실패면 핸들러에 도달하기 전에 401을 반환합니다.
pub async fn authenticate(mut request: Request, next: Next) -> Result<Response, AuthError> {
    let TokenVerification(outcome) = request
        .extensions_mut()
        .remove::<TokenVerification>()
        .ok_or(AuthError::MissingToken)?;

    let claims = outcome.inspect_err(|e| {
        debug!(code = e.code(), "Rejected unauthenticated request");
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        subject: claims.sub,
    });
    Ok(next.run(request).await)
}

/// 공개/보호 체인 구성기.
///
/// 비밀 키와 유효 시간은 생성자로 전달된 [`TokenConfig`]에서만 읽습니다.
#[derive(Debug, Clone)]
pub struct AuthGate {
    token: TokenConfig,
}

impl AuthGate {
    pub fn new(token: TokenConfig) -> Self {
        Self { token }
    }

    /// 공개 체인으로 라우터 감싸기.
    pub fn public<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(access_log))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
    }

    /// 보호 체인으로 라우터 감싸기.
    pub fn private<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let router = router.route_layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn_with_state(
                    self.token.clone(),
                    verify_token,
                ))
                .layer(middleware::from_fn(authenticate)),
        );
        self.public(router)
    }
}
