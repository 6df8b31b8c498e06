//! JWT 토큰 처리.
//!
//! Access Token 발급/검증 로직. 발급기는 상태를 갖지 않으며,
//! 비밀 키와 유효 시간은 호출마다 인자로 전달됩니다.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 발급 시각 기준으로 Claims 생성. `exp = now + ttl_secs`.
    pub fn new(subject: impl Into<String>, ttl_secs: u64, now: i64) -> Self {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            sub: subject.into(),
            iat: now,
            exp: now.saturating_add(ttl),
        }
    }

    /// 주어진 시각에 만료되었는지 확인 (`exp <= now`).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// JWT 토큰 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    SignatureInvalid,
    #[error("token encoding failed")]
    Encoding,
}

/// 프로세스 전역 토큰 설정.
///
/// 시작 시 한 번 생성되어 게이트와 로그인 핸들러에 명시적으로 전달됩니다.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Arc<SecretString>,
    ttl_secs: u64,
}

impl TokenConfig {
    pub fn new(secret: SecretString, ttl_secs: u64) -> Self {
        Self {
            secret: Arc::new(secret),
            ttl_secs,
        }
    }

    /// 토큰 유효 시간 (초).
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// 현재 설정으로 토큰 발급.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        issue(subject, self.ttl_secs, self.secret.expose_secret())
    }

    /// 현재 설정으로 토큰 검증.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        verify_claims_at(token, self.secret.expose_secret(), Utc::now().timestamp())
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// Access Token 발급.
///
/// # Arguments
///
/// * `subject` - 사용자 ID
/// * `ttl_secs` - 유효 시간 (초)
/// * `secret` - 비밀 키
pub fn issue(subject: &str, ttl_secs: u64, secret: &str) -> Result<String, TokenError> {
    issue_at(subject, ttl_secs, secret, Utc::now().timestamp())
}

/// 지정한 발급 시각으로 Access Token 발급.
pub fn issue_at(
    subject: &str,
    ttl_secs: u64,
    secret: &str,
    now: i64,
) -> Result<String, TokenError> {
    let claims = Claims::new(subject, ttl_secs, now);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Encoding)
}

/// 토큰 검증 후 subject 반환.
pub fn verify(token: &str, secret: &str) -> Result<String, TokenError> {
    verify_at(token, secret, Utc::now().timestamp())
}

/// 지정한 시각 기준으로 토큰 검증 후 subject 반환.
pub fn verify_at(token: &str, secret: &str, now: i64) -> Result<String, TokenError> {
    verify_claims_at(token, secret, now).map(|claims| claims.sub)
}

/// 서명 검증 후 만료 여부를 직접 판정합니다.
///
/// jsonwebtoken의 만료 검사는 `exp < now - leeway` 기준이므로 끄고,
/// `exp <= now`를 만료로 취급합니다.
fn verify_claims_at(token: &str, secret: &str, now: i64) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "exp"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })?;

    if token_data.claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }

    Ok(token_data.claims)
}
