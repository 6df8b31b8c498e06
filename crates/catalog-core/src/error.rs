//! 도메인 검증 에러 타입.
//!
//! 엔티티 생성자는 잘못된 값을 만들지 않고 이 모듈의 타입화된 에러를 반환합니다.

use thiserror::Error;

use crate::credential::CredentialError;

/// 엔티티 식별자 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// 식별자가 비어 있음
    #[error("id is required")]
    Required,

    /// 식별자 형식이 잘못됨
    #[error("invalid id: {0}")]
    Invalid(String),
}

/// Product 검증 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// 잘못된 식별자
    #[error(transparent)]
    Id(#[from] IdError),

    /// 이름 누락
    #[error("name is required")]
    NameRequired,

    /// 가격이 0
    #[error("price is required")]
    PriceRequired,

    /// 가격이 음수이거나 유한하지 않음
    #[error("invalid price")]
    InvalidPrice,
}

/// User 검증 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// 잘못된 식별자
    #[error(transparent)]
    Id(#[from] IdError),

    /// 이름 누락
    #[error("invalid name")]
    InvalidName,

    /// 이메일 누락 또는 형식 오류
    #[error("invalid email")]
    InvalidEmail,

    /// 저장된 비밀번호 해시 누락
    #[error("password hash is required")]
    MissingPasswordHash,

    /// 비밀번호 입력 오류 (빈 값, 길이 초과, 해싱 실패)
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl UserError {
    /// 사용자 입력 문제인지 확인합니다.
    ///
    /// 해싱 내부 실패만 false를 반환합니다.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, UserError::Credential(CredentialError::HashingFailed))
    }
}
