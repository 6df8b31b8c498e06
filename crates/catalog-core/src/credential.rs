//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.
//!
//! 평문 길이는 UTF-8 바이트 기준 [`MAX_PASSWORD_BYTES`]로 제한됩니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 허용되는 평문 비밀번호의 최대 바이트 수.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// 비밀번호 처리 에러.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("invalid password")]
    InvalidCredentialInput,
    #[error("password exceeds {MAX_PASSWORD_BYTES} bytes")]
    CredentialTooLong,
    #[error("password hashing failed")]
    HashingFailed,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하여 비밀번호를 해싱합니다.
/// 솔트는 자동으로 생성되며 비용 파라미터와 함께 결과 문자열에 포함됩니다.
///
/// # Errors
///
/// - `InvalidCredentialInput`: 빈 비밀번호
/// - `CredentialTooLong`: [`MAX_PASSWORD_BYTES`] 초과
/// - `HashingFailed`: 해시 함수 내부 실패
///
/// # Example
///
/// ```
/// use catalog_core::credential::{hash_password, verify_password};
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// assert!(verify_password(&hash, "my_secure_password"));
/// ```
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    check_plaintext(plaintext)?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|_| CredentialError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 저장된 해시와 입력된 비밀번호를 비교합니다. 불일치, 잘못된 해시 형식,
/// 허용 범위를 벗어난 입력은 모두 `false`를 반환하며 에러를 내지 않습니다.
pub fn verify_password(digest: &str, plaintext: &str) -> bool {
    if check_plaintext(plaintext).is_err() {
        return false;
    }

    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed_hash)
        .is_ok()
}

fn check_plaintext(plaintext: &str) -> Result<(), CredentialError> {
    if plaintext.is_empty() {
        return Err(CredentialError::InvalidCredentialInput);
    }
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(CredentialError::CredentialTooLong);
    }
    Ok(())
}
