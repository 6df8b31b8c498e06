//! 사용자 엔티티.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::EntityId;
use crate::credential::{hash_password, verify_password, CredentialError};
use crate::error::{IdError, UserError};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$").expect("email pattern is valid")
});

/// 사용자.
///
/// 비밀번호 해시는 직렬화되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: EntityId,
    name: String,
    email: String,
    #[serde(skip)]
    password_hash: String,
}

impl User {
    /// 새 사용자 생성.
    ///
    /// 빈 비밀번호, 이름, 이메일 순으로 검증한 뒤 비밀번호를 해싱합니다.
    /// 해싱은 CPU 비용이 크므로 비동기 컨텍스트에서는 `spawn_blocking`으로 호출해야 합니다.
    ///
    /// # Errors
    ///
    /// - `InvalidName`: 빈 이름
    /// - `InvalidEmail`: 빈 이메일 또는 형식 오류
    /// - `Credential(..)`: 빈 비밀번호, 길이 초과, 해싱 실패
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> Result<Self, UserError> {
        if password.is_empty() {
            return Err(CredentialError::InvalidCredentialInput.into());
        }

        let name = name.into();
        let email = email.into();
        check_name(&name)?;
        check_email(&email)?;

        let password_hash = hash_password(password)?;

        Ok(Self {
            id: EntityId::new(),
            name,
            email,
            password_hash,
        })
    }

    /// 저장된 필드로 사용자 구성.
    pub fn from_parts(
        id: EntityId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserError> {
        let user = Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        };
        user.validate()?;
        Ok(user)
    }

    /// 사용자 검증.
    pub fn validate(&self) -> Result<(), UserError> {
        if self.id.is_nil() {
            return Err(IdError::Required.into());
        }
        check_name(&self.name)?;
        check_email(&self.email)?;
        if self.password_hash.is_empty() {
            return Err(UserError::MissingPasswordHash);
        }
        Ok(())
    }

    /// 비밀번호 일치 여부 확인.
    pub fn validate_password(&self, password: &str) -> bool {
        verify_password(&self.password_hash, password)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

fn check_name(name: &str) -> Result<(), UserError> {
    if name.is_empty() {
        return Err(UserError::InvalidName);
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), UserError> {
    if email.is_empty() || !EMAIL_REGEX.is_match(email) {
        return Err(UserError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_user() {
        let user = User::new("John Doe", "j@j.com", "123456").unwrap();

        assert!(!user.id().to_string().is_empty());
        assert!(!user.password_hash().is_empty());
        assert_eq!(user.name(), "John Doe");
        assert_eq!(user.email(), "j@j.com");
    }

    #[test]
    fn test_new_user_with_empty_email() {
        assert_eq!(
            User::new("John Doe", "", "123456"),
            Err(UserError::InvalidEmail)
        );
    }

    #[test]
    fn test_new_user_with_invalid_email() {
        assert_eq!(
            User::new("John Doe", "j@j", "123456"),
            Err(UserError::InvalidEmail)
        );
        assert_eq!(
            User::new("John Doe", "J@J.COM", "123456"),
            Err(UserError::InvalidEmail)
        );
    }

    #[test]
    fn test_new_user_with_empty_password() {
        assert_eq!(
            User::new("John Doe", "j@j.com", ""),
            Err(UserError::Credential(CredentialError::InvalidCredentialInput))
        );
    }

    #[test]
    fn test_empty_password_reported_before_other_fields() {
        assert_eq!(
            User::new("", "not-an-email", ""),
            Err(UserError::Credential(CredentialError::InvalidCredentialInput))
        );
        assert_eq!(
            User::new("", "j@j.com", "123456"),
            Err(UserError::InvalidName)
        );
    }

    #[test]
    fn test_new_user_with_empty_name() {
        assert_eq!(
            User::new("", "j@j.com", "123456"),
            Err(UserError::InvalidName)
        );
    }

    #[test]
    fn test_new_user_with_too_long_password() {
        let password = "a".repeat(73);
        assert_eq!(
            User::new("John Doe", "j@j.com", &password),
            Err(UserError::Credential(CredentialError::CredentialTooLong))
        );
    }

    #[test]
    fn test_validate_password() {
        let user = User::new("John Doe", "j@j.com", "123456").unwrap();

        assert!(user.validate_password("123456"));
        assert!(!user.validate_password("654321"));
        assert_ne!(user.password_hash(), "123456");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("John Doe", "j@j.com", "123456").unwrap();
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["email"], "j@j.com");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_from_parts_requires_hash() {
        assert_eq!(
            User::from_parts(EntityId::new(), "John Doe", "j@j.com", ""),
            Err(UserError::MissingPasswordHash)
        );
    }

    proptest! {
        // argon2 해싱 비용 때문에 케이스 수를 줄임
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_valid_user_verifies_only_its_password(
            name in "[A-Za-z][A-Za-z ]{0,15}",
            local in "[a-z0-9._]{1,12}",
            domain in "[a-z0-9]{1,12}",
            tld in "[a-z]{2,4}",
            password in "[ -~]{1,72}",
        ) {
            let email = format!("{}@{}.{}", local, domain, tld);
            let user = User::new(name, email, &password).unwrap();

            prop_assert!(user.validate_password(&password));
            let other = format!("{}x", password);
            prop_assert!(!user.validate_password(&other));
            prop_assert_ne!(user.password_hash(), password.as_str());
        }
    }
}
