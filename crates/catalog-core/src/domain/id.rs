//! 엔티티 식별자.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdError;

/// 엔티티 고유 식별자 (UUID v4).
///
/// 생성 시 한 번 할당되며 이후 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// 새 식별자 생성.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 문자열에서 식별자 파싱.
    pub fn parse(value: &str) -> Result<Self, IdError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(IdError::Required);
        }
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| IdError::Invalid(value.to_string()))
    }

    /// 비어 있는(nil) 식별자인지 확인.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// 내부 UUID 반환.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_round_trips_through_text() {
        let id = EntityId::new();
        let text = id.to_string();

        assert!(!text.is_empty());
        assert_eq!(EntityId::parse(&text).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(EntityId::parse(""), Err(IdError::Required));
        assert_eq!(EntityId::parse("   "), Err(IdError::Required));
        assert!(matches!(EntityId::parse("id"), Err(IdError::Invalid(_))));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = EntityId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
