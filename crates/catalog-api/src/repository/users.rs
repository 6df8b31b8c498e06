//! User Repository
//!
//! 사용자 관련 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use catalog_core::{EntityId, User};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::{RepositoryError, UserRepository};

/// 사용자 레코드
#[derive(Debug, Clone, FromRow)]
struct UserRecord {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
}

impl TryFrom<UserRecord> for User {
    type Error = RepositoryError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        User::from_parts(
            EntityId::from(record.id),
            record.name,
            record.email,
            record.password_hash,
        )
        .map_err(|e| RepositoryError::Storage(sqlx::Error::Decode(Box::new(e))))
    }
}

/// SQLite 사용자 저장소.
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_hash())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        record.try_into()
    }
}
