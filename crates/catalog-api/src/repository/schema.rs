//! 스키마 생성.
//!
//! 시작 시 한 번 실행되며 여러 번 실행해도 안전합니다.

use sqlx::SqlitePool;
use tracing::info;

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id          BLOB PRIMARY KEY NOT NULL,
        name        TEXT NOT NULL,
        price       REAL NOT NULL,
        created_at  TEXT NOT NULL
    )
"#;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id             BLOB PRIMARY KEY NOT NULL,
        name           TEXT NOT NULL,
        email          TEXT NOT NULL UNIQUE,
        password_hash  TEXT NOT NULL
    )
"#;

/// 테이블 생성.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PRODUCTS).execute(pool).await?;
    sqlx::query(CREATE_USERS).execute(pool).await?;

    info!("Database schema ready");
    Ok(())
}

/// 스키마가 적용된 인메모리 SQLite 풀 (테스트용).
///
/// 인메모리 DB는 연결마다 별도이므로 단일 연결을 유지합니다.
#[cfg(any(test, feature = "test-utils"))]
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}
