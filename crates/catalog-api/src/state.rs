//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유되며, 생성 이후 변경되지 않습니다.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::TokenConfig;
use crate::repository::{
    ProductRepository, SqliteProductRepository, SqliteUserRepository, UserRepository,
};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 상품 저장소
    pub products: Arc<dyn ProductRepository>,

    /// 사용자 저장소
    pub users: Arc<dyn UserRepository>,

    /// 토큰 발급/검증 설정 - 게이트와 로그인 핸들러가 공유
    pub token: TokenConfig,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        token: TokenConfig,
    ) -> Self {
        Self {
            products,
            users,
            token,
        }
    }

    /// SQLite 풀 위에 구성된 상태.
    pub fn with_sqlite(pool: SqlitePool, token: TokenConfig) -> Self {
        Self::new(
            Arc::new(SqliteProductRepository::new(pool.clone())),
            Arc::new(SqliteUserRepository::new(pool)),
            token,
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// 테스트용 토큰 비밀 키.
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_JWT_SECRET: &str = "catalog-test-secret";

/// 테스트용 AppState 생성 헬퍼.
///
/// 스키마가 적용된 인메모리 SQLite와 60초 TTL 토큰 설정을 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub async fn create_test_state() -> AppState {
    use secrecy::SecretString;

    let pool = crate::repository::schema::memory_pool()
        .await
        .expect("Failed to create in-memory database for test");
    let token = TokenConfig::new(SecretString::new(TEST_JWT_SECRET.into()), 60);

    AppState::with_sqlite(pool, token)
}
