//! 상품/사용자 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (상품 CRUD, 사용자 생성/조회)
//! - JWT Access Token 발급 및 라우트 보호
//! - SQLite 기반 저장소
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 인증 게이트
//! - [`middleware`]: HTTP 미들웨어 (접근 로그, 패닉 복구)
//! - [`repository`]: 저장소 트레이트 및 SQLite 구현
//! - [`server`]: 서버 구동 및 종료 처리

pub mod auth;
pub mod error;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::{AuthGate, AuthenticatedUser, Claims, TokenConfig, TokenError};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use repository::{
    Pagination, ProductRepository, RepositoryError, SortOrder, UserRepository,
};
pub use routes::*;
pub use server::{build_router, connect_pool, serve, shutdown_signal, ServerError};
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, TEST_JWT_SECRET};
