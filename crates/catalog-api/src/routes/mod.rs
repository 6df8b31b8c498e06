//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/products`, `/products/{id}` - 상품 관리 (보호)
//! - `/users` - 사용자 관리 (보호)
//! - `/users/generate_token` - 토큰 발급 (공개)

pub mod products;
pub mod users;

pub use products::{products_router, CreateProductInput, ListProductsQuery, UpdateProductInput};
pub use users::{token_router, users_router, AccessToken, CreateUserInput, GetJwtInput};

use axum::Router;
use std::sync::Arc;

use crate::auth::AuthGate;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 각 서브 라우터는 배선 시점에 공개 또는 보호 체인 중 하나로 고정됩니다.
pub fn create_api_router(gate: &AuthGate) -> Router<Arc<AppState>> {
    let public = token_router();
    let private = Router::new()
        .merge(products_router())
        .merge(users_router());

    Router::new()
        .merge(gate.public(public))
        .merge(gate.private(private))
}
