//! 인증 및 권한 부여.
//!
//! JWT 기반 Access Token 발급/검증과 라우트 보호 게이트를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: JWT 페이로드 구조체
//! - [`TokenConfig`]: 비밀 키와 유효 시간
//! - [`AuthGate`]: 공개/보호 미들웨어 체인 구성기
//! - [`AuthenticatedUser`]: 보호된 핸들러용 추출기
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let gate = AuthGate::new(token_config);
//! let app = Router::new()
//!     .merge(gate.public(public_routes))
//!     .merge(gate.private(private_routes));
//! ```

mod gate;
pub mod jwt;

pub use gate::{
    authenticate, bearer_token, verify_token, AuthError, AuthGate, AuthenticatedUser,
    TokenVerification,
};
pub use jwt::{Claims, TokenConfig, TokenError};
