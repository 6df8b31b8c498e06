//! API 서버용 HTTP middleware.
//!
//! 인증 게이트의 공통 단계(접근 로그, 패닉 복구)를 제공합니다.

mod access_log;
mod recovery;

pub use access_log::{access_log, ACCESS_LOG_TARGET};
pub use recovery::panic_response;
