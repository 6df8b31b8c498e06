//! # Catalog Core
//!
//! 카탈로그 API의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 다음을 포함합니다:
//! - 엔티티 식별자 및 Product / User 도메인 모델
//! - 비밀번호 해싱 및 검증 (자격증명 관리)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod credential;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use credential::{hash_password, verify_password, CredentialError, MAX_PASSWORD_BYTES};
pub use domain::*;
pub use error::*;
pub use logging::*;
