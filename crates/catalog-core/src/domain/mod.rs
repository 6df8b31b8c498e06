//! 도메인 모델.
//!
//! - [`EntityId`]: 엔티티 식별자
//! - [`Product`]: 상품
//! - [`User`]: 사용자

mod id;
mod product;
mod user;

pub use id::EntityId;
pub use product::Product;
pub use user::User;
