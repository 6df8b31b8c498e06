//! 상품 엔티티.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::EntityId;
use crate::error::{IdError, ProductError};

/// 상품.
///
/// 필드는 검증 생성자를 통해서만 설정되므로, 존재하는 모든 `Product` 값은
/// [`Product::validate`]를 통과한 상태입니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: EntityId,
    name: String,
    price: f64,
    created_at: DateTime<Utc>,
}

impl Product {
    /// 새 상품 생성.
    ///
    /// 식별자와 생성 시각은 이 시점에 할당됩니다.
    ///
    /// # Errors
    ///
    /// - `NameRequired`: 빈 이름
    /// - `PriceRequired`: 가격이 0
    /// - `InvalidPrice`: 가격이 음수이거나 유한하지 않음
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, ProductError> {
        Self::from_parts(EntityId::new(), name, price, Utc::now())
    }

    /// 기존 필드로 상품 구성 (저장소 조회, 전체 필드 수정용).
    pub fn from_parts(
        id: EntityId,
        name: impl Into<String>,
        price: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProductError> {
        let product = Self {
            id,
            name: name.into(),
            price,
            created_at,
        };
        product.validate()?;
        Ok(product)
    }

    /// 상품 검증.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.is_nil() {
            return Err(IdError::Required.into());
        }
        if self.name.is_empty() {
            return Err(ProductError::NameRequired);
        }
        if self.price == 0.0 {
            return Err(ProductError::PriceRequired);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ProductError::InvalidPrice);
        }
        Ok(())
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
