//! Product API 라우트
//!
//! 상품 CRUD API를 제공합니다. 모든 엔드포인트는 보호 체인에 연결됩니다.
//!
//! # 엔드포인트
//!
//! - `GET /products` - 상품 목록 조회 (page, limit, sort)
//! - `POST /products` - 상품 생성
//! - `GET /products/{id}` - 상품 조회
//! - `PUT /products/{id}` - 상품 수정
//! - `DELETE /products/{id}` - 상품 삭제

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_core::{EntityId, Product};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::repository::{Pagination, RepositoryError, SortOrder};
use crate::state::AppState;

// ================================================================================================
// Request Types
// ================================================================================================

/// 상품 생성 요청
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub price: f64,
}

/// 상품 수정 요청
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    /// 경로의 ID와 같아야 함 (선택)
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
}

/// 상품 목록 쿼리
///
/// 숫자로 해석되지 않는 `page`/`limit`은 0(페이지네이션 없음)으로 취급합니다.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListProductsQuery {
    fn pagination(&self) -> Pagination {
        Pagination::new(lenient_u64(&self.page), lenient_u64(&self.limit))
    }

    fn sort_order(&self) -> SortOrder {
        SortOrder::parse(self.sort.as_deref().unwrap_or_default())
    }
}

fn lenient_u64(value: &Option<String>) -> u64 {
    value
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

// ================================================================================================
// Handlers
// ================================================================================================

/// GET /products - 상품 목록 조회
async fn list_products(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let pagination = query.pagination();
    let sort = query.sort_order();
    debug!(?pagination, ?sort, "Listing products");

    let products = state.products.find_all(pagination, sort).await?;

    Ok(Json(products))
}

/// POST /products - 상품 생성
async fn create_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateProductInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = payload?;

    let product = Product::new(input.name, input.price)?;
    state.products.create(&product).await?;

    info!(product_id = %product.id(), "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products/{id} - 상품 조회
async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = EntityId::parse(&id)?;

    let product = state
        .products
        .find_by_id(&id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => ApiError::not_found("Product not found"),
            other => other.into(),
        })?;

    Ok(Json(product))
}

/// PUT /products/{id} - 상품 수정 (이름, 가격)
async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductInput>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = EntityId::parse(&id)?;
    let Json(input) = payload?;

    if let Some(body_id) = input.id.as_deref().filter(|s| !s.trim().is_empty()) {
        if EntityId::parse(body_id)? != id {
            return Err(ApiError::validation("id in body does not match path"));
        }
    }

    // 생성 시각은 저장소에서 갱신되지 않음
    let product = Product::from_parts(id, input.name, input.price, Utc::now())?;
    let affected = state.products.update(&product).await?;
    if affected == 0 {
        return Err(ApiError::not_found("Product not found"));
    }

    info!(product_id = %id, "Product updated");
    Ok(StatusCode::OK)
}

/// DELETE /products/{id} - 상품 삭제
async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = EntityId::parse(&id)?;

    let affected = state.products.delete(&id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("Product not found"));
    }

    info!(product_id = %id, "Product deleted");
    Ok(StatusCode::OK)
}

// ================================================================================================
// Router
// ================================================================================================

/// 상품 라우터 생성.
pub fn products_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
