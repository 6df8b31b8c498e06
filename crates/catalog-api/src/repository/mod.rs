//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 라우트 핸들러에서 분리하여 관리합니다.
//! 핸들러는 트레이트 객체(`Arc<dyn ...>`)만 알고 있으며,
//! 구체 구현은 SQLite 위에서 동작합니다.

pub mod products;
pub mod schema;
pub mod users;

use async_trait::async_trait;
use catalog_core::{EntityId, Product, User};

pub use products::SqliteProductRepository;
pub use users::SqliteUserRepository;

/// 저장소 에러.
///
/// "찾을 수 없음"은 메시지가 아니라 variant로 구분합니다.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// 조회 결과가 없음
    #[error("record not found")]
    NotFound,

    /// 제약 조건 위반 (예: 중복 이메일)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// 기타 저장소 오류
    #[error("storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

/// sqlx 에러 분류.
///
/// 유니크 제약 위반은 `ConstraintViolation`으로, 나머지는 `Storage`로 변환됩니다.
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::ConstraintViolation(db_err.message().to_string())
            }
            other => RepositoryError::Storage(other),
        }
    }
}

/// 정렬 방향.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// 정렬 문자열 해석.
    ///
    /// 정확히 `"asc"` 또는 `"desc"`만 인식하며, 그 외 값(빈 문자열 포함)은 `Asc`입니다.
    pub fn parse(s: &str) -> Self {
        match s {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    /// SQL 정렬 키워드.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// 페이지네이션 요청.
///
/// `page`와 `limit` 중 하나라도 0이면 페이지네이션 없이 전체를 조회합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// 1부터 시작하는 페이지 번호
    pub page: u64,
    /// 페이지 크기
    pub limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// 페이지네이션 없음 (전체 조회).
    pub fn all() -> Self {
        Self::default()
    }

    /// SQL `LIMIT`/`OFFSET` 값. 전체 조회면 `None`.
    pub fn window(&self) -> Option<(i64, i64)> {
        if self.page == 0 || self.limit == 0 {
            return None;
        }
        let offset = (self.page - 1).saturating_mul(self.limit);
        Some((
            i64::try_from(self.limit).unwrap_or(i64::MAX),
            i64::try_from(offset).unwrap_or(i64::MAX),
        ))
    }
}

/// 상품 저장소.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 상품 저장.
    async fn create(&self, product: &Product) -> Result<(), RepositoryError>;

    /// ID로 상품 조회. 없으면 `NotFound`.
    async fn find_by_id(&self, id: &EntityId) -> Result<Product, RepositoryError>;

    /// 생성 시각 순으로 상품 목록 조회.
    async fn find_all(
        &self,
        pagination: Pagination,
        sort: SortOrder,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// 이름과 가격 갱신. 영향받은 행 수를 반환하며 0은 대상 없음입니다.
    async fn update(&self, product: &Product) -> Result<u64, RepositoryError>;

    /// 상품 삭제. 영향받은 행 수를 반환하며 0은 대상 없음입니다.
    async fn delete(&self, id: &EntityId) -> Result<u64, RepositoryError>;
}

/// 사용자 저장소.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 사용자 저장. 중복 이메일이면 `ConstraintViolation`.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// 이메일로 사용자 조회. 없으면 `NotFound`.
    async fn find_by_email(&self, email: &str) -> Result<User, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse(""), SortOrder::Asc);
        assert_eq!(SortOrder::parse("invalid-sort"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Asc);
    }

    #[test]
    fn test_pagination_window() {
        assert_eq!(Pagination::new(1, 2).window(), Some((2, 0)));
        assert_eq!(Pagination::new(3, 10).window(), Some((10, 20)));
        assert_eq!(Pagination::new(0, 10).window(), None);
        assert_eq!(Pagination::new(2, 0).window(), None);
        assert_eq!(Pagination::all().window(), None);
    }

    #[test]
    fn test_pagination_window_saturates() {
        let (limit, offset) = Pagination::new(u64::MAX, u64::MAX).window().unwrap();
        assert_eq!(limit, i64::MAX);
        assert_eq!(offset, i64::MAX);
    }

    #[test]
    fn test_row_not_found_maps_to_variant() {
        assert!(matches!(
            RepositoryError::from(sqlx::Error::RowNotFound),
            RepositoryError::NotFound
        ));
        assert!(matches!(
            RepositoryError::from(sqlx::Error::PoolTimedOut),
            RepositoryError::Storage(_)
        ));
    }
}
