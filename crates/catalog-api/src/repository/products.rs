//! Product Repository
//!
//! 상품 관련 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use catalog_core::{EntityId, Product};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use super::{Pagination, ProductRepository, RepositoryError, SortOrder};

/// 상품 레코드
#[derive(Debug, Clone, FromRow)]
struct ProductRecord {
    id: Uuid,
    name: String,
    price: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = RepositoryError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Product::from_parts(
            EntityId::from(record.id),
            record.name,
            record.price,
            record.created_at,
        )
        .map_err(|e| RepositoryError::Storage(sqlx::Error::Decode(Box::new(e))))
    }
}

/// SQLite 상품 저장소.
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(product.price())
        .bind(product.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Product, RepositoryError> {
        let record = sqlx::query_as::<_, ProductRecord>(
            "SELECT id, name, price, created_at FROM products WHERE id = ?",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        record.try_into()
    }

    async fn find_all(
        &self,
        pagination: Pagination,
        sort: SortOrder,
    ) -> Result<Vec<Product>, RepositoryError> {
        // 정렬 방향은 정적 키워드만 삽입됨
        let direction = sort.as_sql();
        let base = format!(
            "SELECT id, name, price, created_at FROM products ORDER BY created_at {dir}, rowid {dir}",
            dir = direction
        );

        let records = match pagination.window() {
            Some((limit, offset)) => {
                let sql = format!("{} LIMIT ? OFFSET ?", base);
                sqlx::query_as::<_, ProductRecord>(&sql)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query_as::<_, ProductRecord>(&base)
                    .fetch_all(&self.pool)
                    .await
            }
        }?;

        records.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, product: &Product) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE products SET name = ?, price = ? WHERE id = ?")
            .bind(product.name())
            .bind(product.price())
            .bind(product.id().as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &EntityId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::schema::memory_pool;
    use chrono::Duration;

    async fn repository() -> SqliteProductRepository {
        SqliteProductRepository::new(memory_pool().await.unwrap())
    }

    fn product_at(name: &str, price: f64, created_at: DateTime<Utc>) -> Product {
        Product::from_parts(EntityId::new(), name, price, created_at).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = repository().await;
        let product = Product::new("Product 1", 10.0).unwrap();

        repo.create(&product).await.unwrap();
        let found = repo.find_by_id(&product.id()).await.unwrap();

        assert_eq!(found.id(), product.id());
        assert_eq!(found.name(), "Product 1");
        assert_eq!(found.price(), 10.0);
        assert_eq!(found.created_at(), product.created_at());
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = repository().await;

        let result = repo.find_by_id(&EntityId::new()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_all_paginated_and_sorted() {
        let repo = repository().await;
        let base = Utc::now();
        let first = product_at("Product 1", 10.0, base);
        let second = product_at("Product 2", 20.0, base + Duration::seconds(1));
        let third = product_at("Product 3", 30.0, base + Duration::seconds(2));
        // 삽입 순서와 무관하게 created_at 기준으로 정렬됨
        for product in [&second, &third, &first] {
            repo.create(product).await.unwrap();
        }

        let page = repo
            .find_all(Pagination::new(1, 2), SortOrder::parse("asc"))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].name(), "Product 1");
        assert_eq!(page[1].name(), "Product 2");

        let page = repo
            .find_all(Pagination::new(2, 2), SortOrder::Asc)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name(), "Product 3");

        let page = repo
            .find_all(Pagination::new(1, 2), SortOrder::parse("desc"))
            .await
            .unwrap();
        assert_eq!(page[0].name(), "Product 3");
        assert_eq!(page[1].name(), "Product 2");
    }

    #[tokio::test]
    async fn test_find_all_without_pagination() {
        let repo = repository().await;
        for i in 1..=5 {
            let product = Product::new(format!("Product {}", i), i as f64).unwrap();
            repo.create(&product).await.unwrap();
        }

        let all = repo
            .find_all(Pagination::new(0, 0), SortOrder::Asc)
            .await
            .unwrap();
        assert_eq!(all.len(), 5);

        let all = repo
            .find_all(Pagination::new(3, 0), SortOrder::Asc)
            .await
            .unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn test_find_all_invalid_sort_is_ascending() {
        let repo = repository().await;
        let base = Utc::now();
        repo.create(&product_at("Product 2", 20.0, base + Duration::seconds(1)))
            .await
            .unwrap();
        repo.create(&product_at("Product 1", 10.0, base))
            .await
            .unwrap();

        let page = repo
            .find_all(Pagination::new(1, 2), SortOrder::parse("invalid-sort"))
            .await
            .unwrap();
        assert_eq!(page[0].name(), "Product 1");
        assert_eq!(page[1].name(), "Product 2");
    }

    #[tokio::test]
    async fn test_find_all_ties_keep_insertion_order() {
        let repo = repository().await;
        let at = Utc::now();
        for name in ["A", "B", "C"] {
            repo.create(&product_at(name, 1.0, at)).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_all(Pagination::all(), SortOrder::Asc)
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let repo = repository().await;

        let all = repo
            .find_all(Pagination::new(1, 10), SortOrder::Asc)
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_update() {
        let repo = repository().await;
        let product = Product::new("Product 1", 10.0).unwrap();
        repo.create(&product).await.unwrap();

        let changed =
            Product::from_parts(product.id(), "Product 2", 20.0, Utc::now()).unwrap();
        let affected = repo.update(&changed).await.unwrap();
        assert_eq!(affected, 1);

        let found = repo.find_by_id(&product.id()).await.unwrap();
        assert_eq!(found.name(), "Product 2");
        assert_eq!(found.price(), 20.0);
        // 생성 시각은 변경되지 않음
        assert_eq!(found.created_at(), product.created_at());
    }

    #[tokio::test]
    async fn test_update_missing_returns_zero() {
        let repo = repository().await;
        let product = Product::new("Product 1", 10.0).unwrap();

        assert_eq!(repo.update(&product).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository().await;
        let product = Product::new("Product 1", 10.0).unwrap();
        repo.create(&product).await.unwrap();

        assert_eq!(repo.delete(&product.id()).await.unwrap(), 1);
        assert!(matches!(
            repo.find_by_id(&product.id()).await,
            Err(RepositoryError::NotFound)
        ));
        assert_eq!(repo.delete(&product.id()).await.unwrap(), 0);
    }
}
