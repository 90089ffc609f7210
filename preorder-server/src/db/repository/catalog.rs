//! Catalog existence checks.
//!
//! The catalog itself is owned elsewhere; order intake only needs to know
//! whether a referenced product/variant exists at creation time. No FK
//! enforces this afterwards, so deleted catalog entries never invalidate
//! historical orders.

use sqlx::SqlitePool;

use super::RepoResult;

pub async fn product_exists(pool: &SqlitePool, product_id: i64) -> RepoResult<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = ?)")
            .bind(product_id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// True only when the variant exists AND belongs to the given product
pub async fn variant_belongs_to_product(
    pool: &SqlitePool,
    variant_id: i64,
    product_id: i64,
) -> RepoResult<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM product_variants WHERE id = ? AND product_id = ?)",
    )
    .bind(variant_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::test_pool;

    #[tokio::test]
    async fn product_existence() {
        let pool = test_pool().await;
        assert!(product_exists(&pool, 1).await.unwrap());
        assert!(!product_exists(&pool, 999).await.unwrap());
    }

    #[tokio::test]
    async fn variant_must_match_product() {
        let pool = test_pool().await;
        assert!(variant_belongs_to_product(&pool, 11, 1).await.unwrap());
        // variant 11 belongs to product 1, not product 2
        assert!(!variant_belongs_to_product(&pool, 11, 2).await.unwrap());
        assert!(!variant_belongs_to_product(&pool, 999, 1).await.unwrap());
    }
}
