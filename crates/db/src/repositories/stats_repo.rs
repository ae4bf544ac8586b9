//! Reads backing the statistics endpoint.

use sqlx::PgPool;

use crate::models::category::CategoryWithCount;
use crate::models::product::Product;
use crate::models::stats::StatsSnapshot;
use crate::repositories::{category_repo, product_repo};

/// Provides the aggregate snapshot for statistics.
pub struct StatsRepo;

impl StatsRepo {
    /// Read counts, categories and products inside one read-only
    /// repeatable-read transaction so all three reads see the same data.
    pub async fn snapshot(pool: &PgPool) -> Result<StatsSnapshot, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let (user_count, content_count): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM users), (SELECT COUNT(*) FROM main_content)",
        )
        .fetch_one(&mut *tx)
        .await?;

        let categories = sqlx::query_as::<_, CategoryWithCount>(&category_repo::list_query())
            .fetch_all(&mut *tx)
            .await?;

        let products = sqlx::query_as::<_, Product>(&product_repo::list_query())
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(StatsSnapshot {
            user_count,
            content_count,
            categories,
            products,
        })
    }
}
