//! Repository for the `categories` table.

use sqlx::PgPool;
use techflow_core::types::DbId;

use crate::models::category::{Category, CategoryDeletion, CategoryWithCount, SaveCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Categories with the number of products referencing each. Callers append
/// their own `WHERE` and must end with `GROUP BY c.id`.
pub(crate) const SELECT_WITH_COUNT: &str =
    "SELECT c.id, c.name, COUNT(p.id) AS product_count, c.created_at, c.updated_at
     FROM categories c
     LEFT JOIN products p ON p.category_id = c.id";

/// Full listing query, shared with the statistics snapshot.
pub(crate) fn list_query() -> String {
    format!("{SELECT_WITH_COUNT} GROUP BY c.id ORDER BY c.name")
}

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &SaveCategory) -> Result<Category, sqlx::Error> {
        let query = format!("INSERT INTO categories (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List all categories with product counts, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(&list_query())
            .fetch_all(pool)
            .await
    }

    /// Find a category (with product count) by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CategoryWithCount>, sqlx::Error> {
        let query = format!("{SELECT_WITH_COUNT} WHERE c.id = $1 GROUP BY c.id");
        sqlx::query_as::<_, CategoryWithCount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a category with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Rename a category. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category only if no product references it.
    ///
    /// The category row is locked first, so a concurrent product insert that
    /// references it waits on the foreign-key check until this transaction
    /// finishes.
    pub async fn delete_if_unused(
        pool: &PgPool,
        id: DbId,
    ) -> Result<CategoryDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM categories WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(CategoryDeletion::NotFound);
        }

        let product_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if product_count > 0 {
            return Ok(CategoryDeletion::InUse { product_count });
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CategoryDeletion::Deleted)
    }
}
