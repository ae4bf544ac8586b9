//! Repository for the `products` table.
//!
//! Every read and write returns the row joined with its category name.

use sqlx::PgPool;
use techflow_core::types::DbId;

use crate::models::product::{Product, SaveProduct};

/// Projection over `products p LEFT JOIN categories c`.
const PROJECTION: &str = "p.id, p.name, p.description, p.price, p.image, p.category_id, \
                          c.name AS category_name, p.created_at, p.updated_at";

/// Full listing query, shared with the statistics snapshot.
pub(crate) fn list_query() -> String {
    format!(
        "SELECT {PROJECTION}
         FROM products p
         LEFT JOIN categories c ON c.id = p.category_id
         ORDER BY p.created_at DESC, p.id DESC"
    )
}

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    pub async fn create(pool: &PgPool, input: &SaveProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                INSERT INTO products (name, description, price, image, category_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {PROJECTION}
             FROM p
             LEFT JOIN categories c ON c.id = p.category_id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.image)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// List all products, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&list_query())
            .fetch_all(pool)
            .await
    }

    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECTION}
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every field of a product.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                UPDATE products SET
                    name = $2,
                    description = $3,
                    price = $4,
                    image = $5,
                    category_id = $6,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {PROJECTION}
             FROM p
             LEFT JOIN categories c ON c.id = p.category_id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.image)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
