//! Repository for the `main_content` table.
//!
//! Payloads are read and written in stored form; the data-URI codec is
//! applied by the caller.

use sqlx::PgPool;
use techflow_core::types::DbId;

use crate::models::main_content::{MainContent, SaveMainContent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, kind, payload, created_at, updated_at";

/// Provides CRUD operations for main content.
pub struct MainContentRepo;

impl MainContentRepo {
    /// Insert a new content row, returning it.
    pub async fn create(
        pool: &PgPool,
        input: &SaveMainContent,
    ) -> Result<MainContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO main_content (title, description, kind, payload)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MainContent>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.kind)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// List all content, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<MainContent>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM main_content ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, MainContent>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a content row by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MainContent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM main_content WHERE id = $1");
        sqlx::query_as::<_, MainContent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace every field of a content row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveMainContent,
    ) -> Result<Option<MainContent>, sqlx::Error> {
        let query = format!(
            "UPDATE main_content SET
                title = $2,
                description = $3,
                kind = $4,
                payload = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MainContent>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.kind)
            .bind(&input.payload)
            .fetch_optional(pool)
            .await
    }

    /// Delete a content row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM main_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
