//! Category entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use techflow_core::stats::RankedCategory;
use techflow_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category together with the number of products referencing it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithCount {
    pub id: DbId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "total_productos")]
    pub product_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RankedCategory for CategoryWithCount {
    fn name(&self) -> &str {
        &self.name
    }

    fn product_count(&self) -> i64 {
        self.product_count
    }
}

/// DTO for creating or renaming a category.
#[derive(Debug, Clone)]
pub struct SaveCategory {
    pub name: String,
}

/// Result of a guarded category delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryDeletion {
    Deleted,
    NotFound,
    /// Products still reference the category; nothing was deleted.
    InUse { product_count: i64 },
}
