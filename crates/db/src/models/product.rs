//! Product entity model and DTOs.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use techflow_core::stats::RankedProduct;
use techflow_core::types::{DbId, Timestamp};

/// A row from the `products` table joined with its category's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "imagen")]
    pub image: Option<String>,
    #[serde(rename = "categoria_id")]
    pub category_id: Option<DbId>,
    /// `None` when the product has no category.
    #[serde(rename = "categoria_nombre")]
    pub category_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RankedProduct for Product {
    fn id(&self) -> DbId {
        self.id
    }

    fn price(&self) -> Decimal {
        self.price
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// DTO for inserting or replacing a product.
#[derive(Debug, Clone)]
pub struct SaveProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<DbId>,
}
