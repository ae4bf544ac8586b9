//! Main content (landing page media) model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use techflow_core::types::{DbId, Timestamp};

/// A row from the `main_content` table.
///
/// `payload` holds the stored form: image and video bodies without their
/// data-URI prefix.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MainContent {
    pub id: DbId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "url")]
    pub payload: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or replacing a content row. `payload` must already be
/// in stored form.
#[derive(Debug, Clone)]
pub struct SaveMainContent {
    pub title: String,
    pub description: Option<String>,
    pub kind: String,
    pub payload: Option<String>,
}
