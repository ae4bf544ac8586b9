//! Handlers for the `/categorias` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use techflow_core::error::CoreError;
use techflow_core::types::DbId;
use techflow_core::validation::{require_text, MAX_NAME_LEN};
use techflow_db::models::category::{Category, CategoryDeletion, CategoryWithCount, SaveCategory};
use techflow_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{CanDeleteCatalog, CanEditCatalog};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /categorias` and `PUT /categorias/{id}`.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    #[serde(rename = "nombre")]
    pub name: String,
}

impl CategoryRequest {
    fn into_save(self) -> Result<SaveCategory, CoreError> {
        Ok(SaveCategory {
            name: require_text("nombre", &self.name, MAX_NAME_LEN)?,
        })
    }
}

/// GET /categorias
///
/// Every category with `total_productos`, ordered by name.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryWithCount>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /categorias/{id}
pub async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<CategoryWithCount>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /categorias
///
/// Duplicate names are rejected with 409 by the unique constraint.
pub async fn create_category(
    State(state): State<AppState>,
    CanEditCatalog(user): CanEditCatalog,
    AppJson(input): AppJson<CategoryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    let category = CategoryRepo::create(&state.pool, &input.into_save()?).await?;

    tracing::info!(category_id = category.id, user_id = user.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /categorias/{id}
pub async fn update_category(
    State(state): State<AppState>,
    CanEditCatalog(user): CanEditCatalog,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CategoryRequest>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::update(&state.pool, id, &input.into_save()?)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(category_id = id, user_id = user.user_id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /categorias/{id}
///
/// Refused with 409 while any product references the category; the message
/// names how many.
pub async fn delete_category(
    State(state): State<AppState>,
    CanDeleteCatalog(user): CanDeleteCatalog,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    match CategoryRepo::delete_if_unused(&state.pool, id).await? {
        CategoryDeletion::Deleted => {
            tracing::info!(category_id = id, user_id = user.user_id, "Category deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        CategoryDeletion::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        })),
        CategoryDeletion::InUse { product_count } => {
            tracing::info!(category_id = id, product_count, "Category delete refused: in use");
            Err(AppError::Core(CoreError::Conflict(format!(
                "Cannot delete category: {product_count} product(s) still reference it"
            ))))
        }
    }
}
