//! Handlers for the `/productos` resource.
//!
//! Reads are public. Writes require [`CanEditCatalog`]; deletes require
//! [`CanDeleteCatalog`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use techflow_core::error::CoreError;
use techflow_core::types::DbId;
use techflow_core::validation::{optional_text, require_text, validate_price, MAX_NAME_LEN};
use techflow_db::models::product::{Product, SaveProduct};
use techflow_db::repositories::{CategoryRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{CanDeleteCatalog, CanEditCatalog};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /productos` and `PUT /productos/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    /// `null` or absent means "no category".
    #[serde(rename = "categoria_id", default)]
    pub category_id: Option<DbId>,
}

impl ProductRequest {
    /// Validate and normalize into a repository DTO. Checks that a referenced
    /// category exists so the client gets a 400 instead of a bare FK error.
    async fn into_save(self, state: &AppState) -> AppResult<SaveProduct> {
        let name = require_text("nombre", &self.name, MAX_NAME_LEN)?;
        validate_price(self.price)?;

        if let Some(category_id) = self.category_id {
            if !CategoryRepo::exists(&state.pool, category_id).await? {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Category {category_id} does not exist"
                ))));
            }
        }

        Ok(SaveProduct {
            name,
            description: optional_text(self.description),
            price: self.price,
            image: optional_text(self.image),
            category_id: self.category_id,
        })
    }
}

/// GET /productos
///
/// All products with their category name, newest first.
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /productos/{id}
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Product>>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /productos
pub async fn create_product(
    State(state): State<AppState>,
    CanEditCatalog(user): CanEditCatalog,
    AppJson(input): AppJson<ProductRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    let save = input.into_save(&state).await?;
    let product = ProductRepo::create(&state.pool, &save).await?;

    tracing::info!(product_id = product.id, user_id = user.user_id, "Product created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /productos/{id}
///
/// Full replace: omitted optional fields are cleared.
pub async fn update_product(
    State(state): State<AppState>,
    CanEditCatalog(user): CanEditCatalog,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProductRequest>,
) -> AppResult<Json<DataResponse<Product>>> {
    let save = input.into_save(&state).await?;
    let product = ProductRepo::update(&state.pool, id, &save)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    tracing::info!(product_id = id, user_id = user.user_id, "Product updated");

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /productos/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    CanDeleteCatalog(user): CanDeleteCatalog,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    tracing::info!(product_id = id, user_id = user.user_id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
