//! Route definitions for the `/categorias` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes for `/categorias`.
///
/// ```text
/// GET    /categorias         -> list_categories
/// POST   /categorias         -> create_category   (admin, editor)
/// GET    /categorias/{id}    -> get_category
/// PUT    /categorias/{id}    -> update_category   (admin, editor)
/// DELETE /categorias/{id}    -> delete_category   (admin, refused while in use)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categorias",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categorias/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
}
