//! Route definitions for the `/productos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes for `/productos`.
///
/// ```text
/// GET    /productos         -> list_products
/// POST   /productos         -> create_product   (admin, editor)
/// GET    /productos/{id}    -> get_product
/// PUT    /productos/{id}    -> update_product   (admin, editor)
/// DELETE /productos/{id}    -> delete_product   (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/productos",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/productos/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
