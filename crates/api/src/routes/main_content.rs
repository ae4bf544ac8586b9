//! Route definitions for the `/contenido-principal` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::main_content;
use crate::state::AppState;

/// Routes for `/contenido-principal`.
///
/// ```text
/// GET    /contenido-principal         -> list_content
/// POST   /contenido-principal         -> create_content   (admin, editor)
/// GET    /contenido-principal/{id}    -> get_content
/// PUT    /contenido-principal/{id}    -> update_content   (admin, editor)
/// DELETE /contenido-principal/{id}    -> delete_content   (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/contenido-principal",
            get(main_content::list_content).post(main_content::create_content),
        )
        .route(
            "/contenido-principal/{id}",
            get(main_content::get_content)
                .put(main_content::update_content)
                .delete(main_content::delete_content),
        )
}
