//! Route definitions for the `/usuarios` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes for `/usuarios`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /usuarios         -> list_users
/// POST   /usuarios         -> create_user
/// GET    /usuarios/{id}    -> get_user
/// PUT    /usuarios/{id}    -> update_user
/// DELETE /usuarios/{id}    -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/usuarios", get(users::list_users).post(users::create_user))
        .route(
            "/usuarios/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
