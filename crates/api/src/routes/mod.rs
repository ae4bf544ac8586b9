pub mod auth;
pub mod categories;
pub mod health;
pub mod main_content;
pub mod products;
pub mod stats;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /login                          login (public)
///
/// /usuarios                       list, create (admin)
/// /usuarios/{id}                  get, update, delete (admin)
///
/// /productos                      list (public), create (admin, editor)
/// /productos/{id}                 get (public), update (admin, editor), delete (admin)
///
/// /categorias                     list (public), create (admin, editor)
/// /categorias/{id}                get (public), update (admin, editor), delete (admin)
///
/// /contenido-principal            list (public), create (admin, editor)
/// /contenido-principal/{id}       get (public), update (admin, editor), delete (admin)
///
/// /estadisticas                   aggregate statistics (any authenticated)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(main_content::router())
        .merge(stats::router())
}
