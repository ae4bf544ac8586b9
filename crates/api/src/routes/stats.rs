use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// ```text
/// GET /estadisticas    -> get_statistics (any authenticated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/estadisticas", get(stats::get_statistics))
}
