//! Handler for `GET /estadisticas`.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use techflow_core::stats::{most_expensive, most_popular, most_recent, TOP_N};
use techflow_db::models::category::CategoryWithCount;
use techflow_db::models::product::Product;
use techflow_db::models::stats::StatsSnapshot;
use techflow_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::CanViewStatistics;
use crate::response::DataResponse;
use crate::state::AppState;

/// Aggregate counts and top lists for the console dashboard.
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub total_usuarios: i64,
    pub total_categorias: i64,
    pub total_productos: i64,
    pub total_contenido: i64,
    /// Top products by price, highest first.
    pub productos_caros: Vec<Product>,
    pub productos_recientes: Vec<Product>,
    pub categorias_populares: Vec<CategoryWithCount>,
}

impl From<StatsSnapshot> for StatisticsResponse {
    fn from(snapshot: StatsSnapshot) -> Self {
        Self {
            total_usuarios: snapshot.user_count,
            total_categorias: snapshot.categories.len() as i64,
            total_productos: snapshot.products.len() as i64,
            total_contenido: snapshot.content_count,
            productos_caros: most_expensive(&snapshot.products, TOP_N),
            productos_recientes: most_recent(&snapshot.products, TOP_N),
            categorias_populares: most_popular(&snapshot.categories, TOP_N),
        }
    }
}

/// GET /estadisticas
pub async fn get_statistics(
    State(state): State<AppState>,
    CanViewStatistics(_user): CanViewStatistics,
) -> AppResult<Json<DataResponse<StatisticsResponse>>> {
    let snapshot = StatsRepo::snapshot(&state.pool).await?;
    Ok(Json(DataResponse {
        data: snapshot.into(),
    }))
}
