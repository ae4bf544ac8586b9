//! Raw inputs for the statistics endpoint.

use crate::models::category::CategoryWithCount;
use crate::models::product::Product;

/// One consistent read of everything the statistics endpoint aggregates.
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub user_count: i64,
    pub content_count: i64,
    pub categories: Vec<CategoryWithCount>,
    pub products: Vec<Product>,
}
