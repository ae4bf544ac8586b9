//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod main_content_repo;
pub mod product_repo;
pub mod stats_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use main_content_repo::MainContentRepo;
pub use product_repo::ProductRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
