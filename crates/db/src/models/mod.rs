//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row. Serde names
//!   follow the console's JSON contract (`nombre`, `precio`, ...).
//! - A save DTO used for both inserts and full-field updates

pub mod category;
pub mod main_content;
pub mod product;
pub mod stats;
pub mod user;
