pub mod auth;
pub mod categories;
pub mod main_content;
pub mod products;
pub mod stats;
pub mod users;
