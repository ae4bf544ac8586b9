//! Domain types and pure logic shared by the database and API crates.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod media;
pub mod roles;
pub mod stats;
pub mod types;
pub mod validation;
