//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use techflow_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "rol")]
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// DTO for replacing a user's fields. The password is only changed when a
/// new hash is supplied.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub username: String,
    pub role: String,
    pub password_hash: Option<String>,
}

/// Result of a user mutation that must leave at least one administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminGuarded<T> {
    Applied(T),
    NotFound,
    /// The change would remove the last administrator; nothing was written.
    LastAdmin,
}
