//! Handlers for the `/usuarios` resource (user management).
//!
//! All handlers require [`Capability::ManageUsers`](techflow_core::roles::Capability)
//! via [`CanManageUsers`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use techflow_core::error::CoreError;
use techflow_core::roles::Role;
use techflow_core::types::DbId;
use techflow_core::validation::{require_text, validate_password, MAX_USERNAME_LEN};
use techflow_db::models::user::{AdminGuarded, CreateUser, UpdateUser, UserResponse};
use techflow_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::CanManageUsers;
use crate::response::DataResponse;
use crate::state::AppState;

const LAST_ADMIN_MESSAGE: &str = "At least one administrator must remain";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /usuarios`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(rename = "usuario", alias = "username")]
    pub username: String,
    pub password: String,
    /// Defaults to `user` when omitted.
    #[serde(rename = "rol", alias = "role", default)]
    pub role: Option<String>,
}

/// Request body for `PUT /usuarios/{id}`.
///
/// Username and role are replaced; the password only when present.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "usuario", alias = "username")]
    pub username: String,
    #[serde(rename = "rol", alias = "role")]
    pub role: String,
    #[serde(default)]
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /usuarios
pub async fn list_users(
    State(state): State<AppState>,
    CanManageUsers(_admin): CanManageUsers,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /usuarios/{id}
pub async fn get_user(
    State(state): State<AppState>,
    CanManageUsers(_admin): CanManageUsers,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// POST /usuarios
///
/// Validate, hash the password, and return the new user with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    CanManageUsers(admin): CanManageUsers,
    AppJson(input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let username = require_text("usuario", &input.username, MAX_USERNAME_LEN)?;
    validate_password(&input.password)?;
    let role = match input.role.as_deref() {
        Some(raw) => raw.parse::<Role>()?,
        None => Role::User,
    };

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            password_hash,
            role: role.as_str().to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %role, created_by = admin.user_id, "User created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user.into() })))
}

/// PUT /usuarios/{id}
///
/// Replace username and role; re-hash the password only when one is sent.
/// Demoting the last administrator is refused with 409.
pub async fn update_user(
    State(state): State<AppState>,
    CanManageUsers(admin): CanManageUsers,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let username = require_text("usuario", &input.username, MAX_USERNAME_LEN)?;
    let role: Role = input.role.parse()?;

    let password_hash = match input.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => {
            validate_password(password)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let outcome = UserRepo::update(
        &state.pool,
        id,
        &UpdateUser {
            username,
            role: role.as_str().to_string(),
            password_hash,
        },
    )
    .await?;

    match outcome {
        AdminGuarded::Applied(user) => {
            tracing::info!(user_id = id, role = %role, updated_by = admin.user_id, "User updated");
            Ok(Json(DataResponse { data: user.into() }))
        }
        AdminGuarded::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        })),
        AdminGuarded::LastAdmin => Err(AppError::Core(CoreError::Conflict(
            LAST_ADMIN_MESSAGE.into(),
        ))),
    }
}

/// DELETE /usuarios/{id}
///
/// Returns 204 No Content. Administrators cannot delete their own account,
/// and the last administrator cannot be deleted.
pub async fn delete_user(
    State(state): State<AppState>,
    CanManageUsers(admin): CanManageUsers,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot delete your own account".into(),
        )));
    }

    match UserRepo::delete(&state.pool, id).await? {
        AdminGuarded::Applied(()) => {
            tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        AdminGuarded::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        })),
        AdminGuarded::LastAdmin => Err(AppError::Core(CoreError::Conflict(
            LAST_ADMIN_MESSAGE.into(),
        ))),
    }
}
