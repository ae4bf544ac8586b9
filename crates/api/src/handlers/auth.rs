//! Handler for `POST /login`.

use std::sync::LazyLock;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use techflow_core::error::CoreError;
use techflow_core::roles::Role;
use techflow_core::types::DbId;
use techflow_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Message shared by every credential failure so callers cannot discover
/// existing usernames.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Hash verified when the username is unknown, so both rejection paths pay
/// for one Argon2 verification.
static DUMMY_PASSWORD_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("techflow-unknown-user").ok());

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "usuario", alias = "username")]
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: DbId,
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "rol")]
    pub role: Role,
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /login
///
/// Verify username + password and issue an access token carrying the role.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username = input.username.trim();
    if username.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "'usuario' and 'password' are required".into(),
        )));
    }

    let Some(user) = UserRepo::find_by_username(&state.pool, username).await? else {
        burn_dummy_verification(&input.password);
        tracing::info!(username, "Login rejected: unknown user");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let role: Role = user.role.parse()?;
    let access_token =
        generate_access_token(user.id, &user.username, role.as_str(), &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %role, "User logged in");

    Ok(Json(LoginResponse {
        id: user.id,
        username: user.username,
        role,
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}

/// Run a verification whose result is discarded.
fn burn_dummy_verification(password: &str) {
    if let Some(hash) = DUMMY_PASSWORD_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}
