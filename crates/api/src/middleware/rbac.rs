//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role lacks a
//! [`Capability`]. The decision itself is [`Role::can`]; these types only let
//! handlers state the requirement in their signature.
//!
//! ```ignore
//! async fn delete_product(CanDeleteCatalog(user): CanDeleteCatalog) -> AppResult<StatusCode> {
//!     // user.role is guaranteed to hold DeleteCatalog here
//!     Ok(StatusCode::NO_CONTENT)
//! }
//! ```

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use techflow_core::error::CoreError;
use techflow_core::roles::Capability;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Reject `user` with 403 unless its role holds `capability`.
pub fn authorize(user: &AuthUser, capability: Capability) -> Result<(), AppError> {
    if user.role.can(capability) {
        return Ok(());
    }
    tracing::warn!(
        user_id = user.user_id,
        role = %user.role,
        ?capability,
        "Access denied"
    );
    Err(AppError::Core(CoreError::Forbidden(
        capability.denial_message().into(),
    )))
}

macro_rules! capability_extractor {
    ($(#[$meta:meta])* $name:ident => $capability:expr) => {
        $(#[$meta])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let user = AuthUser::from_request_parts(parts, state).await?;
                authorize(&user, $capability)?;
                Ok($name(user))
            }
        }
    };
}

capability_extractor!(
    /// Requires [`Capability::ManageUsers`] (admin).
    CanManageUsers => Capability::ManageUsers
);

capability_extractor!(
    /// Requires [`Capability::EditCatalog`] (admin or editor).
    CanEditCatalog => Capability::EditCatalog
);

capability_extractor!(
    /// Requires [`Capability::DeleteCatalog`] (admin).
    CanDeleteCatalog => Capability::DeleteCatalog
);

capability_extractor!(
    /// Requires [`Capability::ViewStatistics`] (any authenticated role).
    CanViewStatistics => Capability::ViewStatistics
);

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use techflow_core::roles::Role;

    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: 1,
            username: "tester".into(),
            role,
        }
    }

    #[test]
    fn editor_can_edit_but_not_delete() {
        assert!(authorize(&user(Role::Editor), Capability::EditCatalog).is_ok());
        assert_matches!(
            authorize(&user(Role::Editor), Capability::DeleteCatalog),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }

    #[test]
    fn plain_user_cannot_manage_users() {
        assert_matches!(
            authorize(&user(Role::User), Capability::ManageUsers),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
        assert!(authorize(&user(Role::User), Capability::ViewStatistics).is_ok());
    }

    #[test]
    fn admin_holds_every_capability() {
        let admin = user(Role::Admin);
        for capability in [
            Capability::ManageUsers,
            Capability::EditCatalog,
            Capability::DeleteCatalog,
            Capability::ViewStatistics,
        ] {
            assert!(authorize(&admin, capability).is_ok());
        }
    }
}
