//! Role names and the capability table used for authorization.
//!
//! Every authorization decision in the API goes through [`Role::can`], so the
//! whole access policy lives in one `match`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_USER: &str = "user";

/// Legacy spellings still sent by older console builds.
const ROLE_ADMIN_LEGACY: &str = "administrador";
const ROLE_USER_LEGACY: &str = "usuario";

/// A user's role. Stored in the `users.role` column by its canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    User,
}

/// Classes of actions that require more than anonymous access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, read, update and delete user accounts.
    ManageUsers,
    /// Create and update categories, products and main content.
    EditCatalog,
    /// Delete categories, products and main content.
    DeleteCatalog,
    /// Read the aggregate statistics.
    ViewStatistics,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::User];

    /// Canonical storage and wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Editor => ROLE_EDITOR,
            Role::User => ROLE_USER,
        }
    }

    /// Whether this role is granted `capability`.
    pub fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers | Capability::DeleteCatalog => self == Role::Admin,
            Capability::EditCatalog => matches!(self, Role::Admin | Role::Editor),
            Capability::ViewStatistics => true,
        }
    }
}

impl Capability {
    /// Message returned with a 403 when a role lacks this capability.
    pub fn denial_message(self) -> &'static str {
        match self {
            Capability::ManageUsers => "Admin role required to manage users",
            Capability::EditCatalog => "Admin or editor role required",
            Capability::DeleteCatalog => "Admin role required to delete",
            Capability::ViewStatistics => "Authentication required",
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Parse a role name, case-insensitively, accepting the legacy aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ROLE_ADMIN | ROLE_ADMIN_LEGACY => Ok(Role::Admin),
            ROLE_EDITOR => Ok(Role::Editor),
            ROLE_USER | ROLE_USER_LEGACY => Ok(Role::User),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {ROLE_ADMIN}, {ROLE_EDITOR}, {ROLE_USER}"
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("editor".parse::<Role>().unwrap(), Role::Editor);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
    }

    #[test]
    fn parses_legacy_aliases_case_insensitively() {
        assert_eq!("Administrador".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" usuario ".parse::<Role>().unwrap(), Role::User);
    }

    #[test]
    fn rejects_unknown_role() {
        assert_matches!("superuser".parse::<Role>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn round_trips_through_as_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn only_admin_manages_users_and_deletes() {
        assert!(Role::Admin.can(Capability::ManageUsers));
        assert!(!Role::Editor.can(Capability::ManageUsers));
        assert!(!Role::User.can(Capability::ManageUsers));

        assert!(Role::Admin.can(Capability::DeleteCatalog));
        assert!(!Role::Editor.can(Capability::DeleteCatalog));
        assert!(!Role::User.can(Capability::DeleteCatalog));
    }

    #[test]
    fn editors_can_edit_catalog() {
        assert!(Role::Admin.can(Capability::EditCatalog));
        assert!(Role::Editor.can(Capability::EditCatalog));
        assert!(!Role::User.can(Capability::EditCatalog));
    }

    #[test]
    fn every_role_views_statistics() {
        assert!(Role::ALL.iter().all(|r| r.can(Capability::ViewStatistics)));
    }
}
