//! Repository for the `users` table.

use sqlx::{PgPool, Postgres, Transaction};
use techflow_core::roles::ROLE_ADMIN;
use techflow_core::types::DbId;

use crate::models::user::{AdminGuarded, CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, role, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Number of users holding the admin role. Logged at startup.
    pub async fn count_admins(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(ROLE_ADMIN)
            .fetch_one(pool)
            .await
    }

    /// Replace a user's username and role, and the password hash when one is
    /// given.
    ///
    /// Refuses to demote the last administrator.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<AdminGuarded<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(is_last_admin) = lock_and_check_last_admin(&mut tx, id).await? else {
            return Ok(AdminGuarded::NotFound);
        };
        if is_last_admin && input.role != ROLE_ADMIN {
            return Ok(AdminGuarded::LastAdmin);
        }

        let query = format!(
            "UPDATE users SET
                username = $2,
                role = $3,
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.role)
            .bind(&input.password_hash)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(AdminGuarded::Applied(user))
    }

    /// Delete a user. Refuses to delete the last administrator.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<AdminGuarded<()>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(is_last_admin) = lock_and_check_last_admin(&mut tx, id).await? else {
            return Ok(AdminGuarded::NotFound);
        };
        if is_last_admin {
            return Ok(AdminGuarded::LastAdmin);
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(AdminGuarded::Applied(()))
    }
}

/// Lock every admin row plus the target row, then report whether the target
/// is the only administrator. Returns `None` if the target does not exist.
///
/// Locking the admin set serializes concurrent demotions so two requests
/// cannot each remove "the other" admin.
async fn lock_and_check_last_admin(
    tx: &mut Transaction<'_, Postgres>,
    id: DbId,
) -> Result<Option<bool>, sqlx::Error> {
    let admin_ids: Vec<DbId> =
        sqlx::query_scalar("SELECT id FROM users WHERE role = $1 ORDER BY id FOR UPDATE")
            .bind(ROLE_ADMIN)
            .fetch_all(&mut **tx)
            .await?;

    let exists: Option<DbId> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(exists.map(|_| admin_ids.as_slice() == [id]))
}
