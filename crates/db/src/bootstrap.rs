//! Idempotent schema creation and administrator seeding.
//!
//! Runs on every process start. Each step holds a transaction-scoped
//! advisory lock so two instances booting at once cannot race on
//! `CREATE TABLE` or insert two seed accounts.

use sqlx::{Postgres, Transaction};
use techflow_core::roles::ROLE_ADMIN;

use crate::DbPool;

/// Advisory lock key shared by every bootstrap step.
const BOOTSTRAP_LOCK_KEY: i64 = 0x7465_6368_666c_6f77;

/// Tables and indexes, in dependency order. Every statement is a no-op when
/// the object already exists.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username VARCHAR(50) NOT NULL,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'user',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_users_username UNIQUE (username),
        CONSTRAINT ck_users_role CHECK (role IN ('admin', 'editor', 'user'))
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_categories_name UNIQUE (name)
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        description TEXT,
        price NUMERIC(10, 2) NOT NULL,
        image TEXT,
        category_id BIGINT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT fk_products_category FOREIGN KEY (category_id)
            REFERENCES categories (id) ON DELETE RESTRICT,
        CONSTRAINT ck_products_price CHECK (price >= 0)
    )",
    "CREATE INDEX IF NOT EXISTS idx_products_category_id ON products (category_id)",
    "CREATE TABLE IF NOT EXISTS main_content (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        description TEXT,
        kind TEXT NOT NULL,
        payload TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT ck_main_content_kind CHECK (kind IN ('imagen', 'video', 'texto'))
    )",
];

/// Credentials of the account created when no administrator exists.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub username: String,
    /// Argon2id PHC string; never the plaintext password.
    pub password_hash: String,
}

/// Create all tables and indexes that do not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = begin_locked(pool).await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::debug!(statements = SCHEMA.len(), "Schema verified");
    Ok(())
}

/// Insert the seed administrator if no user holds the admin role.
///
/// Returns `true` when a row was inserted.
pub async fn seed_admin(pool: &DbPool, seed: &SeedAdmin) -> Result<bool, sqlx::Error> {
    let mut tx = begin_locked(pool).await?;

    let admin_exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE role = $1)")
            .bind(ROLE_ADMIN)
            .fetch_one(&mut *tx)
            .await?;

    if admin_exists {
        tx.commit().await?;
        return Ok(false);
    }

    let inserted = sqlx::query(
        "INSERT INTO users (username, password_hash, role)
         VALUES ($1, $2, $3)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(&seed.username)
    .bind(&seed.password_hash)
    .bind(ROLE_ADMIN)
    .execute(&mut *tx)
    .await?
    .rows_affected()
        > 0;

    tx.commit().await?;

    if inserted {
        tracing::info!(username = %seed.username, "Seed administrator created");
    } else {
        tracing::warn!(
            username = %seed.username,
            "No administrator exists and the seed username is taken by a non-admin account",
        );
    }
    Ok(inserted)
}

/// Run [`ensure_schema`] followed by [`seed_admin`].
pub async fn bootstrap(pool: &DbPool, seed: &SeedAdmin) -> Result<(), sqlx::Error> {
    ensure_schema(pool).await?;
    seed_admin(pool, seed).await?;
    Ok(())
}

async fn begin_locked(pool: &DbPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(BOOTSTRAP_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
