use std::str::FromStr;
use std::time::Duration;

use techflow_db::PoolSettings;

use crate::auth::jwt::JwtConfig;

/// Default browser origins allowed by CORS: the production console and the
/// local static server used during development.
const DEFAULT_CORS_ORIGINS: &str = "https://admintechflow.com,http://localhost:5500";

/// Default request body ceiling (500 MiB). Media arrives inline as base64.
const DEFAULT_MAX_BODY_BYTES: usize = 500 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Account created at startup when no administrator exists.
    pub seed_admin: SeedAdminConfig,
    /// Connection pool sizing.
    pub pool: PoolSettings,
}

/// Plaintext seed credentials; hashed before they reach the database.
#[derive(Debug, Clone)]
pub struct SeedAdminConfig {
    pub username: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                             |
    /// |---------------------------|-----------------------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                                           |
    /// | `PORT`                    | `3000`                                              |
    /// | `CORS_ORIGINS`            | `https://admintechflow.com,http://localhost:5500`   |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                                |
    /// | `MAX_BODY_BYTES`          | `524288000`                                         |
    /// | `SEED_ADMIN_USERNAME`     | `admin`                                             |
    /// | `SEED_ADMIN_PASSWORD`     | `admin123`                                          |
    /// | `DB_MAX_CONNECTIONS`      | `10`                                                |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `30`                                                |
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable does not parse, or if the JWT
    /// configuration is invalid.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);
        let max_body_bytes: usize = env_or("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES);

        let seed_admin = SeedAdminConfig {
            username: std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),
        };

        let pool = PoolSettings {
            max_connections: env_or("DB_MAX_CONNECTIONS", techflow_db::DEFAULT_MAX_CONNECTIONS),
            acquire_timeout: Duration::from_secs(env_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                techflow_db::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            jwt: JwtConfig::from_env(),
            seed_admin,
            pool,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Read and parse an environment variable, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_origins_parse() {
        assert_eq!(
            parse_origins(DEFAULT_CORS_ORIGINS),
            vec!["https://admintechflow.com", "http://localhost:5500"]
        );
    }

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_origins(" https://a.example , ,https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn env_or_falls_back_when_unset() {
        let value: u64 = env_or("TECHFLOW_TEST_SURELY_UNSET_VAR", 42);
        assert_eq!(value, 42);
    }
}
