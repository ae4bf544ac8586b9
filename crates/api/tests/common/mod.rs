#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use techflow_api::auth::jwt::JwtConfig;
use techflow_api::auth::password::hash_password;
use techflow_api::config::{SeedAdminConfig, ServerConfig};
use techflow_api::router::build_app_router;
use techflow_api::state::AppState;
use techflow_db::models::user::{CreateUser, User};
use techflow_db::repositories::UserRepo;
use techflow_db::PoolSettings;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5500` as CORS origin (matching the dev default)
/// and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5500".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        seed_admin: SeedAdminConfig {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        },
        pool: PoolSettings::default(),
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Create the schema (without seeding) and return the app.
pub async fn setup(pool: &PgPool) -> Router {
    techflow_db::bootstrap::ensure_schema(pool)
        .await
        .expect("schema creation should succeed");
    build_test_app(pool.clone())
}

/// Insert a user directly with a real Argon2 hash.
pub async fn create_user(pool: &PgPool, username: &str, password: &str, role: &str) -> User {
    let password_hash = hash_password(password).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Log in via the API and return the access token.
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "usuario": username, "password": password });
    let response = post_json(app, "/login", body, None).await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}

/// Create a user with `role` and return a token for it.
pub async fn token_for_role(pool: &PgPool, app: &Router, role: &str) -> String {
    let username = format!("{role}_tester");
    create_user(pool, &username, "password123", role).await;
    login(app, &username, "password123").await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, None, token).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), token).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), token).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, None, token).await
}

/// Send a raw body with an explicit content type.
pub async fn post_raw(app: &Router, uri: &str, body: &'static str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
