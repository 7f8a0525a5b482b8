#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use deskbook_api::auth::jwt::{generate_access_token, JwtConfig};
use deskbook_api::config::ServerConfig;
use deskbook_api::router::build_app_router;
use deskbook_api::state::AppState;
use deskbook_core::calendar::BookingPolicy;
use deskbook_core::clock::FixedClock;
use deskbook_core::roles::{ROLE_ADMIN, ROLE_USER};

const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";

/// "Today" for every API test: Sunday 2024-06-09, 10:00.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
}

/// The Monday after [`today`]. Bookable under the test policy.
pub fn booking_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
///
/// The booking policy is unrestricted so tests only have to avoid the past.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        booking: BookingPolicy::unrestricted(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a clock frozen at [`today`] 10:00.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let now = NaiveDateTime::new(today(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: Arc::new(FixedClock(now)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn token_for(user_id: Uuid, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

pub fn user_token(user_id: Uuid) -> String {
    token_for(user_id, ROLE_USER)
}

pub fn admin_token(user_id: Uuid) -> String {
    token_for(user_id, ROLE_ADMIN)
}

/// Insert a profile row so reservations resolve a display name.
pub async fn seed_profile(pool: &PgPool, user_id: Uuid, display_name: &str) {
    sqlx::query("INSERT INTO profiles (id, display_name) VALUES ($1, $2)")
        .bind(user_id)
        .bind(display_name)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
