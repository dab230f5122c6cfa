#![allow(dead_code)]

use axum_test::TestServer;
use bookmark_api::application::services::TokenService;
use bookmark_api::routes;
use bookmark_api::state::AppState;
use chrono::Duration;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &[u8] = b"integration-test-secret-0123456789";
pub const TEST_PASSWORD: &str = "secret123";

pub fn create_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(
        TEST_JWT_SECRET,
        Duration::minutes(15),
        Duration::days(30),
    ))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), create_token_service())
}

/// Full route table without rate limiting.
pub fn make_server(pool: PgPool) -> TestServer {
    TestServer::new(routes::router(create_test_state(pool))).unwrap()
}

/// Registers `username` (email `<username>@example.com`) through the API
/// and returns an access token for it.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    let email = format!("{username}@example.com");

    server
        .post("/api/v1/auth/register")
        .json(&json!({ "username": username, "email": email, "password": TEST_PASSWORD }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["user"]["access"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Creates a bookmark through the API and returns its JSON record.
pub async fn create_bookmark(server: &TestServer, token: &str, url: &str) -> Value {
    let response = server
        .post("/api/v1/bookmarks")
        .authorization_bearer(token)
        .json(&json!({ "url": url, "body": "notes" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Inserts a user directly. The password hash is a placeholder, so this
/// user cannot log in.
pub async fn create_test_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, 'x') RETURNING id",
    )
    .bind(username)
    .bind(format!("{username}@example.com"))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_bookmark(pool: &PgPool, user_id: i64, url: &str, short_url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO bookmarks (url, short_url, user_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(url)
    .bind(short_url)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn visit_count(pool: &PgPool, short_url: &str) -> i64 {
    sqlx::query_scalar("SELECT visit FROM bookmarks WHERE short_url = $1")
        .bind(short_url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn user_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}
