mod common;

use serde_json::Value;
use sqlx::PgPool;

#[sqlx::test]
async fn test_health_check_success(pool: PgPool) {
    let server = common::make_server(pool);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[sqlx::test]
async fn test_health_check_database_down(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    pool.close().await;

    let server = axum_test::TestServer::new(bookmark_api::routes::router(state)).unwrap();
    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);

    let body = response.json::<Value>();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"]["status"], "error");
}
