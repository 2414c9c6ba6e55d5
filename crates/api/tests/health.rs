//! Integration tests for the health endpoint and cross-cutting HTTP
//! behaviour: 404s, slash normalization, request ids, CORS preflight.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// /health
// ---------------------------------------------------------------------------

/// A healthy deployment reports ok with its version.
#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

/// With the pool closed the endpoint still answers 200, but flags the
/// database as down.
#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_degraded_without_database(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    pool.close().await;

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Routing behaviour
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/no-such-route").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// `/health/` and `/health` hit the same handler thanks to trailing-slash
/// normalization outside the router.
#[sqlx::test(migrations = "../../db/migrations")]
async fn trailing_slash_is_normalized(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

// ---------------------------------------------------------------------------
// Middleware stack
// ---------------------------------------------------------------------------

/// Every response carries a generated x-request-id.
#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_carry_a_request_id(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;

    let header = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header should be set")
        .to_str()
        .unwrap();
    assert!(
        Uuid::parse_str(header).is_ok(),
        "x-request-id should be a UUID, got '{header}'"
    );
}

/// Preflight from the configured origin is allowed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_configured_origin(pool: PgPool) {
    // OPTIONS with the CORS negotiation headers; the helper functions
    // don't cover this shape.
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/tareas")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "content-type,authorization")
        .body(Body::empty())
        .unwrap();
    let response = common::build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .expect("allow-origin header missing")
            .to_str()
            .unwrap(),
        "http://localhost:5173"
    );
    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("allow-methods header missing")
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PATCH", "DELETE"] {
        assert!(
            allow_methods.contains(method),
            "allow-methods should include {method}, got: {allow_methods}"
        );
    }
}
