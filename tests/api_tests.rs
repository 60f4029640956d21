//! HTTP API Tests
//!
//! Router-level tests for the stateless evaluation endpoints. The pool is
//! created lazily and never connected; these endpoints do not touch the
//! database.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

use lendfriend_server::middleware::{self, RateLimiter};
use lendfriend_server::routes;
use lendfriend_server::scoring::NormalizerRegistry;
use lendfriend_server::services::ConnectionStore;
use lendfriend_server::state::AppState;

fn test_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/lendfriend_test")
        .unwrap();
    let state = AppState::new(
        Arc::new(ConnectionStore::new(pool)),
        Arc::new(NormalizerRegistry::with_default_sources()),
    );

    Router::new()
        .merge(routes::underwriting_routes())
        .merge(routes::loan_status_routes())
        .with_state(state)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// ============================================================================
// Underwriting Endpoint
// ============================================================================

#[tokio::test]
async fn test_underwriting_approval_response_shape() {
    let (status, body) = post_json(
        test_app(),
        "/api/underwriting/evaluate",
        json!({
            "creditScore": 80,
            "monthlyRevenue": 1000.0,
            "requestedAmount": 10000.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], json!(true));
    assert_eq!(body["maxFundingAmount"], json!(6000.0));
    let rate = body["interestRate"].as_f64().unwrap();
    assert!((rate - 0.075).abs() < 1e-9);
    assert_eq!(body["riskLevel"], json!("low"));
    assert!(body["conditions"].is_array());
}

#[tokio::test]
async fn test_underwriting_decline_is_http_ok() {
    let (status, body) = post_json(
        test_app(),
        "/api/underwriting/evaluate",
        json!({
            "creditScore": 20,
            "monthlyRevenue": 1000.0,
            "requestedAmount": 5000.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approved"], json!(false));
    assert_eq!(body["maxFundingAmount"], json!(0.0));
}

#[tokio::test]
async fn test_underwriting_rejects_out_of_range_score() {
    let (status, body) = post_json(
        test_app(),
        "/api/underwriting/evaluate",
        json!({
            "creditScore": 101,
            "monthlyRevenue": 1000.0,
            "requestedAmount": 5000.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
}

// ============================================================================
// Loan Status Endpoint
// ============================================================================

#[tokio::test]
async fn test_loan_status_paid_off_response() {
    let (status, body) = post_json(
        test_app(),
        "/api/loan-status",
        json!({
            "disbursementTime": 0,
            "termPeriods": 4,
            "principal": 1000,
            "totalRepaid": 1000
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("PAID_OFF"));
    assert_eq!(body["isFullyRepaid"], json!(true));
}

#[tokio::test]
async fn test_loan_status_rejects_negative_amounts() {
    let (status, body) = post_json(
        test_app(),
        "/api/loan-status",
        json!({
            "disbursementTime": 0,
            "termPeriods": 4,
            "principal": -1,
            "totalRepaid": 0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));
}

// ============================================================================
// Middleware
// ============================================================================

#[tokio::test]
async fn test_security_headers_on_responses() {
    let app = test_app().layer(axum::middleware::from_fn(middleware::security_headers));
    let request = Request::builder()
        .method("POST")
        .uri("/api/loan-status")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "disbursementTime": 0,
                "termPeriods": 4,
                "principal": 1000,
                "totalRepaid": 0
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();

    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["cache-control"], "no-store");
    assert_eq!(
        headers["content-security-policy"],
        "default-src 'none'; frame-ancestors 'none'"
    );
}

#[tokio::test]
async fn test_rate_limit_covers_api_routes_only() {
    let limiter = RateLimiter::per_day(1);
    let app = Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
        .merge(test_app().layer(axum::middleware::from_fn(move |req, next| {
            let limiter = limiter.clone();
            middleware::rate_limit_layer(limiter)(req, next)
        })));

    let body = json!({
        "disbursementTime": 0,
        "termPeriods": 4,
        "principal": 1000,
        "totalRepaid": 0
    });

    let (status, _) = post_json(app.clone(), "/api/loan-status", body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_json(app.clone(), "/api/loan-status", body).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    // Health probes sit outside the capped surface
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/nonexistent")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
