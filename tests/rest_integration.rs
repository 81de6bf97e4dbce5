// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for the REST API.
//!
//! The downstream statistics service is pointed at an unroutable local port,
//! so every factorization response exercises the graceful degradation path.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use qr_server::rest;
use qr_server::{AdminCredentials, ApiContext, Claims, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret";

/// Create a test router with an unreachable downstream service.
fn create_test_app(admin: Option<AdminCredentials>) -> Router {
    let config = ServerConfig::new(SECRET)
        .with_node_api_url("http://127.0.0.1:1")
        .with_stats_timeout(Duration::from_secs(1))
        .with_admin(admin);
    let ctx = Arc::new(ApiContext::new(config).unwrap());
    rest::router(ctx)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json_with_token(uri: &str, body: &Value, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper to get a response body as JSON.
async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in through the API and return the issued token.
async fn obtain_token(app: Router) -> String {
    let response = app
        .oneshot(post_json(
            "/api/v1/login",
            &json!({"username": "alice", "password": "secret"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    body["token"].as_str().unwrap().to_string()
}

// ========== Health ==========

#[tokio::test]
async fn test_health_requires_no_auth() {
    let app = create_test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "qr-server");
}

// ========== Login ==========

#[tokio::test]
async fn test_login_open_mode_accepts_any_pair() {
    let app = create_test_app(None);
    let token = obtain_token(app).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_empty_username_rejected() {
    let app = create_test_app(None);

    let response = app
        .oneshot(post_json(
            "/api/v1/login",
            &json!({"username": "", "password": "secret"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_empty_password_rejected_with_admin_configured() {
    let app = create_test_app(Some(AdminCredentials::new("admin", "")));

    let response = app
        .oneshot(post_json(
            "/api/v1/login",
            &json!({"username": "admin", "password": ""}),
        ))
        .await
        .unwrap();

    // Empty credentials are a 400 regardless of the configured admin pair.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = create_test_app(None);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/login")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_admin_mismatch_rejected() {
    let app = create_test_app(Some(AdminCredentials::new("admin", "hunter2")));

    let response = app
        .oneshot(post_json(
            "/api/v1/login",
            &json!({"username": "admin", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_admin_match_accepted() {
    let app = create_test_app(Some(AdminCredentials::new("admin", "hunter2")));

    let response = app
        .oneshot(post_json(
            "/api/v1/login",
            &json!({"username": "admin", "password": "hunter2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert!(body["token"].as_str().is_some());
}

// ========== QR Factorization ==========

#[tokio::test]
async fn test_qr_requires_token() {
    let app = create_test_app(None);

    let response = app
        .oneshot(post_json(
            "/api/v1/matrix/qr",
            &json!({"matrix": [[1.0, 2.0], [3.0, 4.0]]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_qr_rejects_garbage_token() {
    let app = create_test_app(None);

    let response = app
        .oneshot(post_json_with_token(
            "/api/v1/matrix/qr",
            &json!({"matrix": [[1.0, 2.0], [3.0, 4.0]]}),
            "not.a.token",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_qr_rejects_expired_token() {
    let app = create_test_app(None);

    let now = jsonwebtoken::get_current_timestamp();
    let claims = Claims {
        username: "alice".to_string(),
        iat: now - 48 * 60 * 60,
        exp: now - 24 * 60 * 60,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let response = app
        .oneshot(post_json_with_token(
            "/api/v1/matrix/qr",
            &json!({"matrix": [[1.0, 2.0], [3.0, 4.0]]}),
            &expired,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_qr_happy_path_degrades_without_statistics() {
    let app = create_test_app(None);
    let token = obtain_token(app.clone()).await;

    let response = app
        .oneshot(post_json_with_token(
            "/api/v1/matrix/qr",
            &json!({"matrix": [[12.0, -51.0, 4.0], [6.0, 167.0, -68.0], [-4.0, 24.0, -41.0]]}),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;

    assert_eq!(body["original"].as_array().unwrap().len(), 3);
    assert_eq!(body["Q"].as_array().unwrap().len(), 3);
    assert_eq!(body["Q"][0].as_array().unwrap().len(), 3);
    assert_eq!(body["R"].as_array().unwrap().len(), 3);
    assert_eq!(body["R"][0].as_array().unwrap().len(), 3);

    // Downstream is unreachable, so statistics must be omitted.
    assert!(body.get("statistics").is_none());
}

#[tokio::test]
async fn test_qr_economic_shape_for_tall_input() {
    let app = create_test_app(None);
    let token = obtain_token(app.clone()).await;

    let response = app
        .oneshot(post_json_with_token(
            "/api/v1/matrix/qr",
            &json!({"matrix": [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]]}),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;

    assert_eq!(body["Q"].as_array().unwrap().len(), 4);
    assert_eq!(body["Q"][0].as_array().unwrap().len(), 2);
    assert_eq!(body["R"].as_array().unwrap().len(), 2);
    assert_eq!(body["R"][0].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_qr_rejects_wide_matrix() {
    let app = create_test_app(None);
    let token = obtain_token(app.clone()).await;

    let response = app
        .oneshot(post_json_with_token(
            "/api/v1/matrix/qr",
            &json!({"matrix": [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]}),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("at least as many rows as columns"));
}

#[tokio::test]
async fn test_qr_rejects_jagged_matrix() {
    let app = create_test_app(None);
    let token = obtain_token(app.clone()).await;

    let response = app
        .oneshot(post_json_with_token(
            "/api/v1/matrix/qr",
            &json!({"matrix": [[1.0, 2.0], [3.0, 4.0, 5.0]]}),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_qr_rejects_empty_matrix() {
    let app = create_test_app(None);
    let token = obtain_token(app.clone()).await;

    let response = app
        .oneshot(post_json_with_token(
            "/api/v1/matrix/qr",
            &json!({"matrix": []}),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_qr_rejects_malformed_body() {
    let app = create_test_app(None);
    let token = obtain_token(app.clone()).await;

    let response = app
        .oneshot(post_json_with_token(
            "/api/v1/matrix/qr",
            &json!({"matrix": [["a", "b"]]}),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
