//! Router-level tests that exercise the HTTP boundary without a database:
//! the guard rejects before any handler runs, and identifier/payload
//! validation rejects before any store call.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::{AppConfig, Environment};
use crate::{app, auth, database, AppState};

const JWT_SECRET: &str = "router-test-secret";

/// State backed by a lazy pool: no connection is attempted unless a handler
/// actually reaches the store, which none of these tests do.
fn test_state() -> AppState {
    let config = AppConfig {
        environment: Environment::Development,
        database_url: "postgres://postgres@127.0.0.1:1/portfolio_router_test".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        password_salt: "router-test-salt".into(),
        allowed_origins: vec!["http://localhost:5173".into()],
    };
    let pool = database::connect_lazy(&config.database_url).expect("lazy pool");
    AppState {
        pool,
        config: Arc::new(config),
    }
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app(test_state()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    let token = auth::issue_token("tester", JWT_SECRET).unwrap();
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn banner_routes_respond() {
    let response = app(test_state())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = send(Request::builder().uri("/api").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Portfolio API is ready!");
}

#[tokio::test]
async fn portfolio_info_is_static() {
    let (status, body) = send(
        Request::builder()
            .uri("/api/portfolio-info")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["name"].is_string());
    assert!(body["github"].is_string());
}

#[tokio::test]
async fn mutating_routes_reject_anonymous_requests() {
    for (method, uri) in [
        ("POST", "/api/skills/add"),
        ("PUT", "/api/skills/00000000-0000-0000-0000-000000000000"),
        ("DELETE", "/api/skills/00000000-0000-0000-0000-000000000000"),
        ("POST", "/api/projects/add"),
        ("PUT", "/api/projects/update?projId=x"),
        ("DELETE", "/api/projects/delete?projId=x"),
        ("POST", "/api/experience/add"),
        ("PUT", "/api/experience/update?expId=x"),
        ("DELETE", "/api/experience/delete?expId=x"),
    ] {
        let (status, body) = send(json_request(method, uri, "{}")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Unauthorized: Admin access required.");
    }
}

#[tokio::test]
async fn invalid_tokens_are_rejected() {
    let (status, _) = send(
        Request::builder()
            .method("POST")
            .uri("/api/skills/add")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Bearer not.a.token")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // signed with a different secret
    let token = auth::issue_token("tester", "some-other-secret").unwrap();
    let (status, _) = send(
        Request::builder()
            .method("POST")
            .uri("/api/skills/add")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_identifiers_fail_before_the_store() {
    let (status, body) =
        send(authed_json_request("PUT", "/api/skills/not-an-id", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid Skill ID format");

    let (status, body) =
        send(authed_json_request("DELETE", "/api/skills/not-an-id", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid Skill ID format");

    let (status, body) = send(authed_json_request(
        "DELETE",
        "/api/projects/delete?projId=not-an-id",
        "{}",
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid Project ID format");
}

#[tokio::test]
async fn project_mutations_require_the_query_identifier() {
    let (status, body) =
        send(authed_json_request("PUT", "/api/projects/update", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Project ID (projId) is required in query string"
    );

    let (status, body) =
        send(authed_json_request("DELETE", "/api/experience/delete", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Experience ID (expId) is required in query string"
    );
}

#[tokio::test]
async fn missing_required_fields_fail_validation() {
    let (status, body) = send(authed_json_request("POST", "/api/skills/add", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required field: name");

    let (status, body) = send(authed_json_request(
        "POST",
        "/api/experience/add",
        r#"{"title": "Engineer"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(json_request(
        "POST",
        "/api/admin/register",
        r#"{"user": "admin"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_without_credentials_is_unauthorized() {
    let (status, body) = send(json_request(
        "POST",
        "/api/admin/login",
        r#"{"user": "admin"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn logout_is_client_side() {
    let (status, body) = send(
        Request::builder()
            .uri("/api/admin/logout")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Logged out");
}
