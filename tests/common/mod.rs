#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh, empty store. Low bcrypt cost keeps the suite fast.
pub async fn test_app() -> Router {
    test_app_with_login_limit(0).await
}

/// Same as [`test_app`], with `attempts` failed logins allowed per minute.
pub async fn test_app_with_login_limit(attempts: u32) -> Router {
    let mut cfg = folio::config::Config::default();
    cfg.bcrypt_cost = 4;
    cfg.jwt_secret = "integration-test-secret".to_string();
    cfg.login_attempts_per_minute = attempts;

    let store = folio::service::store_actor::spawn()
        .await
        .expect("failed to spawn store actor");
    let state = folio::FolioState::new(store, &cfg).expect("failed to build app state");
    folio::folio_router(state)
}

pub fn request(method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("failed to build request")
}

/// Send one request; an empty body comes back as `Value::Null`.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let body = serde_json::from_slice(&bytes).expect("response body was not json");
    (status, body)
}

/// Register `username` and return a bearer token for it.
pub async fn login_as(app: &Router, username: &str) -> String {
    let creds = serde_json::json!({ "username": username, "password": "s3cret-pass" });
    let (status, _) = send(app, request("POST", "/api/v1/auth/register", Some(creds.clone()), None)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, request("POST", "/api/v1/auth/login", Some(creds), None)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}
