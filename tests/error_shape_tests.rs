mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{request, send, test_app};
use serde_json::json;

#[tokio::test]
async fn wrong_method_on_known_path_gets_json_404() {
    let app = test_app().await;

    for (method, uri) in [
        ("PUT", "/api/v1/books"),
        ("GET", "/api/v1/auth/login"),
        ("POST", "/health"),
    ] {
        let (status, body) = send(&app, request(method, uri, None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], format!("Can't find {uri} on this server!"));
    }
}

#[tokio::test]
async fn malformed_query_string_is_a_validation_error() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        request("GET", "/api/v1/books?page=1&page=2", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(
        body["message"].as_str().is_some_and(|m| m.contains("page")),
        "{body}"
    );
}

#[tokio::test]
async fn oversized_body_gets_json_413() {
    let app = test_app().await;
    let password = "a".repeat(folio::router::MAX_BODY_SIZE + 1024);
    let payload = json!({ "username": "big", "password": password }).to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .expect("failed to build request");

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Request body too large");
}

#[tokio::test]
async fn body_under_the_limit_is_accepted() {
    let app = test_app().await;
    let username = "u".repeat(folio::router::MAX_BODY_SIZE / 2);
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/auth/register",
            Some(json!({ "username": username, "password": "pw" })),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
