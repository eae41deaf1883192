use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tokio::time::Duration;
use tower::ServiceExt;

use snipstore_server::{AppState, REQUEST_ID_HEADER, build_app};
use snipstore_snippets::{ServiceConfig, SnippetService};

/// Helper: monta o app com estado saudável e URL pública fixa.
fn start_app() -> (Router, AppState) {
    let service = SnippetService::new(ServiceConfig {
        base_url: "http://test.local".into(),
        ..ServiceConfig::default()
    });
    let state = AppState::new(service);
    state.set_healthy(true);
    (build_app(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

fn create_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/snippets")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(name: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/snippets/{name}"))
        .body(Body::empty())
        .unwrap()
}

fn like_request(name: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/snippets/{name}/like"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, state) = start_app();
    let request = || Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, _) = send(&app, request()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    state.set_healthy(false);
    let (status, _) = send(&app, request()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_create_get() {
    let (app, _) = start_app();

    let (status, created) = send(
        &app,
        create_request(json!({"name": "a", "snippet": "hi", "expires_in": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["url"], "http://test.local/snippets/a");
    assert_eq!(created["name"], "a");
    assert_eq!(created["snippet"], "hi");
    assert!(created["expires_at"].is_string());
    assert!(created.get("expires_in").is_none());
    assert!(created.get("likes").is_none());

    let (status, got) = send(&app, get_request("a")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["name"], "a");
    assert_eq!(got["snippet"], "hi");
}

#[tokio::test]
async fn test_missing_snippet() {
    let (app, _) = start_app();

    let (status, _) = send(&app, get_request("nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, like_request("nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_like() {
    let (app, _) = start_app();
    send(
        &app,
        create_request(json!({"name": "b", "snippet": "x", "expires_in": 5})),
    )
    .await;

    let (status, liked) = send(&app, like_request("b")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(liked["likes"], 1);

    let (_, liked) = send(&app, like_request("b")).await;
    assert_eq!(liked["likes"], 2);

    let (_, got) = send(&app, get_request("b")).await;
    assert_eq!(got["likes"], 2);
}

#[tokio::test]
async fn test_create_overwrites() {
    let (app, _) = start_app();
    send(
        &app,
        create_request(json!({"name": "a", "snippet": "old", "expires_in": 30})),
    )
    .await;
    send(
        &app,
        create_request(json!({"name": "a", "snippet": "new", "expires_in": 30})),
    )
    .await;

    let (_, got) = send(&app, get_request("a")).await;
    assert_eq!(got["snippet"], "new");
}

#[tokio::test]
async fn test_create_validation() {
    let (app, _) = start_app();

    let (status, _) = send(
        &app,
        create_request(json!({"name": "", "snippet": "x", "expires_in": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        create_request(json!({"name": "a", "snippet": "x", "expires_in": u64::MAX})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Sem expires_in
    let (status, _) = send(&app, create_request(json!({"name": "a"}))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_request_id_header() {
    let (app, _) = start_app();

    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test(start_paused = true)]
async fn test_expired_snippet() {
    let (app, _) = start_app();
    send(
        &app,
        create_request(json!({"name": "a", "snippet": "hi", "expires_in": 1})),
    )
    .await;

    tokio::time::advance(Duration::from_secs(2)).await;

    let (status, _) = send(&app, get_request("a")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_likes() {
    let (app, _) = start_app();
    send(
        &app,
        create_request(json!({"name": "b", "snippet": "", "expires_in": 5})),
    )
    .await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let (status, _) = send(&app, like_request("b")).await;
            assert_eq!(status, StatusCode::OK);
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    let (_, got) = send(&app, get_request("b")).await;
    assert_eq!(got["likes"], 10);
}
