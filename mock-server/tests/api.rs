use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Inspection};
use tower::ServiceExt;

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(body.to_string())
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_returns_put_body() {
    let resp = app().oneshot(request("PUT", "/echo", "hello")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "hello");
}

#[tokio::test]
async fn echo_returns_empty_body_for_get() {
    let resp = app().oneshot(request("GET", "/echo", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn echo_accepts_delete_with_body() {
    let resp = app().oneshot(request("DELETE", "/echo", "gone")).await.unwrap();
    assert_eq!(body_bytes(resp).await, "gone");
}

// --- status ---

#[tokio::test]
async fn status_route_returns_requested_code() {
    let resp = app().oneshot(request("GET", "/status/418", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_bytes(resp).await, "status 418");
}

#[tokio::test]
async fn status_route_rejects_out_of_range_code() {
    let resp = app().oneshot(request("GET", "/status/42", "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- inspect ---

#[tokio::test]
async fn fallback_reports_method_path_query_and_body() {
    let req = Request::builder()
        .method("POST")
        .uri("/users/42?a=1&b=2&")
        .header("x-trace", "abc")
        .body("payload".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let seen: Inspection = body_json(resp).await;
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/users/42");
    assert_eq!(seen.query.as_deref(), Some("a=1&b=2&"));
    assert_eq!(seen.headers["x-trace"], vec!["abc"]);
    assert_eq!(seen.body, "payload");
}

#[tokio::test]
async fn fallback_without_query_reports_none() {
    let resp = app().oneshot(request("GET", "/plain", "")).await.unwrap();
    let seen: Inspection = body_json(resp).await;
    assert_eq!(seen.path, "/plain");
    assert!(seen.query.is_none());
    assert!(seen.body.is_empty());
}
