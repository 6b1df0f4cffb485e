use std::collections::BTreeMap;

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw, returned by the fallback route.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inspection {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .fallback(inspect)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(body: String) -> String {
    body
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let code = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((code, format!("status {}", code.as_u16())))
}

async fn inspect(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Inspection> {
    tracing::debug!(method = %method, uri = %uri, "inspecting request");
    Json(Inspection {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: collect_headers(&headers),
        body,
    })
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        out.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn collect_headers_groups_repeated_names() {
        let mut headers = HeaderMap::new();
        headers.append("x-a", HeaderValue::from_static("1"));
        headers.append("x-a", HeaderValue::from_static("2"));
        headers.insert("accept", HeaderValue::from_static("text/plain"));

        let collected = collect_headers(&headers);
        assert_eq!(collected["x-a"], vec!["1", "2"]);
        assert_eq!(collected["accept"], vec!["text/plain"]);
    }

    #[test]
    fn inspection_roundtrips_through_json() {
        let inspection = Inspection {
            method: "PUT".to_string(),
            path: "/a".to_string(),
            query: Some("k=v&".to_string()),
            headers: BTreeMap::new(),
            body: "hello".to_string(),
        };
        let json = serde_json::to_string(&inspection).unwrap();
        let back: Inspection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inspection);
    }

    #[test]
    fn inspection_serializes_missing_query_as_null() {
        let inspection = Inspection {
            method: "GET".to_string(),
            path: "/".to_string(),
            query: None,
            headers: BTreeMap::new(),
            body: String::new(),
        };
        let json = serde_json::to_value(&inspection).unwrap();
        assert!(json["query"].is_null());
    }
}
