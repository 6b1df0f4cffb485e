//! HTTP request/response types and the transport seam.
//!
//! # Design
//! `RestClient` describes every request as a plain `HttpRequest` value and
//! hands it to a `Transport`, which performs the network round-trip and
//! returns a plain `HttpResponse`. Swapping the transport lets tests record
//! exactly what would have gone over the wire without opening a socket.
//!
//! All fields use owned types (`String`, `Vec`) so values can be cloned into
//! recorders and passed across the FFI crate without lifetime concerns.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ClientError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
}

impl HttpMethod {
    /// The wire token, e.g. `"GET"`.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses an exact, upper-case method token. `"get"` is rejected.
impl FromStr for HttpMethod {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "PUT" => Ok(HttpMethod::Put),
            "POST" => Ok(HttpMethod::Post),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(ClientError::RequestConstruction(format!(
                "unsupported method: {other:?}"
            ))),
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is fully resolved (base, path and query string). `body` is always
/// `None` for GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data. `body` holds the full payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Status code with its canonical reason, e.g. `"404 Not Found"`.
    pub fn status_line(&self) -> String {
        match ureq::http::StatusCode::from_u16(self.status) {
            Ok(code) => code.to_string(),
            Err(_) => self.status.to_string(),
        }
    }
}

/// Executes an `HttpRequest` synchronously.
///
/// Implementations return `ClientError::Transport` when the exchange fails
/// at the network level and `ClientError::Read` when the body cannot be read
/// in full. Non-2xx statuses are not errors.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        (**self).execute(request)
    }
}
