//! Thin synchronous REST client.
//!
//! # Overview
//! `RestClient` joins a base URL, a path and a query string, overlays
//! per-call headers on its defaults, sends the request through a
//! `Transport` and returns the response body as text. There is no retry,
//! timeout or response decoding; callers parse the text themselves.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`)
//!   so the network step sits behind the `Transport` trait. `UreqTransport`
//!   is the default.
//! - Per-call headers are merged into a copy of the defaults; the client
//!   itself is only mutated through `&mut self` setters.
//! - Every failure comes back as a `ClientError`; verbose diagnostics go to
//!   `tracing`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use client::{make_url_path, query_string, Headers, Params, RestClient};
pub use config::ClientConfig;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
