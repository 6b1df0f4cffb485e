//! Error types for the REST client.
//!
//! # Design
//! Every failure is returned to the caller as a `ClientError`; nothing in
//! this crate logs-and-exits. The variants follow the three places a request
//! can break: building it, sending it, and reading the reply body. `Config`
//! covers loading a `ClientConfig` from JSON or the environment.

use thiserror::Error;

/// Errors returned by `RestClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be built: malformed URL, unknown method token,
    /// or an odd number of URL template arguments.
    #[error("request construction failed: {0}")]
    RequestConstruction(String),

    /// Network-level failure: connection refused, DNS, TLS, I/O.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be read to completion.
    #[error("failed to read response body: {0}")]
    Read(String),

    /// A `ClientConfig` could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn is_read(&self) -> bool {
        matches!(self, ClientError::Read(_))
    }
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::BadUri(msg) => ClientError::RequestConstruction(msg),
            ureq::Error::Http(e) => ClientError::RequestConstruction(e.to_string()),
            other => ClientError::Transport(other.to_string()),
        }
    }
}
