//! Client configuration loaded from JSON or the process environment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

pub const ENV_BASE_URL: &str = "RESTCLIENT_BASE_URL";
pub const ENV_VERBOSE: &str = "RESTCLIENT_VERBOSE";
pub const ENV_HEADERS: &str = "RESTCLIENT_HEADERS";

/// Everything needed to construct a `RestClient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
    #[serde(default)]
    pub verbose_logging: bool,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            default_headers: BTreeMap::new(),
            verbose_logging: false,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        serde_json::from_str(raw).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Read `RESTCLIENT_BASE_URL` (required), `RESTCLIENT_VERBOSE` and
    /// `RESTCLIENT_HEADERS` (a JSON object of header name to value).
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let base_url = lookup(ENV_BASE_URL)
            .ok_or_else(|| ClientError::Config(format!("{ENV_BASE_URL} is not set")))?;

        let verbose_logging = match lookup(ENV_VERBOSE) {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| ClientError::Config(format!("{ENV_VERBOSE}: not a boolean: {raw:?}")))?,
            None => false,
        };

        let default_headers = match lookup(ENV_HEADERS) {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| ClientError::Config(format!("{ENV_HEADERS}: {e}")))?,
            None => BTreeMap::new(),
        };

        Ok(Self {
            base_url,
            default_headers,
            verbose_logging,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
