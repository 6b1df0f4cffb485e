//! Default `Transport` backed by a synchronous ureq agent.

use ureq::http::Uri;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, RequestBuilder};

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Blocking HTTP transport.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as data; `RestClient` returns their bodies like any
/// other. No timeout is set, so a hung peer blocks the caller.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap an agent the caller configured. Note that an agent with
    /// `http_status_as_error(true)` reports non-2xx responses as
    /// `ClientError::Transport`.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        validate_url(&request.url)?;

        let url = request.url.as_str();
        let body = request.body.as_deref().unwrap_or("").as_bytes();
        let result = match request.method {
            HttpMethod::Get => without_body(self.agent.get(url), &request.headers).call(),
            HttpMethod::Put => with_body(self.agent.put(url), &request.headers).send(body),
            HttpMethod::Post => with_body(self.agent.post(url), &request.headers).send(body),
            HttpMethod::Delete => {
                with_body(self.agent.delete(url).force_send_body(), &request.headers).send(body)
            }
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
                (name.as_str().to_string(), value)
            })
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| ClientError::Read(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Reject URLs ureq would fail on before any connection attempt.
fn validate_url(url: &str) -> Result<(), ClientError> {
    let uri: Uri = url
        .parse()
        .map_err(|e| ClientError::RequestConstruction(format!("invalid URL {url:?}: {e}")))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(ClientError::RequestConstruction(format!(
            "URL {url:?} needs a scheme and host"
        )));
    }
    Ok(())
}

fn without_body(
    mut builder: RequestBuilder<WithoutBody>,
    headers: &[(String, String)],
) -> RequestBuilder<WithoutBody> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn with_body(
    mut builder: RequestBuilder<WithBody>,
    headers: &[(String, String)],
) -> RequestBuilder<WithBody> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}
