//! The `RestClient` wrapper.
//!
//! # Design
//! `RestClient` holds a base URL, a set of default headers and a verbose
//! flag. Each verb method resolves `base + path + query string`, overlays the
//! per-call headers on a copy of the defaults, and hands an `HttpRequest` to
//! the transport. The response body comes back as text whatever the status.
//!
//! Per-call headers never leak into the stored defaults, so a client can be
//! shared between threads behind `&` without racing on header state. Defaults
//! change only through `set_default_header` / `remove_default_header`.

use std::collections::BTreeMap;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::transport::UreqTransport;

/// Query parameters, serialized in key order.
pub type Params = BTreeMap<String, String>;

/// Header set, one value per name.
pub type Headers = BTreeMap<String, String>;

/// Synchronous REST client returning response bodies as text.
#[derive(Debug, Clone)]
pub struct RestClient<T = UreqTransport> {
    base_url: String,
    default_headers: Headers,
    verbose_logging: bool,
    transport: T,
}

impl RestClient<UreqTransport> {
    /// Create a client backed by a fresh ureq agent. `headers` may be empty.
    pub fn new(base_url: &str, headers: Headers, verbose_logging: bool) -> Self {
        Self::with_transport(base_url, headers, verbose_logging, UreqTransport::new())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::new(
            &config.base_url,
            config.default_headers,
            config.verbose_logging,
        )
    }
}

impl<T: Transport> RestClient<T> {
    /// Create a client that sends through `transport`.
    pub fn with_transport(
        base_url: &str,
        headers: Headers,
        verbose_logging: bool,
        transport: T,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            default_headers: headers,
            verbose_logging,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    pub fn verbose_logging(&self) -> bool {
        self.verbose_logging
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Set a header sent with every later request, replacing any previous
    /// value under the same name in any letter case.
    pub fn set_default_header(&mut self, name: &str, value: &str) {
        insert_header(&mut self.default_headers, name, value);
    }

    /// Remove a default header, matching the name case-insensitively.
    pub fn remove_default_header(&mut self, name: &str) -> Option<String> {
        let key = self
            .default_headers
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))?
            .clone();
        self.default_headers.remove(&key)
    }

    /// Defaults overlaid with `headers`, one entry per header name compared
    /// case-insensitively. The stored defaults are untouched.
    pub fn merge_headers(&self, headers: &Headers) -> Headers {
        let mut merged = Headers::new();
        for (name, value) in self.default_headers.iter().chain(headers) {
            insert_header(&mut merged, name, value);
        }
        merged
    }

    /// Send one request to an already resolved `url` and return the body text.
    ///
    /// GET requests are sent without a body whatever `body` holds. With
    /// verbose logging on, the outgoing method, URL and `body` as given and
    /// then the response status and body are logged at `info`.
    pub fn http_request(
        &self,
        url: &str,
        method: HttpMethod,
        headers: &Headers,
        body: &str,
    ) -> Result<String, ClientError> {
        let payload = match method {
            HttpMethod::Get => None,
            _ => Some(body.to_string()),
        };
        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers: self.merge_headers(headers).into_iter().collect(),
            body: payload,
        };

        if self.verbose_logging {
            tracing::info!(method = %method, url = %url, body = %body, "sending request");
        }

        let response = self.transport.execute(&request)?;

        if self.verbose_logging {
            tracing::info!(
                status = %response.status_line(),
                url = %url,
                body = %response.body,
                "received response"
            );
        }
        Ok(response.body)
    }

    pub fn get(&self, path: &str, query: &Params, headers: &Headers) -> Result<String, ClientError> {
        self.send(HttpMethod::Get, path, query, headers, "")
    }

    pub fn put(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: &str,
    ) -> Result<String, ClientError> {
        self.send(HttpMethod::Put, path, query, headers, body)
    }

    pub fn post(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: &str,
    ) -> Result<String, ClientError> {
        self.send(HttpMethod::Post, path, query, headers, body)
    }

    pub fn delete(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: &str,
    ) -> Result<String, ClientError> {
        self.send(HttpMethod::Delete, path, query, headers, body)
    }

    /// Resolve `base + path + query` and send; failures are logged, then returned.
    pub fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: &str,
    ) -> Result<String, ClientError> {
        let url = format!("{}{}{}", self.base_url, path, query_string(query));
        self.http_request(&url, method, headers, body)
            .inspect_err(|err| {
                tracing::error!(method = %method, url = %url, error = %err, "HTTP request failed");
            })
    }

    /// Substitute find/replace `pairs` into `template` and prepend the base URL.
    ///
    /// ```
    /// # use restclient_core::RestClient;
    /// let client = RestClient::new("http://api.test", Default::default(), false);
    /// let url = client.make_url("/users/{id}", &["{id}", "42"]).unwrap();
    /// assert_eq!(url, "http://api.test/users/42");
    /// ```
    pub fn make_url(&self, template: &str, pairs: &[&str]) -> Result<String, ClientError> {
        let path = make_url_path(template, pairs)?;
        Ok(format!("{}{}", self.base_url, path))
    }
}

/// Serialize query parameters as `?k1=v1&k2=v2&`.
///
/// Returns an empty string for an empty map. The trailing `&` is part of the
/// format. Keys and values are written as given, without percent-encoding.
pub fn query_string(params: &Params) -> String {
    if params.is_empty() {
        return String::new();
    }
    let mut output = String::from("?");
    for (key, value) in params {
        output.push_str(key);
        output.push('=');
        output.push_str(value);
        output.push('&');
    }
    output
}

/// Insert `name`, dropping any entry whose name differs only in case.
fn insert_header(headers: &mut Headers, name: &str, value: &str) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}

/// Replace each find-term in `template` with the term that follows it in `pairs`.
///
/// All pairs are applied in one left-to-right pass, so replacement text is
/// never matched again. Where several find-terms match at the same position
/// the one listed first wins. An odd number of arguments is rejected.
pub fn make_url_path(template: &str, pairs: &[&str]) -> Result<String, ClientError> {
    if pairs.len() % 2 != 0 {
        return Err(ClientError::RequestConstruction(format!(
            "URL template arguments must come in find/replace pairs, got {}",
            pairs.len()
        )));
    }
    let pairs: Vec<(&str, &str)> = pairs.chunks_exact(2).map(|p| (p[0], p[1])).collect();

    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let matched = pairs.iter().find(|(find, _)| rest.starts_with(find));
        if let Some((find, replace)) = matched {
            output.push_str(replace);
            if !find.is_empty() {
                rest = &rest[find.len()..];
                continue;
            }
        }
        // No match, or an empty find-term: copy one character and move on.
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) => {
                output.push(c);
                rest = chars.as_str();
            }
            None => break,
        }
    }
    Ok(output)
}
