//! HTTP client configuration and request execution.

use crate::error::{Error, Result};
use crate::models::Credential;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Backend used when nothing was configured at build time.
pub const FALLBACK_BASE_URL: &str = "http://localhost:8000/";

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("badchef/", env!("CARGO_PKG_VERSION"));

/// Base URL baked in at build time through `BADCHEF_BACKEND_URL`.
pub fn default_base_url() -> String {
    option_env!("BADCHEF_BACKEND_URL")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(FALLBACK_BASE_URL)
        .to_owned()
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL for API requests.
    pub base_url: String,
    /// Connection timeout. `None` waits as long as the OS does.
    pub connect_timeout: Option<Duration>,
    /// Read timeout. `None` waits indefinitely.
    pub read_timeout: Option<Duration>,
    /// User-Agent header.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout: None,
            read_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpConfig {
    /// Resolve a relative API path to a full URL.
    pub fn resolve_url(&self, api: &str) -> Result<Url> {
        if api.starts_with("http://") || api.starts_with("https://") {
            return Url::parse(api).map_err(Error::Url);
        }

        let mut base = self.base_url.trim().to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }

        Url::parse(&base)
            .and_then(|b| b.join(api.trim_start_matches('/')))
            .map_err(Error::Url)
    }
}

/// Build a reqwest client with the given configuration.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder().gzip(true);

    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = config.read_timeout {
        builder = builder.read_timeout(timeout);
    }

    builder.build().map_err(Error::Network)
}

/// How a response status should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credential involved.
    Public,
    /// Login or sign-up: 400/401 mean the submitted credentials were rejected.
    CredentialExchange,
    /// Bearer-authenticated: 401 means the stored token went stale.
    Authenticated,
}

/// A response body together with its status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Map the status onto the error taxonomy, passing successes through.
    pub fn check(self, access: Access) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }

        let code = self.status.as_u16();
        let detail = extract_detail(&self.body).unwrap_or_else(|| {
            self.status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_owned()
        });

        Err(match (code, access) {
            (400 | 401, Access::CredentialExchange) => Error::authentication(code, detail),
            (401, Access::Authenticated) => Error::Expired(detail),
            (404, _) => Error::NotFound(detail),
            _ => Error::api(code, detail),
        })
    }

    /// Decode the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(Error::Json)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Handles `{"detail": "..."}` and validation errors of the form
/// `{"detail": [{"msg": "..."}]}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        other => Some(other.to_string()),
    }
}

/// HTTP request executor.
pub struct HttpExecutor<'a> {
    client: &'a Client,
    config: &'a HttpConfig,
}

impl<'a> HttpExecutor<'a> {
    /// Create a new executor.
    pub fn new(client: &'a Client, config: &'a HttpConfig) -> Self {
        Self { client, config }
    }

    /// Build a request with common headers.
    fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/json")
    }

    /// Execute a request. The credential, if any, is attached to this
    /// request only.
    pub async fn send(
        &self,
        method: Method,
        api: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        credential: Option<&Credential>,
    ) -> Result<RawResponse> {
        let url = self.config.resolve_url(api)?;
        log::debug!("{} {}", method, url);

        let mut request = self.build_request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(credential) = credential {
            request = request.header(AUTHORIZATION, credential.bearer());
        }

        let response = request.send().await.map_err(Error::Network)?;
        let status = response.status();
        let body = response.text().await.map_err(Error::Network)?;

        log::debug!("-> {}", status);
        Ok(RawResponse { status, body })
    }
}
