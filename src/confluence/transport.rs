//! HTTP transport abstraction and the reqwest-backed implementation.
//!
//! [`ContentClient`](super::client::ContentClient) only builds requests and
//! interprets responses. Delivering them (auth, timeouts, TLS) is the job of
//! an [`HttpTransport`].

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use url::Url;

use super::error::BoxError;

/// A single outbound HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
  pub method: Method,
  pub url: Url,
  pub headers: Vec<(String, String)>,
  pub body: Option<Vec<u8>>,
}

impl HttpRequest {
  /// Create a request without headers or body.
  pub fn new(method: Method, url: Url) -> Self {
    Self {
      method,
      url,
      headers: Vec::new(),
      body: None,
    }
  }

  /// Append a header.
  pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.push((name.into(), value.into()));
    self
  }

  /// Attach a body.
  pub fn body(mut self, body: Vec<u8>) -> Self {
    self.body = Some(body);
    self
  }

  /// Look up a header value by case-insensitive name.
  pub fn header_value(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(key, _)| key.eq_ignore_ascii_case(name))
      .map(|(_, value)| value.as_str())
  }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: u16,
  pub body: Vec<u8>,
}

impl HttpResponse {
  pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  /// Whether the status is in the 2xx range.
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// Capability to deliver HTTP requests.
///
/// Implementations report failures to reach the server as errors; any
/// response the server sends, including error statuses, is returned as an
/// [`HttpResponse`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
  /// Send `request` and wait for the full response body.
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

/// Connection settings for a Confluence instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// REST API root, e.g. `https://example.atlassian.net/wiki/rest/api`.
  pub base_url: String,
  /// Basic-auth username and API token.
  pub credentials: Option<(String, String)>,
  /// Per-request timeout.
  pub timeout: Duration,
}

/// REST API path used by Confluence Cloud.
pub const DEFAULT_API_PATH: &str = "/wiki/rest/api";

impl ClientConfig {
  /// Configuration for an API root with no credentials and a 30 second
  /// timeout.
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      credentials: None,
      timeout: Duration::from_secs(30),
    }
  }

  /// Configuration for an instance URL plus an API path such as
  /// [`DEFAULT_API_PATH`].
  pub fn for_instance(instance_url: &str, api_path: &str) -> Self {
    let instance = instance_url.trim_end_matches('/');
    let path = api_path.trim_matches('/');
    if path.is_empty() {
      Self::new(instance)
    } else {
      Self::new(format!("{instance}/{path}"))
    }
  }

  pub fn with_basic_auth(mut self, username: impl Into<String>, token: impl Into<String>) -> Self {
    self.credentials = Some((username.into(), token.into()));
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
  client: reqwest::Client,
  auth_header: Option<String>,
}

impl ReqwestTransport {
  /// Build a transport from `config`.
  ///
  /// # Errors
  /// Returns an error if the underlying `reqwest::Client` cannot be built.
  pub fn new(config: &ClientConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(config.timeout)
      .user_agent(format!(
        "confluence-content/{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("TARGET")
      ))
      .build()
      .context("Failed to create HTTP client")?;

    Ok(Self {
      client,
      auth_header: config
        .credentials
        .as_ref()
        .map(|(username, token)| basic_auth_header(username, token)),
    })
  }
}

/// Encode a `Basic` authorization header value.
fn basic_auth_header(username: &str, token: &str) -> String {
  let credentials = format!("{username}:{token}");
  format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
    let mut builder = self
      .client
      .request(request.method, request.url)
      .header(ACCEPT, "application/json");

    if let Some(auth) = &self.auth_header {
      builder = builder.header(AUTHORIZATION, auth);
    }
    for (name, value) in request.headers {
      builder = builder.header(name, value);
    }
    if let Some(body) = request.body {
      builder = builder.body(body);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;

    Ok(HttpResponse {
      status,
      body: body.to_vec(),
    })
  }
}
