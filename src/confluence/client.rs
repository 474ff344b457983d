//! Confluence content client.

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use super::api::ContentApi;
use super::endpoint::{apply_expand, content_endpoint, resource_endpoint};
use super::error::{ContentError, RequestError};
use super::models::{Content, ContentUpdate, UserInfo};
use super::transport::{ClientConfig, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Client for the `/content` resource of a Confluence REST API.
#[derive(Clone)]
pub struct ContentClient<T = ReqwestTransport> {
  base_url: String,
  transport: T,
}

impl ContentClient<ReqwestTransport> {
  /// Create a client that talks HTTP through `reqwest`.
  ///
  /// # Errors
  /// Returns an error if the HTTP client cannot be built.
  pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
    let transport = ReqwestTransport::new(config)?;
    Ok(Self::new(&config.base_url, transport))
  }
}

impl<T: HttpTransport> ContentClient<T> {
  /// Create a client for the API rooted at `base_url`.
  ///
  /// # Arguments
  /// * `base_url` - REST API root (e.g., `https://example.atlassian.net/wiki/rest/api`)
  /// * `transport` - Delivers the requests this client builds
  pub fn new(base_url: impl Into<String>, transport: T) -> Self {
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Self { base_url, transport }
  }

  /// REST API root without a trailing slash.
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// The transport requests are sent through.
  pub fn transport(&self) -> &T {
    &self.transport
  }

  /// Endpoint URL for `content_id`.
  ///
  /// # Errors
  /// Returns [`ContentError::InvalidUrl`] if the base URL and ID do not form
  /// an absolute URL.
  pub fn content_endpoint(&self, content_id: &str) -> Result<Url, ContentError> {
    content_endpoint(&self.base_url, content_id)
  }

  async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ContentError> {
    debug!(method = %request.method, url = %request.url, "sending Confluence request");

    let response = self.transport.send(request).await.map_err(RequestError::Transport)?;

    debug!(status = response.status, "received Confluence response");
    trace!(body = %String::from_utf8_lossy(&response.body), "response payload");

    if !response.is_success() {
      let body = String::from_utf8_lossy(&response.body).trim().to_string();
      let body = if body.is_empty() {
        String::from("(no error details)")
      } else {
        body
      };
      return Err(RequestError::Status {
        status: response.status,
        body,
      }
      .into());
    }

    Ok(response)
  }
}

fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ContentError> {
  serde_json::from_slice(&response.body).map_err(ContentError::Decode)
}

#[async_trait]
impl<T: HttpTransport> ContentApi for ContentClient<T> {
  async fn fetch_content(&self, content_id: &str, expand: &[String]) -> Result<Content, ContentError> {
    let mut url = self.content_endpoint(content_id)?;
    apply_expand(&mut url, expand);

    let response = self.execute(HttpRequest::new(Method::GET, url)).await?;
    decode(&response)
  }

  async fn update_content(&self, update: &ContentUpdate) -> Result<ContentUpdate, ContentError> {
    let body = serde_json::to_vec(update).map_err(ContentError::Encode)?;
    let url = self.content_endpoint(&update.id)?;
    trace!(body = %String::from_utf8_lossy(&body), "update payload");

    let request = HttpRequest::new(Method::PUT, url)
      .header("Content-Type", "application/json")
      .body(body);

    let response = self.execute(request).await?;
    decode(&response)
  }

  async fn delete_content(&self, content_id: &str) -> Result<(), ContentError> {
    let url = self.content_endpoint(content_id)?;
    self.execute(HttpRequest::new(Method::DELETE, url)).await?;
    Ok(())
  }

  async fn current_user(&self) -> Result<UserInfo, ContentError> {
    let url = resource_endpoint(&self.base_url, "user/current")?;
    let response = self.execute(HttpRequest::new(Method::GET, url)).await?;
    decode(&response)
  }
}
