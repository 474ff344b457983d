//! Error taxonomy for content operations.
//!
//! Every client call fails with exactly one [`ContentError`]. Non-success HTTP
//! statuses are reported as [`RequestError::Status`] so callers can tell a
//! missing page from a server fault without a separate error kind.

use thiserror::Error;

/// Boxed error produced by an [`HttpTransport`](super::transport::HttpTransport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`ContentClient`](super::client::ContentClient) operations.
#[derive(Debug, Error)]
pub enum ContentError {
  /// The base endpoint and content ID do not compose into a usable URL.
  #[error("invalid content endpoint `{input}`: {reason}")]
  InvalidUrl {
    /// The string that failed to parse.
    input: String,
    /// Why it was rejected.
    reason: String,
  },

  /// The outbound payload could not be serialized.
  #[error("failed to encode request body")]
  Encode(#[source] serde_json::Error),

  /// The request did not complete with a success status.
  #[error(transparent)]
  Request(#[from] RequestError),

  /// The response body is not JSON of the expected shape.
  #[error("failed to decode response body")]
  Decode(#[source] serde_json::Error),
}

/// Transport-level failure or non-success HTTP status.
#[derive(Debug, Error)]
pub enum RequestError {
  /// The transport could not deliver the request or read the response.
  #[error("request failed")]
  Transport(#[source] BoxError),

  /// The server answered with a non-2xx status.
  #[error("Confluence API returned error {status}: {body}")]
  Status {
    /// HTTP status code.
    status: u16,
    /// Response body, which usually carries the server's error message.
    body: String,
  },
}

impl RequestError {
  /// HTTP status code, when the server responded at all.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Transport(_) => None,
    }
  }
}

impl ContentError {
  /// HTTP status code carried by a [`ContentError::Request`], if any.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Request(err) => err.status(),
      _ => None,
    }
  }

  /// Whether the server reported that the content does not exist.
  pub fn is_not_found(&self) -> bool {
    self.status() == Some(404)
  }

  /// Whether the server rejected the credentials or the caller lacks access.
  pub fn is_unauthorized(&self) -> bool {
    matches!(self.status(), Some(401 | 403))
  }

  /// Whether the server rejected an update because the target version is stale.
  pub fn is_version_conflict(&self) -> bool {
    self.status() == Some(409)
  }
}
