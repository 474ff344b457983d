//! Stub HTTP transport for testing
//!
//! Replays queued responses in order and records every request it receives,
//! so tests can assert on the exact wire traffic without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use confluence_content::confluence::{BoxError, HttpRequest, HttpResponse, HttpTransport};

/// Outcome the stub produces for one request.
enum Reply {
  Response(HttpResponse),
  Failure(String),
}

/// Transport that answers from a queue of canned replies.
#[derive(Default)]
pub struct StubTransport {
  replies: Mutex<VecDeque<Reply>>,
  requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
  pub fn new() -> Self {
    Self::default()
  }

  /// Queue a response with a JSON body.
  pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
    self.respond(status, body.to_string())
  }

  /// Queue a response with a raw body.
  pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
    self
      .replies
      .lock()
      .unwrap()
      .push_back(Reply::Response(HttpResponse::new(status, body)));
    self
  }

  /// Queue a transport-level failure (no response at all).
  pub fn fail(self, message: &str) -> Self {
    self
      .replies
      .lock()
      .unwrap()
      .push_back(Reply::Failure(message.to_string()));
    self
  }

  /// Requests received so far, oldest first.
  pub fn requests(&self) -> Vec<HttpRequest> {
    self.requests.lock().unwrap().clone()
  }

  /// The only request received; panics if there were zero or several.
  pub fn single_request(&self) -> HttpRequest {
    let requests = self.requests();
    assert_eq!(requests.len(), 1, "expected exactly one request, got {}", requests.len());
    requests.into_iter().next().unwrap()
  }
}

#[async_trait]
impl HttpTransport for StubTransport {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
    self.requests.lock().unwrap().push(request);

    match self.replies.lock().unwrap().pop_front() {
      Some(Reply::Response(response)) => Ok(response),
      Some(Reply::Failure(message)) => Err(message.into()),
      None => Err("stub transport has no queued reply".into()),
    }
  }
}
