//! End-to-end tests for the content client against a stub transport
//!
//! These tests cover the full request/response path: endpoint composition,
//! expand encoding, JSON payloads, and the error taxonomy.

mod common;

use common::fixtures::{self, BASE_URL};
use common::stub_transport::StubTransport;
use confluence_content::confluence::{ContentApi, ContentClient, ContentError, ContentUpdate, RequestError};
use reqwest::Method;

fn client(transport: StubTransport) -> ContentClient<StubTransport> {
  ContentClient::new(BASE_URL, transport)
}

fn expand(names: &[&str]) -> Vec<String> {
  names.iter().map(|name| name.to_string()).collect()
}

#[tokio::test]
async fn fetch_content_decodes_page_and_sends_expand() {
  let client = client(StubTransport::new().respond_json(200, fixtures::home_page_response()));

  let content = client
    .fetch_content("12345", &expand(&["body.storage", "version"]))
    .await
    .unwrap();

  assert_eq!(content.id, "12345");
  assert_eq!(content.title, "Home");
  assert_eq!(content.content_type, "page");
  assert_eq!(content.version.number, 7);
  assert_eq!(content.version.by.display_name, "Jane Doe");
  assert_eq!(content.version.message, "Quarterly refresh");
  assert_eq!(
    content.body.storage.as_ref().map(|s| s.value.as_str()),
    Some("<p>Welcome to the documentation space.</p>")
  );
  assert_eq!(content.web_ui_link(), Some("/spaces/DOCS/pages/12345/Home"));
  assert_eq!(
    content.pending_expansions(),
    vec!["children", "container", "descendants", "history", "space"]
  );

  let request = client.transport().single_request();
  assert_eq!(request.method, Method::GET);
  assert_eq!(
    request.url.as_str(),
    "https://example.atlassian.net/wiki/rest/api/content/12345?expand=body.storage%2Cversion"
  );
  assert!(request.body.is_none());
}

#[tokio::test]
async fn fetch_content_decodes_space_container_and_view() {
  let client = client(StubTransport::new().respond_json(200, fixtures::expanded_page_response()));

  let content = client
    .fetch_content("67890", &expand(&["space", "container", "body.view"]))
    .await
    .unwrap();

  assert_eq!(content.space.id, 98304);
  assert_eq!(content.space.key, "ENG");
  assert_eq!(content.container.name, "Engineering");
  assert_eq!(
    content.space.expandable.get("homepage").map(String::as_str),
    Some("/rest/api/content/65537")
  );
  assert_eq!(content.body.view.representation, "view");
  assert!(content.body.view.value.contains("Tag the build"));
  assert!(content.body.storage.is_none());
  assert_eq!(content.version.number, 0);
}

#[tokio::test]
async fn fetch_content_without_expand_omits_query() {
  let client = client(StubTransport::new().respond_json(200, fixtures::home_page_response()));

  client.fetch_content("12345", &[]).await.unwrap();

  let request = client.transport().single_request();
  assert_eq!(request.url.query(), None);
}

#[tokio::test]
async fn fetch_content_malformed_json_is_decode_error() {
  let client = client(StubTransport::new().respond(200, r#"{"id":"12345","title":"#));

  let err = client.fetch_content("12345", &[]).await.unwrap_err();

  assert!(matches!(err, ContentError::Decode(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn fetch_content_wrong_shape_is_decode_error() {
  let client = client(StubTransport::new().respond(200, r#""a bare string""#));

  let err = client.fetch_content("12345", &[]).await.unwrap_err();

  assert!(matches!(err, ContentError::Decode(_)));
}

#[tokio::test]
async fn fetch_content_null_fields_decode_empty() {
  let client = client(StubTransport::new().respond(200, r#"{"id":"1","version":{"number":7,"message":null}}"#));

  let content = client.fetch_content("1", &[]).await.unwrap();

  assert_eq!(content.version.number, 7);
  assert_eq!(content.version.message, "");
}

#[tokio::test]
async fn fetch_content_not_found_keeps_status() {
  let client = client(StubTransport::new().respond(404, r#"{"statusCode":404,"message":"No content found"}"#));

  let err = client.fetch_content("99999", &[]).await.unwrap_err();

  assert!(err.is_not_found());
  match err {
    ContentError::Request(RequestError::Status { status, body }) => {
      assert_eq!(status, 404);
      assert!(body.contains("No content found"));
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[tokio::test]
async fn update_content_puts_json_and_returns_accepted_version() {
  let client = client(StubTransport::new().respond_json(200, fixtures::update_accepted_response(8)));
  let update = ContentUpdate::new("12345", "Home", "<p>hi</p>", 7);

  let accepted = client.update_content(&update).await.unwrap();

  assert_eq!(accepted.version.number, 8);
  assert_eq!(accepted.id, "12345");
  assert_eq!(accepted.body.storage.value, "<p>hi</p>");

  let request = client.transport().single_request();
  assert_eq!(request.method, Method::PUT);
  assert_eq!(
    request.url.as_str(),
    "https://example.atlassian.net/wiki/rest/api/content/12345"
  );
  assert_eq!(request.header_value("Content-Type"), Some("application/json"));

  let body = String::from_utf8(request.body.unwrap()).unwrap();
  assert!(body.contains(r#""number":7"#));
  assert!(body.contains(r#""representation":"storage""#));
  insta::assert_snapshot!(
    body,
    @r#"{"id":"12345","type":"page","title":"Home","body":{"storage":{"value":"<p>hi</p>","representation":"storage"}},"version":{"number":7}}"#
  );
}

#[tokio::test]
async fn update_content_sends_edit_message_and_minor_flag() {
  let client = client(StubTransport::new().respond_json(200, fixtures::update_accepted_response(8)));
  let update = ContentUpdate::new("12345", "Home", "<p>hi</p>", 8)
    .with_message("automated sync")
    .with_minor_edit(true);

  client.update_content(&update).await.unwrap();

  let request = client.transport().single_request();
  let body: serde_json::Value = serde_json::from_slice(request.body.as_deref().unwrap()).unwrap();
  assert_eq!(body["version"]["message"], "automated sync");
  assert_eq!(body["version"]["minorEdit"], true);
}

#[tokio::test]
async fn update_content_version_conflict_is_request_error() {
  let client = client(StubTransport::new().respond_json(409, fixtures::version_conflict_response()));
  let update = ContentUpdate::new("12345", "Home", "<p>hi</p>", 7);

  let err = client.update_content(&update).await.unwrap_err();

  assert!(matches!(err, ContentError::Request(_)));
  assert!(err.is_version_conflict());
  assert!(err.to_string().contains("Version must be incremented"));
}

#[tokio::test]
async fn update_content_malformed_response_is_decode_error() {
  let client = client(StubTransport::new().respond(200, "<html>gateway</html>"));
  let update = ContentUpdate::new("12345", "Home", "<p>hi</p>", 7);

  let err = client.update_content(&update).await.unwrap_err();

  assert!(matches!(err, ContentError::Decode(_)));
}

#[tokio::test]
async fn delete_content_sends_delete() {
  let client = client(StubTransport::new().respond(204, Vec::new()));

  client.delete_content("12345").await.unwrap();

  let request = client.transport().single_request();
  assert_eq!(request.method, Method::DELETE);
  assert_eq!(request.url.path(), "/wiki/rest/api/content/12345");
  assert!(request.body.is_none());
}

#[tokio::test]
async fn delete_content_transport_failure_is_request_error() {
  let client = client(StubTransport::new().fail("connection refused"));

  let err = client.delete_content("12345").await.unwrap_err();

  match &err {
    ContentError::Request(RequestError::Transport(source)) => {
      assert_eq!(source.to_string(), "connection refused");
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert_eq!(err.status(), None);
}

#[tokio::test]
async fn invalid_base_url_is_reported_without_sending() {
  let client = ContentClient::new("example.atlassian.net/wiki/rest/api", StubTransport::new());

  let err = client.fetch_content("12345", &[]).await.unwrap_err();

  assert!(matches!(err, ContentError::InvalidUrl { .. }));
  assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn fetched_content_feeds_next_update() {
  let transport = StubTransport::new()
    .respond_json(200, fixtures::home_page_response())
    .respond_json(200, fixtures::update_accepted_response(8));
  let client = client(transport);

  let current = client.fetch_content("12345", &expand(&["version"])).await.unwrap();
  let accepted = client.update_content(&current.next_update("<p>hi</p>")).await.unwrap();

  assert_eq!(accepted.version.number, 8);
  let requests = client.transport().requests();
  assert_eq!(requests.len(), 2);
  assert_eq!(requests[1].method, Method::PUT);
  let sent: ContentUpdate = serde_json::from_slice(requests[1].body.as_deref().unwrap()).unwrap();
  assert_eq!(sent.version.number, 8);
  assert_eq!(sent.title, "Home");
}
