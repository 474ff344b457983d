//! Resolve user input into a content ID and, for URLs, the instance it
//! belongs to.

use anyhow::{Context, Result, anyhow};
use url::Url;

/// Path segments that start the site layout below the instance root.
const SITE_MARKERS: [&str; 4] = ["wiki", "spaces", "pages", "display"];

/// Content reference extracted from a bare ID or a Confluence URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTarget {
  /// Scheme, host, port and any context path of the instance when the input
  /// was a URL.
  pub instance_url: Option<String>,
  /// Identifier of the referenced content.
  pub content_id: String,
  /// Space key when the URL encodes one.
  pub space_key: Option<String>,
}

/// Parse a content ID or Confluence page URL.
///
/// Supported URL formats:
/// - https://example.atlassian.net/wiki/spaces/SPACE/pages/123456/Page+Title
/// - https://example.atlassian.net/wiki/pages/123456
/// - https://wiki.example.com/pages/viewpage.action?pageId=123456
///
/// Anything without `://` is treated as a bare content ID.
///
/// # Errors
/// Returns an error when the input is empty, the URL is malformed, or no
/// numeric content ID can be found in it.
pub fn parse_content_target(input: &str) -> Result<ContentTarget> {
  let input = input.trim();
  if input.is_empty() {
    return Err(anyhow!("Content ID must not be empty"));
  }

  if !input.contains("://") {
    return Ok(ContentTarget {
      instance_url: None,
      content_id: input.to_string(),
      space_key: None,
    });
  }

  let parsed = Url::parse(input).context("Invalid URL format")?;
  let host = parsed.host_str().context("URL missing host")?;
  let origin = match parsed.port() {
    Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
    None => format!("{}://{host}", parsed.scheme()),
  };

  let segments: Vec<&str> = parsed.path().split('/').filter(|s| !s.is_empty()).collect();

  // Server installs may live below a context path such as `/confluence`.
  let context_len = segments
    .iter()
    .position(|s| SITE_MARKERS.contains(s))
    .unwrap_or(0);
  let instance_url = segments[..context_len]
    .iter()
    .fold(origin, |url, segment| format!("{url}/{segment}"));

  let query_id = parsed
    .query_pairs()
    .find(|(key, _)| key == "pageId")
    .map(|(_, value)| value.into_owned());

  let content_id = match query_id {
    Some(id) => id,
    None => {
      let pages_pos = segments
        .iter()
        .position(|&s| s == "pages")
        .context("URL does not contain 'pages' segment or 'pageId' parameter")?;
      segments
        .get(pages_pos + 1)
        .map(|s| s.to_string())
        .context("URL does not contain content ID after 'pages' segment")?
    }
  };

  if content_id.is_empty() {
    return Err(anyhow!("URL does not contain a content ID"));
  }

  if !content_id.chars().all(|c| c.is_ascii_digit()) {
    return Err(anyhow!("Content ID is not numeric: {content_id}"));
  }

  let space_key = segments
    .windows(2)
    .find(|pair| pair[0] == "spaces" || pair[0] == "display")
    .map(|pair| pair[1].to_string())
    .filter(|key| key != "pages");

  Ok(ContentTarget {
    instance_url: Some(instance_url),
    content_id,
    space_key,
  })
}
