//! Content endpoint composition.

use url::Url;

use super::error::ContentError;

/// Compose `base + "/content/" + content_id` into an absolute URL.
///
/// A trailing `/` on `base_url` is ignored. The content ID is inserted as-is,
/// so it must not contain path or query delimiters.
///
/// # Errors
/// Returns [`ContentError::InvalidUrl`] when the result is not an absolute,
/// hierarchical URL.
pub fn content_endpoint(base_url: &str, content_id: &str) -> Result<Url, ContentError> {
  resource_endpoint(base_url, &format!("content/{content_id}"))
}

/// Compose `base + "/" + path` into an absolute URL.
pub(crate) fn resource_endpoint(base_url: &str, path: &str) -> Result<Url, ContentError> {
  let raw = format!("{}/{}", base_url.trim_end_matches('/'), path);
  let url = Url::parse(&raw).map_err(|err| ContentError::InvalidUrl {
    input: raw.clone(),
    reason: err.to_string(),
  })?;

  if url.cannot_be_a_base() {
    return Err(ContentError::InvalidUrl {
      input: raw,
      reason: String::from("URL has no hierarchical path"),
    });
  }

  Ok(url)
}

/// Set the `expand` query parameter to the comma-joined relation names.
///
/// The parameter is omitted entirely for an empty set; otherwise names keep
/// their call order and are percent-encoded.
pub fn apply_expand<S: AsRef<str>>(url: &mut Url, expand: &[S]) {
  if expand.is_empty() {
    return;
  }

  let joined = expand.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
  url.query_pairs_mut().append_pair("expand", &joined);
}
