//! Data transfer objects exchanged with the Confluence content REST API.
//!
//! Field names follow the wire format. Confluence omits anything that was not
//! expanded, so every field decodes to its empty value when absent.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Relation name to URL (or relative path) mapping used by `_links` and
/// `_expandable`.
pub type LinkMap = BTreeMap<String, String>;

/// Content item (page, blog post, ...) as returned by `GET /content/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
  /// Opaque identifier assigned by Confluence.
  #[serde(deserialize_with = "null_as_default")]
  pub id: String,
  /// Content type (typically `"page"` or `"blogpost"`).
  #[serde(rename = "type", deserialize_with = "null_as_default")]
  pub content_type: String,
  /// Human-readable title displayed in the UI.
  #[serde(deserialize_with = "null_as_default")]
  pub title: String,
  /// Edit metadata for the current revision.
  #[serde(deserialize_with = "null_as_default")]
  pub version: Version,
  /// Space the content lives in.
  #[serde(deserialize_with = "null_as_default")]
  pub space: Container,
  /// Immediate container, which is the space for top-level content.
  #[serde(deserialize_with = "null_as_default")]
  pub container: Container,
  /// Body representations that were expanded.
  #[serde(deserialize_with = "null_as_default")]
  pub body: ContentBody,
  /// Links to related resources (`self`, `webui`, `tinyui`, ...).
  #[serde(rename = "_links", deserialize_with = "null_as_default")]
  pub links: LinkMap,
  /// Relations that can be requested through the `expand` parameter.
  #[serde(rename = "_expandable", deserialize_with = "null_as_default")]
  pub expandable: LinkMap,
}

/// Revision metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Version {
  /// Revision number, starting at 1.
  #[serde(deserialize_with = "null_as_default")]
  pub number: u64,
  /// User who made the edit.
  #[serde(deserialize_with = "null_as_default")]
  pub by: User,
  /// Edit message supplied with the revision.
  #[serde(deserialize_with = "null_as_default")]
  pub message: String,
  /// Timestamp of the edit as sent by the server.
  #[serde(deserialize_with = "null_as_default")]
  pub when: String,
  /// Whether watchers were notified of the edit.
  #[serde(deserialize_with = "null_as_default")]
  pub minor_edit: bool,
}

impl Version {
  /// Parse [`Version::when`] as an RFC 3339 timestamp.
  pub fn edited_at(&self) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&self.when).ok()
  }
}

/// Confluence user reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
  /// User kind (`"known"`, `"anonymous"`, ...).
  #[serde(rename = "type", deserialize_with = "null_as_default")]
  pub user_type: String,
  #[serde(deserialize_with = "null_as_default")]
  pub username: String,
  #[serde(deserialize_with = "null_as_default")]
  pub display_name: String,
  #[serde(deserialize_with = "null_as_default")]
  pub profile_picture: ProfilePicture,
}

/// Avatar metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilePicture {
  #[serde(deserialize_with = "null_as_default")]
  pub path: String,
  #[serde(deserialize_with = "null_as_default")]
  pub width: u32,
  #[serde(deserialize_with = "null_as_default")]
  pub height: u32,
  #[serde(deserialize_with = "null_as_default")]
  pub is_default: bool,
}

/// Space or container record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
  /// Numeric identifier.
  #[serde(deserialize_with = "null_as_default")]
  pub id: i64,
  /// Short key that uniquely identifies the space.
  #[serde(deserialize_with = "null_as_default")]
  pub key: String,
  /// Human-readable name.
  #[serde(deserialize_with = "null_as_default")]
  pub name: String,
  /// Classification such as `"global"` or `"personal"`.
  #[serde(rename = "type", deserialize_with = "null_as_default")]
  pub container_type: String,
  #[serde(rename = "_links", deserialize_with = "null_as_default")]
  pub links: LinkMap,
  #[serde(rename = "_expandable", deserialize_with = "null_as_default")]
  pub expandable: LinkMap,
}

/// Body representations of a content item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBody {
  /// Rendered HTML view.
  #[serde(deserialize_with = "null_as_default")]
  pub view: ViewFormat,
  /// Storage-format markup, present when `body.storage` was expanded.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub storage: Option<StorageFormat>,
  /// Representations that were not expanded (`storage`, `editor`,
  /// `export_view`, ...).
  #[serde(rename = "_expandable", deserialize_with = "null_as_default")]
  pub expandable: LinkMap,
}

/// Rendered view of a body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewFormat {
  /// Rendered HTML snippet.
  #[serde(deserialize_with = "null_as_default")]
  pub value: String,
  /// Representation name (typically `"view"`).
  #[serde(deserialize_with = "null_as_default")]
  pub representation: String,
  #[serde(rename = "_expandable", deserialize_with = "null_as_default")]
  pub expandable: LinkMap,
}

/// Markup tagged with the format it is encoded in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageFormat {
  /// Raw markup.
  #[serde(deserialize_with = "null_as_default")]
  pub value: String,
  /// Representation name (typically `"storage"`).
  #[serde(deserialize_with = "null_as_default")]
  pub representation: String,
}

/// Representation tag for Confluence storage format.
pub const STORAGE_REPRESENTATION: &str = "storage";

impl StorageFormat {
  /// Wrap `value` as storage-format markup.
  pub fn storage(value: impl Into<String>) -> Self {
    Self {
      value: value.into(),
      representation: STORAGE_REPRESENTATION.to_string(),
    }
  }
}

impl Content {
  /// Path of the content in the web UI, relative to the instance base.
  pub fn web_ui_link(&self) -> Option<&str> {
    link(&self.links, "webui")
  }

  /// Fully qualified API URL of the content.
  pub fn self_link(&self) -> Option<&str> {
    link(&self.links, "self")
  }

  /// Relations the server left unexpanded, in name order.
  pub fn pending_expansions(&self) -> Vec<&str> {
    self
      .expandable
      .iter()
      .filter(|(_, path)| !path.is_empty())
      .map(|(name, _)| name.as_str())
      .collect()
  }

  /// Build an update that replaces the storage body of this content and
  /// targets the next revision number.
  pub fn next_update(&self, storage_value: impl Into<String>) -> ContentUpdate {
    ContentUpdate {
      id: self.id.clone(),
      content_type: self.content_type.clone(),
      title: self.title.clone(),
      body: UpdateBody {
        storage: StorageFormat::storage(storage_value),
      },
      version: UpdateVersion {
        number: self.version.number.saturating_add(1),
        ..UpdateVersion::default()
      },
    }
  }
}

/// Decode `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn link<'a>(links: &'a LinkMap, name: &str) -> Option<&'a str> {
  links.get(name).map(String::as_str).filter(|value| !value.is_empty())
}

/// Write model sent with `PUT /content/{id}` and returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentUpdate {
  #[serde(deserialize_with = "null_as_default")]
  pub id: String,
  #[serde(rename = "type", deserialize_with = "null_as_default")]
  pub content_type: String,
  #[serde(deserialize_with = "null_as_default")]
  pub title: String,
  #[serde(deserialize_with = "null_as_default")]
  pub body: UpdateBody,
  #[serde(deserialize_with = "null_as_default")]
  pub version: UpdateVersion,
}

/// Body of a [`ContentUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateBody {
  #[serde(deserialize_with = "null_as_default")]
  pub storage: StorageFormat,
}

/// Target revision of a [`ContentUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateVersion {
  /// Revision the update creates. The server rejects stale numbers.
  #[serde(deserialize_with = "null_as_default")]
  pub number: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub minor_edit: Option<bool>,
}

impl ContentUpdate {
  /// Create a page update carrying storage-format markup.
  pub fn new(id: impl Into<String>, title: impl Into<String>, storage_value: impl Into<String>, number: u64) -> Self {
    Self {
      id: id.into(),
      content_type: String::from("page"),
      title: title.into(),
      body: UpdateBody {
        storage: StorageFormat::storage(storage_value),
      },
      version: UpdateVersion {
        number,
        ..UpdateVersion::default()
      },
    }
  }

  /// Attach an edit message to the revision.
  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.version.message = Some(message.into());
    self
  }

  /// Mark the revision as a minor edit.
  pub fn with_minor_edit(mut self, minor_edit: bool) -> Self {
    self.version.minor_edit = Some(minor_edit);
    self
  }
}

/// User information from `GET /user/current`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInfo {
  /// Stable Atlassian account identifier (Cloud only).
  pub account_id: Option<String>,
  /// Login name (Server/Data Center only).
  pub username: Option<String>,
  /// Primary email address if the API caller is permitted to view it.
  pub email: Option<String>,
  #[serde(deserialize_with = "null_as_default")]
  pub display_name: String,
  /// Publicly visible name, which may differ from `display_name`.
  pub public_name: Option<String>,
}
