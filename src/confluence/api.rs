//! Trait definitions for interacting with Confluence content.

use async_trait::async_trait;

use super::error::ContentError;
use super::models::{Content, ContentUpdate, UserInfo};

/// Content operations against a Confluence instance (enables testing with
/// fake implementations).
#[async_trait]
pub trait ContentApi: Send + Sync {
  /// Fetch a content item by ID.
  ///
  /// # Arguments
  /// * `content_id` - Identifier of the content to retrieve.
  /// * `expand` - Relation names to expand, sent in the given order.
  ///
  /// # Returns
  /// The decoded [`Content`] record.
  async fn fetch_content(&self, content_id: &str, expand: &[String]) -> Result<Content, ContentError>;

  /// Replace the title and storage body of a content item.
  ///
  /// # Returns
  /// The state the server accepted, usually with the new version number.
  async fn update_content(&self, update: &ContentUpdate) -> Result<ContentUpdate, ContentError>;

  /// Delete a content item.
  async fn delete_content(&self, content_id: &str) -> Result<(), ContentError>;

  /// Return the user the configured credentials authenticate as.
  async fn current_user(&self) -> Result<UserInfo, ContentError>;
}
