//! Credential provider abstraction.

use super::{Credential, CredentialError};

/// A source of credentials keyed by host name.
pub trait CredentialsProvider {
  /// Look up credentials for `host` (e.g., `example.atlassian.net`).
  ///
  /// Returns `Ok(None)` when the source has no entry for the host so callers
  /// can fall back to another source.
  ///
  /// # Errors
  /// Returns `Err(CredentialError)` when the source exists but cannot be read.
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError>;
}
