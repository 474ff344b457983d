//! Credential values and lookup errors.

use std::path::PathBuf;

use thiserror::Error;

/// Username and API token for Basic authentication.
///
/// For Atlassian Cloud the username is the account email address and the
/// password is an API token created at
/// <https://id.atlassian.com/manage-profile/security/api-tokens>.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for Credential {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credential")
      .field("username", &self.username)
      .field("password", &"********")
      .finish()
  }
}

/// Errors raised while looking up credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
  /// No home directory is known, so `~/.netrc` cannot be located.
  #[error("cannot locate .netrc: HOME is not set")]
  HomeNotSet,

  /// The `.netrc` file exists but could not be read.
  #[error("failed to read {}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
