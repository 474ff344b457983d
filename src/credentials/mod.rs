//! Credentials for Confluence Basic authentication.
//!
//! The CLI takes credentials from `--user`/`--token` (or the matching
//! environment variables) and falls back to a `.netrc` entry for the
//! instance host:
//!
//! ```text
//! machine your-instance.atlassian.net
//!   login your.email@example.com
//!   password your-api-token-here
//! ```

mod netrc;
mod provider;
mod types;

pub use netrc::NetrcProvider;
pub use provider::CredentialsProvider;
pub use types::{Credential, CredentialError};
