//! `.netrc` credential lookup.

use std::path::PathBuf;

use tracing::debug;

use super::{Credential, CredentialError, CredentialsProvider};

/// Reads credentials from a `.netrc` file.
///
/// The file is `$NETRC` when set, otherwise `~/.netrc`. A missing file is not
/// an error; it simply yields no credentials.
#[derive(Debug, Default)]
pub struct NetrcProvider {
  path: Option<PathBuf>,
}

impl NetrcProvider {
  /// Provider for the default `.netrc` location.
  pub fn new() -> Self {
    Self::default()
  }

  /// Provider for an explicit file.
  pub fn with_path(path: impl Into<PathBuf>) -> Self {
    Self {
      path: Some(path.into()),
    }
  }

  fn resolve_path(&self) -> Result<PathBuf, CredentialError> {
    if let Some(path) = &self.path {
      return Ok(path.clone());
    }
    if let Some(path) = std::env::var_os("NETRC") {
      return Ok(PathBuf::from(path));
    }
    let home = std::env::var_os("HOME").ok_or(CredentialError::HomeNotSet)?;
    Ok(PathBuf::from(home).join(".netrc"))
  }
}

impl CredentialsProvider for NetrcProvider {
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError> {
    let path = self.resolve_path()?;
    if !path.exists() {
      debug!(path = %path.display(), "no .netrc file");
      return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|source| CredentialError::Io {
      path: path.clone(),
      source,
    })?;

    Ok(lookup(&content, host))
  }
}

/// One `machine` or `default` block.
#[derive(Default)]
struct Entry<'a> {
  machine: Option<&'a str>,
  login: Option<&'a str>,
  password: Option<&'a str>,
}

impl Entry<'_> {
  fn credential(&self) -> Option<Credential> {
    Some(Credential {
      username: self.login?.to_string(),
      password: self.password?.to_string(),
    })
  }
}

/// Find the credentials for `host`.
///
/// The first complete `machine` entry for the host wins; a complete `default`
/// entry is used only when no machine matches. `#` starts a comment that runs
/// to the end of the line, and `macdef` bodies (up to the next blank line) are
/// skipped.
fn lookup(content: &str, host: &str) -> Option<Credential> {
  let entries = parse_entries(content);

  entries
    .iter()
    .filter(|entry| entry.machine == Some(host))
    .find_map(Entry::credential)
    .or_else(|| {
      entries
        .iter()
        .filter(|entry| entry.machine.is_none())
        .find_map(Entry::credential)
    })
}

fn parse_entries(content: &str) -> Vec<Entry<'_>> {
  let mut entries: Vec<Entry<'_>> = Vec::new();
  let mut in_macro = false;
  let mut pending: Option<&str> = None;

  for line in content.lines() {
    if in_macro {
      if line.trim().is_empty() {
        in_macro = false;
      }
      continue;
    }

    let code = line.split('#').next().unwrap_or_default();
    for token in code.split_whitespace() {
      if let Some(keyword) = pending.take() {
        if keyword == "machine" {
          entries.push(Entry {
            machine: Some(token),
            ..Entry::default()
          });
        } else if let Some(entry) = entries.last_mut() {
          match keyword {
            "login" => entry.login = Some(token),
            "password" => entry.password = Some(token),
            _ => {}
          }
        }
        continue;
      }

      match token {
        "machine" | "login" | "password" | "account" => pending = Some(token),
        "default" => entries.push(Entry::default()),
        "macdef" => {
          in_macro = true;
          break;
        }
        _ => {}
      }
    }
  }

  entries
}
