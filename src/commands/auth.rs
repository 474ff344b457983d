//! Authentication subcommand handlers.
//!
//! `auth test` calls the API with the resolved credentials; `auth show`
//! prints where each setting comes from without contacting the server.

use std::process;

use anyhow::{Context, Result, anyhow, bail};
use url::Url;

use crate::cli::{AuthCommand, Cli};
use crate::color::ColorScheme;
use crate::commands::content::build_client;
use crate::confluence::ContentApi;
use crate::credentials::{Credential, CredentialsProvider, NetrcProvider};

/// Dispatch the `auth` subcommands.
pub(crate) async fn handle_auth_command(subcommand: &AuthCommand, cli: &Cli, colors: &ColorScheme) {
  match subcommand {
    AuthCommand::Test => test_auth(cli, colors).await,
    AuthCommand::Show => show_auth_config(cli, colors),
  }
}

async fn test_auth(cli: &Cli, colors: &ColorScheme) {
  let Some(base_url) = cli.auth.url.as_deref() else {
    eprintln!("{} {}", colors.error("✗"), colors.error("Base URL not provided"));
    eprintln!("  confluence-content auth test --url https://your-instance.atlassian.net");
    eprintln!("  Or set CONFLUENCE_URL environment variable");
    process::exit(1);
  };

  println!("{} {}", colors.info("→"), colors.info("Testing authentication"));
  println!("  {}: {}", colors.emphasis("URL"), colors.link(base_url));
  println!("  {}: {}", colors.emphasis("API path"), cli.auth.api_path);

  let client = match build_client(base_url, cli) {
    Ok(client) => client,
    Err(e) => {
      eprintln!("\n{} {}", colors.error("✗"), colors.error("Failed to set up API client"));
      eprintln!("  {e:#}");
      eprintln!("\n{}", colors.info("Provide credentials via:"));
      eprintln!("  • CLI flags: --user and --token");
      eprintln!("  • Environment variables: CONFLUENCE_USER and CONFLUENCE_TOKEN");
      eprintln!("  • ~/.netrc file");
      process::exit(2);
    }
  };

  match client.current_user().await {
    Ok(user) => {
      println!("\n{} {}", colors.success("✓"), colors.success("Authentication successful"));
      println!("  {}: {}", colors.emphasis("Display Name"), user.display_name);
      if let Some(account_id) = &user.account_id {
        println!("  {}: {}", colors.emphasis("Account ID"), colors.dimmed(account_id));
      }
      if let Some(username) = &user.username {
        println!("  {}: {}", colors.emphasis("Username"), username);
      }
      if let Some(email) = &user.email {
        println!("  {}: {}", colors.emphasis("Email"), email);
      }
    }
    Err(e) => {
      eprintln!("\n{} {}", colors.error("✗"), colors.error("Authentication failed"));
      eprintln!("  {e}");
      if e.is_not_found() {
        eprintln!(
          "\n{}",
          colors.dimmed("The API path may be wrong; Server/Data Center uses --api-path /rest/api")
        );
      }
      process::exit(2);
    }
  }
}

/// Where a credential value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
  Flag,
  Environment,
  Netrc,
}

impl Source {
  fn label(self) -> &'static str {
    match self {
      Self::Flag => "command-line flag",
      Self::Environment => "environment variable",
      Self::Netrc => ".netrc file",
    }
  }
}

fn flag_or_env(value: Option<&str>, env_var: &str) -> Option<Source> {
  value?;
  if std::env::var_os(env_var).is_some() {
    Some(Source::Environment)
  } else {
    Some(Source::Flag)
  }
}

fn show_auth_config(cli: &Cli, colors: &ColorScheme) {
  println!("{}\n", colors.emphasis("Authentication Configuration"));

  let url = cli.auth.url.as_deref();
  match (url, flag_or_env(url, "CONFLUENCE_URL")) {
    (Some(value), Some(source)) => {
      println!("{}: {}", colors.emphasis("Base URL"), colors.link(value));
      println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(source.label()));
      println!("  {}: {}", colors.dimmed("API path"), cli.auth.api_path);
    }
    _ => println!("{}: {}", colors.emphasis("Base URL"), colors.dimmed("(not set)")),
  }

  let netrc = url.and_then(extract_host).and_then(|host| {
    NetrcProvider::new()
      .get_credentials(&host)
      .inspect_err(|err| tracing::warn!("could not read .netrc: {err}"))
      .ok()
      .flatten()
  });

  let user = cli.auth.user.as_deref();
  let user_source = flag_or_env(user, "CONFLUENCE_USER").or(netrc.as_ref().map(|_| Source::Netrc));
  match (user.or(netrc.as_ref().map(|c| c.username.as_str())), user_source) {
    (Some(value), Some(source)) => {
      println!("\n{}: {}", colors.emphasis("Username"), value);
      println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(source.label()));
    }
    _ => println!("\n{}: {}", colors.emphasis("Username"), colors.dimmed("(not set)")),
  }

  let token = cli.auth.token.as_deref();
  let token_source = flag_or_env(token, "CONFLUENCE_TOKEN").or(netrc.as_ref().map(|_| Source::Netrc));
  match (token.or(netrc.as_ref().map(|c| c.password.as_str())), token_source) {
    (Some(value), Some(source)) => {
      println!("\n{}: {}", colors.emphasis("API Token"), colors.dimmed(mask_token(value)));
      println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(source.label()));
    }
    _ => println!("\n{}: {}", colors.emphasis("API Token"), colors.dimmed("(not set)")),
  }

  if url.is_none() {
    println!(
      "\n{} {} is required for API access",
      colors.warning("⚠"),
      colors.emphasis("Base URL")
    );
    println!("  Set via --url flag or CONFLUENCE_URL environment variable");
  }

  if user_source.is_none() || token_source.is_none() {
    println!(
      "\n{} {}",
      colors.warning("⚠"),
      colors.warning("Credentials incomplete")
    );
    println!("  Use --user/--token, CONFLUENCE_USER/CONFLUENCE_TOKEN, or add to ~/.netrc:");
    if let Some(host) = url.and_then(extract_host) {
      println!("    machine {host}");
    }
    println!("      login your.email@example.com");
    println!("      password your-api-token");
  } else {
    println!("\n{} {}", colors.success("✓"), colors.success("Credentials configured"));
  }
}

/// Keep the first four characters of long tokens and mask the rest.
fn mask_token(token: &str) -> String {
  let len = token.chars().count();
  if len > 8 {
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}{}", "*".repeat(len - 4))
  } else {
    "*".repeat(len)
  }
}

/// Resolve credentials for `base_url` from flags/env vars, falling back to
/// the `.netrc` entry for its host.
///
/// # Errors
/// Returns an error when the URL has no host, the `.netrc` file cannot be
/// read, or no source provides both a username and a token.
pub(crate) fn load_credentials(base_url: &str, cli: &Cli) -> Result<(String, String)> {
  resolve_credentials(base_url, cli, &NetrcProvider::new())
}

fn resolve_credentials(base_url: &str, cli: &Cli, provider: &dyn CredentialsProvider) -> Result<(String, String)> {
  if let (Some(user), Some(token)) = (&cli.auth.user, &cli.auth.token) {
    return Ok((user.clone(), token.clone()));
  }

  let host = extract_host(base_url).ok_or_else(|| anyhow!("Invalid base URL: {base_url}"))?;
  let found = provider
    .get_credentials(&host)
    .context("Failed to read credentials")?;

  if let Some(Credential { username, password }) = found {
    let user = cli.auth.user.clone().unwrap_or(username);
    let token = cli.auth.token.clone().unwrap_or(password);
    return Ok((user, token));
  }

  bail!(
    "Credentials not found. Provide --user and --token, set CONFLUENCE_USER and CONFLUENCE_TOKEN, or add {host} to ~/.netrc"
  )
}

/// Host component of an instance URL.
fn extract_host(url: &str) -> Option<String> {
  Url::parse(url).ok()?.host_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
  use clap::Parser;

  use super::*;
  use crate::credentials::CredentialError;

  struct StaticProvider(Option<Credential>);

  impl CredentialsProvider for StaticProvider {
    fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError> {
      assert_eq!(host, "example.atlassian.net");
      Ok(self.0.clone())
    }
  }

  fn netrc_entry() -> StaticProvider {
    StaticProvider(Some(Credential {
      username: String::from("netrc-user"),
      password: String::from("netrc-token"),
    }))
  }

  fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["confluence-content", "--url", "https://example.atlassian.net"];
    argv.extend_from_slice(args);
    argv.extend_from_slice(&["auth", "show"]);
    Cli::try_parse_from(argv).unwrap()
  }

  #[test]
  fn flags_win_without_consulting_netrc() {
    let cli = cli(&["--user", "flag-user", "--token", "flag-token"]);
    let creds = resolve_credentials("https://example.atlassian.net", &cli, &StaticProvider(None)).unwrap();
    assert_eq!(creds, (String::from("flag-user"), String::from("flag-token")));
  }

  #[test]
  fn netrc_fills_missing_values() {
    let cli = cli(&["--user", "flag-user"]);
    let creds = resolve_credentials("https://example.atlassian.net", &cli, &netrc_entry()).unwrap();
    assert_eq!(creds, (String::from("flag-user"), String::from("netrc-token")));
  }

  #[test]
  fn missing_credentials_is_an_error() {
    let cli = cli(&[]);
    let err = resolve_credentials("https://example.atlassian.net", &cli, &StaticProvider(None)).unwrap_err();
    assert!(err.to_string().contains("Credentials not found"));
    assert!(err.to_string().contains("example.atlassian.net"));
  }

  #[test]
  fn extract_host_ignores_port_and_path() {
    assert_eq!(
      extract_host("https://wiki.example.com:8443/confluence"),
      Some(String::from("wiki.example.com"))
    );
    assert_eq!(extract_host("not a url"), None);
  }

  #[test]
  fn mask_token_hides_all_but_prefix() {
    assert_eq!(mask_token("abcdefghijkl"), "abcd********");
    assert_eq!(mask_token("short"), "*****");
  }
}
