//! Command-line interface definitions for confluence-content.
//!
//! Connection, behavior, and logging options are global so they can appear
//! before or after the subcommand.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use url::Url;

use crate::color::ColorScheme;
use crate::commands::auth::handle_auth_command;
use crate::commands::completions::handle_completions_command;
use crate::commands::content::{handle_delete_command, handle_get_command, handle_update_command};
use crate::commands::version::handle_version_command;
use crate::confluence::{DEFAULT_API_PATH, STORAGE_REPRESENTATION};

/// confluence-content - Read, update, and delete Confluence content
#[derive(Debug, Parser)]
#[command(
  name = "confluence-content",
  version,
  about = "Read, update, and delete Confluence content",
  long_about = "A command-line client for the Confluence content REST API.\n\
                Fetches content with optional expansions, replaces storage-format bodies, and deletes content.",
  styles = get_clap_styles()
)]
pub struct Cli {
  /// Subcommand to execute
  #[command(subcommand)]
  pub command: Command,

  /// Connection options
  #[command(flatten)]
  pub auth: AuthOptions,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,

  /// Network options
  #[command(flatten)]
  pub network: NetworkOptions,
}

/// Top-level subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
  /// Fetch a content item and print a summary
  Get {
    /// Content URL or ID
    #[arg(value_name = "CONTENT_URL_OR_ID")]
    target: String,

    /// Relations to expand, comma separated (e.g. body.storage,version)
    #[arg(short, long, value_delimiter = ',', value_name = "RELATIONS")]
    expand: Vec<String>,

    /// Print the decoded content as JSON
    #[arg(long)]
    json: bool,
  },

  /// Replace the body (and optionally title) of a content item
  Update(UpdateArgs),

  /// Delete a content item
  Delete {
    /// Content URL or ID
    #[arg(value_name = "CONTENT_URL_OR_ID")]
    target: String,
  },

  /// Authentication testing and inspection
  Auth {
    #[command(subcommand)]
    subcommand: AuthCommand,
  },

  /// Display version and build information
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Show only version number
    #[arg(long)]
    short: bool,
  },

  /// Generate shell completion scripts
  Completions {
    /// Target shell for completions
    #[arg(value_enum)]
    shell: Shell,
  },
}

/// Arguments for `update`
#[derive(Debug, Args)]
pub struct UpdateArgs {
  /// Content URL or ID
  #[arg(value_name = "CONTENT_URL_OR_ID")]
  pub target: String,

  /// File containing the new body (`-` reads stdin)
  #[arg(short, long, value_name = "PATH")]
  pub file: PathBuf,

  /// New title (defaults to the current title)
  #[arg(long)]
  pub title: Option<String>,

  /// Version number to write (defaults to the current version plus one)
  #[arg(long, value_name = "N")]
  pub version_number: Option<u64>,

  /// Edit message recorded with the new version
  #[arg(short, long)]
  pub message: Option<String>,

  /// Mark the change as a minor edit (no watcher notifications)
  #[arg(long)]
  pub minor_edit: bool,

  /// Representation the body is written in
  #[arg(long, default_value = STORAGE_REPRESENTATION)]
  pub representation: String,

  /// Content type sent when the current content is not fetched
  #[arg(long = "type", default_value = "page", value_name = "TYPE")]
  pub content_type: String,
}

/// Authentication subcommands
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
  /// Call the API with the configured credentials
  Test,
  /// Show where each credential comes from
  Show,
}

/// Shells supported by `completions`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  Powershell,
  Elvish,
}

/// Normalize a URL by adding https:// if no scheme is present
fn normalize_url(url: &str) -> Result<String, String> {
  let trimmed = url.trim();

  let parsed = if trimmed.contains("://") {
    Url::parse(trimmed).map_err(|e| format!("Invalid URL: {e}"))?
  } else {
    Url::parse(&format!("https://{trimmed}")).map_err(|e| format!("Invalid URL: {e}"))?
  };

  Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Connection and credential options
#[derive(Debug, Args)]
pub struct AuthOptions {
  /// Confluence instance URL
  #[arg(long, global = true, env = "CONFLUENCE_URL", value_name = "URL", value_parser = normalize_url)]
  pub url: Option<String>,

  /// REST API path below the instance URL (`/rest/api` on Server/Data Center)
  #[arg(long, global = true, env = "CONFLUENCE_API_PATH", default_value = DEFAULT_API_PATH, value_name = "PATH")]
  pub api_path: String,

  /// Confluence user email
  #[arg(long, global = true, env = "CONFLUENCE_USER", value_name = "EMAIL")]
  pub user: Option<String>,

  /// Confluence API token
  #[arg(long, global = true, env = "CONFLUENCE_TOKEN", value_name = "TOKEN", hide_env_values = true)]
  pub token: Option<String>,
}

/// Behavior options
#[derive(Debug, Args)]
pub struct BehaviorOptions {
  /// Show what would be changed without sending updates or deletes
  #[arg(long, global = true)]
  pub dry_run: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, global = true, value_enum, default_value = "auto", value_name = "WHEN")]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

/// Network options
#[derive(Debug, Args)]
pub struct NetworkOptions {
  /// Request timeout in seconds
  #[arg(long, global = true, default_value = "30", value_name = "SECONDS")]
  pub timeout: u64,
}

impl Command {
  /// Content reference the command operates on, if any.
  pub fn target(&self) -> Option<&str> {
    match self {
      Self::Get { target, .. } | Self::Delete { target } => Some(target.as_str()),
      Self::Update(args) => Some(args.target.as_str()),
      Self::Auth { .. } | Self::Version { .. } | Self::Completions { .. } => None,
    }
  }
}

impl Cli {
  /// Parse CLI arguments from the environment
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Validate CLI arguments
  ///
  /// Returns an error if the CLI configuration is invalid.
  pub fn validate(&self) -> Result<(), String> {
    if let Some(target) = self.command.target()
      && !target.contains("://")
      && self.auth.url.is_none()
    {
      return Err("--url is required when using a content ID".to_string());
    }

    if matches!(self.command, Command::Auth { subcommand: AuthCommand::Test }) && self.auth.url.is_none() {
      return Err("--url is required to test authentication".to_string());
    }

    if self.network.timeout == 0 {
      return Err("--timeout must be at least 1 second".to_string());
    }

    Ok(())
  }
}

/// Parse CLI arguments, initialize shared services, and dispatch to the chosen
/// command.
pub async fn run() {
  let cli = Cli::parse_args();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    process::exit(4); // Invalid arguments exit code
  }

  match &cli.command {
    Command::Get { target, expand, json } => {
      handle_get_command(target, expand, *json, &cli, &colors).await;
    }
    Command::Update(args) => {
      handle_update_command(args, &cli, &colors).await;
    }
    Command::Delete { target } => {
      handle_delete_command(target, &cli, &colors).await;
    }
    Command::Auth { subcommand } => {
      handle_auth_command(subcommand, &cli, &colors).await;
    }
    Command::Version { json, short } => {
      handle_version_command(*json, *short, &colors);
    }
    Command::Completions { shell } => {
      handle_completions_command(*shell);
    }
  }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Get custom styles for clap help output
fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}
