//! `get`, `update`, and `delete` subcommand handlers.
//!
//! Each handler resolves the content reference, builds a client for the
//! instance, performs a single API call, and reports the outcome. Failures
//! exit with code 1, or 2 when the server rejects the credentials.

use std::path::Path;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::cli::{Cli, UpdateArgs};
use crate::color::ColorScheme;
use crate::commands::auth::load_credentials;
use crate::confluence::{ClientConfig, Content, ContentApi, ContentClient, ContentError, ContentUpdate, parse_content_target};

/// Instance URL and content ID a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedTarget {
  pub instance_url: String,
  pub content_id: String,
}

/// Resolve a CLI target into an instance URL and content ID.
///
/// URLs carry their own instance; bare IDs use `--url`.
pub(crate) fn resolve_target(target: &str, cli: &Cli) -> Result<ResolvedTarget> {
  let parsed = parse_content_target(target).context("Could not determine content identifier")?;
  let instance_url = parsed
    .instance_url
    .or_else(|| cli.auth.url.clone())
    .context("--url is required when using a content ID")?;

  Ok(ResolvedTarget {
    instance_url,
    content_id: parsed.content_id,
  })
}

/// Build an authenticated client for `instance_url`.
pub(crate) fn build_client(instance_url: &str, cli: &Cli) -> Result<ContentClient> {
  let (username, token) = load_credentials(instance_url, cli)?;
  let config = ClientConfig::for_instance(instance_url, &cli.auth.api_path)
    .with_basic_auth(username, token)
    .with_timeout(Duration::from_secs(cli.network.timeout));

  ContentClient::from_config(&config)
}

/// Handle `confluence-content get`.
pub(crate) async fn handle_get_command(target: &str, expand: &[String], json: bool, cli: &Cli, colors: &ColorScheme) {
  if let Err(error) = run_get_command(target, expand, json, cli, colors).await {
    report_failure("Failed to fetch content", &error, colors);
  }
}

async fn run_get_command(target: &str, expand: &[String], json: bool, cli: &Cli, colors: &ColorScheme) -> Result<()> {
  let resolved = resolve_target(target, cli)?;
  let client = build_client(&resolved.instance_url, cli)?;

  let content = client
    .fetch_content(&resolved.content_id, expand)
    .await
    .with_context(|| format!("Could not fetch content {}", resolved.content_id))?;

  if json {
    let rendered = serde_json::to_string_pretty(&content).context("Failed to render content as JSON")?;
    println!("{rendered}");
    return Ok(());
  }

  print_content_summary(&content, &resolved.instance_url, colors);
  Ok(())
}

fn print_content_summary(content: &Content, instance_url: &str, colors: &ColorScheme) {
  println!("{}", colors.emphasis(&content.title));
  println!("  {}: {}", colors.emphasis("ID"), colors.number(&content.id));
  println!("  {}: {}", colors.emphasis("Type"), content.content_type);

  if content.version.number > 0 {
    let mut line = format!("{}", colors.number(content.version.number));
    if !content.version.by.display_name.is_empty() {
      line.push_str(&format!(" by {}", content.version.by.display_name));
    }
    if let Some(edited) = content.version.edited_at() {
      line.push_str(&format!(" on {}", edited.format("%Y-%m-%d %H:%M")));
    }
    println!("  {}: {}", colors.emphasis("Version"), line);
    if !content.version.message.is_empty() {
      println!("  {}: {}", colors.emphasis("Message"), content.version.message);
    }
  }

  if !content.space.key.is_empty() {
    println!(
      "  {}: {} ({})",
      colors.emphasis("Space"),
      content.space.name,
      colors.code(&content.space.key)
    );
  }

  if let Some(web_ui) = content.web_ui_link() {
    let base = content
      .links
      .get("base")
      .filter(|base| !base.is_empty())
      .map_or(instance_url, String::as_str);
    println!("  {}: {}", colors.emphasis("Link"), colors.link(format!("{base}{web_ui}")));
  }

  if let Some(storage) = &content.body.storage {
    println!(
      "  {}: {} characters ({})",
      colors.emphasis("Body"),
      colors.number(storage.value.chars().count()),
      storage.representation
    );
  } else if !content.body.view.value.is_empty() {
    println!(
      "  {}: {} characters ({})",
      colors.emphasis("Body"),
      colors.number(content.body.view.value.chars().count()),
      content.body.view.representation
    );
  }

  let pending = content.pending_expansions();
  if !pending.is_empty() {
    println!("  {}: {}", colors.dimmed("Expandable"), colors.dimmed(pending.join(", ")));
  }
}

/// Handle `confluence-content update`.
pub(crate) async fn handle_update_command(args: &UpdateArgs, cli: &Cli, colors: &ColorScheme) {
  if let Err(error) = run_update_command(args, cli, colors).await {
    report_failure("Failed to update content", &error, colors);
  }
}

async fn run_update_command(args: &UpdateArgs, cli: &Cli, colors: &ColorScheme) -> Result<()> {
  let resolved = resolve_target(&args.target, cli)?;
  let body = read_body(&args.file).await?;

  println!("{} {}", colors.progress("→"), colors.info("Updating content"));
  println!("  {}: {}", colors.emphasis("ID"), colors.number(&resolved.content_id));
  println!(
    "  {}: {}",
    colors.emphasis("Source"),
    colors.path(args.file.display())
  );

  let client = build_client(&resolved.instance_url, cli)?;
  let update = prepare_update(&client, &resolved.content_id, args, body).await?;

  if cli.behavior.dry_run {
    println!(
      "\n{} {}",
      colors.warning("⚠"),
      colors.warning("DRY RUN: the following update would be sent")
    );
    let payload = serde_json::to_string_pretty(&update).context("Failed to render update payload")?;
    println!("{payload}");
    return Ok(());
  }

  let accepted = client
    .update_content(&update)
    .await
    .with_context(|| format!("Could not update content {}", resolved.content_id))?;

  println!(
    "\n{} {} {} {}",
    colors.success("✓"),
    colors.success("Updated"),
    colors.emphasis(&accepted.title),
    colors.dimmed(format!("(version {})", accepted.version.number))
  );
  Ok(())
}

/// Build the update payload for `content_id`.
///
/// When either the title or the version number is not given on the command
/// line, the current content is fetched and the update targets the version
/// after it.
pub(crate) async fn prepare_update<A>(api: &A, content_id: &str, args: &UpdateArgs, body: String) -> Result<ContentUpdate>
where
  A: ContentApi + ?Sized,
{
  let mut update = match (&args.title, args.version_number) {
    (Some(title), Some(number)) => {
      let mut update = ContentUpdate::new(content_id, title.clone(), body, number);
      update.content_type = args.content_type.clone();
      update
    }
    _ => {
      let current = api
        .fetch_content(content_id, &[String::from("version")])
        .await
        .with_context(|| format!("Could not read current version of content {content_id}"))?;
      let mut update = current.next_update(body);
      update.id = content_id.to_string();
      if let Some(title) = &args.title {
        update.title = title.clone();
      }
      if let Some(number) = args.version_number {
        update.version.number = number;
      }
      update
    }
  };

  update.body.storage.representation = args.representation.clone();
  if let Some(message) = &args.message {
    update = update.with_message(message.clone());
  }
  if args.minor_edit {
    update = update.with_minor_edit(true);
  }

  Ok(update)
}

async fn read_body(path: &Path) -> Result<String> {
  if path == Path::new("-") {
    let mut body = String::new();
    tokio::io::stdin()
      .read_to_string(&mut body)
      .await
      .context("Failed to read body from stdin")?;
    return Ok(body);
  }

  tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("Failed to read body from {}", path.display()))
}

/// Handle `confluence-content delete`.
pub(crate) async fn handle_delete_command(target: &str, cli: &Cli, colors: &ColorScheme) {
  if let Err(error) = run_delete_command(target, cli, colors).await {
    report_failure("Failed to delete content", &error, colors);
  }
}

async fn run_delete_command(target: &str, cli: &Cli, colors: &ColorScheme) -> Result<()> {
  let resolved = resolve_target(target, cli)?;

  if cli.behavior.dry_run {
    println!(
      "{} {} {}",
      colors.warning("⚠"),
      colors.warning("DRY RUN: would delete content"),
      colors.number(&resolved.content_id)
    );
    return Ok(());
  }

  let client = build_client(&resolved.instance_url, cli)?;
  client
    .delete_content(&resolved.content_id)
    .await
    .with_context(|| format!("Could not delete content {}", resolved.content_id))?;

  println!(
    "{} {} {}",
    colors.success("✓"),
    colors.success("Deleted content"),
    colors.number(&resolved.content_id)
  );
  Ok(())
}

/// Print a failure with a hint for well-known API errors and exit.
fn report_failure(action: &str, error: &anyhow::Error, colors: &ColorScheme) -> ! {
  eprintln!("{} {}", colors.error("✗"), colors.error(action));
  eprintln!("  {}: {:#}", colors.emphasis("Error"), error);

  let api_error = error.chain().find_map(|cause| cause.downcast_ref::<ContentError>());
  match api_error {
    Some(err) if err.is_unauthorized() => {
      eprintln!(
        "\n{}",
        colors.dimmed("Run 'confluence-content auth show' to check your credentials")
      );
      process::exit(2);
    }
    Some(err) if err.is_not_found() => {
      eprintln!("\n{}", colors.dimmed("Check the content ID and that you can view it"));
    }
    Some(err) if err.is_version_conflict() => {
      eprintln!(
        "\n{}",
        colors.dimmed("The content changed since it was read; retry or pass --version-number")
      );
    }
    _ => {}
  }

  process::exit(1);
}
