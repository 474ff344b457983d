//! Version/metadata reporting for `confluence-content version`.

use serde_json::json;

use crate::color::ColorScheme;

/// Build metadata embedded by `build.rs`.
struct BuildInfo {
  version: &'static str,
  git_commit: &'static str,
  built: String,
  target: &'static str,
  rustc: &'static str,
}

impl BuildInfo {
  fn current() -> Self {
    Self {
      version: env!("CARGO_PKG_VERSION"),
      git_commit: option_env!("GIT_HASH").unwrap_or("unknown"),
      built: format_timestamp(env!("BUILD_TIMESTAMP")),
      target: env!("TARGET"),
      rustc: env!("RUSTC_VERSION"),
    }
  }

  fn to_json(&self) -> serde_json::Value {
    json!({
      "version": self.version,
      "git_commit": self.git_commit,
      "build_timestamp": self.built,
      "target": self.target,
      "rust_version": self.rustc,
    })
  }
}

/// Print version and build metadata as JSON, a bare version, or colored text.
pub(crate) fn handle_version_command(json: bool, short: bool, colors: &ColorScheme) {
  let info = BuildInfo::current();

  if short {
    println!("{}", info.version);
    return;
  }

  if json {
    match serde_json::to_string_pretty(&info.to_json()) {
      Ok(rendered) => println!("{rendered}"),
      Err(e) => eprintln!("{} {e}", colors.error("Error:")),
    }
    return;
  }

  println!("{} {}", colors.emphasis("confluence-content"), colors.number(info.version));
  println!("{}: {}", colors.emphasis("Git commit"), colors.code(info.git_commit));
  println!("{}: {}", colors.emphasis("Built"), colors.dimmed(&info.built));
  println!("{}: {}", colors.emphasis("Target"), info.target);
  println!("{}: {}", colors.emphasis("Rust version"), info.rustc);
}

/// Render Unix epoch seconds as `YYYY-MM-DD HH:MM:SS UTC`, falling back to
/// the raw input.
fn format_timestamp(timestamp: &str) -> String {
  timestamp
    .parse::<i64>()
    .ok()
    .and_then(|secs| chrono::DateTime::<chrono::Utc>::from_timestamp(secs, 0))
    .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    .unwrap_or_else(|| timestamp.to_string())
}
