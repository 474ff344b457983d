//! CLI subcommand handlers.
//!
//! Each handler owns its terminal output and exit codes so that `cli::run`
//! stays a thin dispatcher.

pub mod auth;
pub mod completions;
pub mod content;
pub mod version;
