//! Confluence content library
//!
//! This library provides a typed client for fetching, updating, and deleting
//! Confluence content over the REST API, plus the command-line front end
//! built on it.

pub mod cli;
pub mod color;
pub mod commands;
pub mod confluence;
pub mod credentials;
