//! confluence-content - Read, update, and delete Confluence content
//!
//! This is the main entry point for the CLI application.

#[tokio::main]
async fn main() {
  confluence_content::cli::run().await;
}
