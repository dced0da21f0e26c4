//! Daemon entry point for the Lean Mathlib 4 doc search MCP server.
//!
//! Loads configuration from the command line and environment, then either
//! serves the MCP protocol, pre-fetches the declaration dataset, or runs a
//! one-off search and prints the rendered results.

mod config;
mod logging;

use std::sync::Arc;

use leandoc_core::control::LeanDocControlPlane;
use leandoc_core::fetch::FetchOutcome;
use leandoc_core::format::format_result;
use leandoc_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::info;

use crate::config::{Command, LeanDocConfig, Transport};
use crate::logging::init_logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = LeanDocConfig::from_args()?;
    init_logger(config.verbose);

    let control = Arc::new(LeanDocControlPlane::new(config.control_config()));
    info!(
        dataset = %control.dataset_path().display(),
        max_results = control.max_results(),
        "leandoc-mcpd starting"
    );

    match config.command {
        Command::Serve => match config.transport {
            Transport::Stdio => serve_stdio(control).await?,
            Transport::Http => {
                let http = McpHttpServerConfig::new(config.mcp_http_addr);
                serve_streamable_http(control, http).await?;
            }
        },
        Command::Fetch => match control.fetch().await? {
            FetchOutcome::AlreadyPresent => {
                info!(path = %control.dataset_path().display(), "dataset already present");
            }
            FetchOutcome::Downloaded { bytes } => {
                info!(path = %control.dataset_path().display(), bytes, "dataset downloaded");
            }
        },
        Command::Search {
            queries,
            scope,
            limit,
        } => {
            let results = control.search(&queries, scope, limit).await?;
            for result in &results {
                println!("{}", format_result(result));
            }
            info!(hits = results.len(), %scope, "search finished");
        }
    }
    Ok(())
}
