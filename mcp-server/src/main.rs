//! TokenTab MCP Server
//!
//! Exposes the TokenTab dashboard widgets as MCP tools over stdio:
//! - The updates feed, one page per call
//! - Market bubbles and pinned token prices
//! - The header greeting and display name

mod dashboard;
mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::TokenTabServer;
use tokentab_dashboard::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    tracing::info!(
        feed_url = %config.feed_url,
        store = %config.store_path.display(),
        analytics = config.analytics_enabled(),
        "Starting TokenTab MCP server"
    );

    let server = TokenTabServer::from_config(config)?;
    server.session_started().await;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    // Wait for shutdown
    service.waiting().await?;

    Ok(())
}
