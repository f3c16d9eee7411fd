//! PageScope MCP Server
//!
//! Headless-browser page analysis and extraction tools over MCP stdio.

use anyhow::Result;
use clap::Parser;
use pagescope::browser::{BrowserConfig, ChromiumEngine};
use pagescope::mcp::{McpServer, ToolRegistry};
use std::sync::Arc;

/// PageScope MCP Server
#[derive(Parser, Debug)]
#[command(name = "pagescope")]
#[command(version)]
#[command(about = "MCP server for headless-browser page analysis and extraction")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Run the browser in headless mode
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Disable the Chromium sandbox (needed in some containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Per-call browser timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };

    // stdout carries the protocol; all diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = BrowserConfig::builder()
        .headless(args.headless)
        .sandbox(!args.no_sandbox)
        .timeout_ms(args.timeout_ms);
    if let Some(path) = args.chrome_path {
        config = config.chrome_path(path);
    }

    let engine = Arc::new(ChromiumEngine::with_config(config.build()));
    let registry = ToolRegistry::with_engine(engine);
    let server = McpServer::new(registry);

    tracing::info!("PageScope MCP server starting on stdio");

    server.run().await?;
    Ok(())
}
