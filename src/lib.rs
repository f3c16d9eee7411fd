//! PageScope - Headless-Browser Page Analysis for AI Agents
//!
//! This crate provides an MCP (Model Context Protocol) server exposing a
//! small set of browser-automation tools: page analysis, screenshot
//! capture, DOM extraction, HTML retrieval, and best-effort HTML
//! sanitization.
//!
//! # Architecture
//!
//! ```text
//! AI Agent ──▶ MCP Server ──▶ Tool Registry ──▶ Browser Session (CDP)
//!                                  │                  │
//!                                  ▼                  ▼
//!                            Schema checks       Extraction
//!                            (input/output)      (elements, DOM tree,
//!                                                 markup, screenshot)
//! ```
//!
//! Every browser-backed tool opens its own session, performs one
//! navigation/extraction action, and closes the session before returning —
//! on success and failure paths alike. Nothing is shared between
//! invocations.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pagescope::mcp::{McpServer, ToolRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ToolRegistry::new();
//!     let server = McpServer::new(registry);
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod error;
pub mod extraction;
pub mod mcp;

// Re-exports for convenience
pub use browser::{BrowserConfig, BrowserEngine, BrowserSession, ChromiumEngine};
pub use error::{Error, Result};
pub use extraction::{sanitize_html, DomNode, ElementDescriptor, PageAnalysis};
pub use mcp::{McpServer, McpTool, ToolRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
