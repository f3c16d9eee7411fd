//! Browser engine seam
//!
//! The traits here are the boundary between tool handlers and the external
//! headless-browser engine. Handlers only ever see these traits; the
//! production implementation lives in [`crate::browser::chromium`] and test
//! doubles implement them to verify session lifecycle without a real
//! browser.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A factory for browser sessions.
///
/// One call to [`BrowserEngine::open`] yields one session: a fresh browser
/// process with a single page. Sessions are never pooled or shared between
/// invocations.
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// Launch a new browser session.
    async fn open(&self) -> Result<Box<dyn BrowserSession>>;
}

/// One headless browser plus one page, exclusively owned by a single tool
/// invocation.
///
/// Every session obtained from [`BrowserEngine::open`] must be closed
/// exactly once via [`BrowserSession::close`], on success and failure paths
/// alike.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the page to a URL and wait for it to load.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Replace the page's document with the given HTML markup.
    ///
    /// Malformed markup is tolerated; the engine parses best-effort.
    async fn set_content(&self, html: &str) -> Result<()>;

    /// Evaluate a script in the page and return its JSON result.
    async fn evaluate(&self, script: &str) -> Result<Value>;

    /// Capture a full-page PNG screenshot, base64-encoded.
    async fn screenshot_base64(&self) -> Result<String>;

    /// Close the session, releasing the browser process.
    async fn close(self: Box<Self>) -> Result<()>;
}
