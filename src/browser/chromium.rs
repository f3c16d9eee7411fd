//! Chromium-backed engine implementation
//!
//! This module drives a headless Chromium process over CDP. Each call to
//! [`ChromiumEngine::open`] launches a fresh browser with a single page;
//! the session owns the process and releases it on close.

use crate::browser::engine::{BrowserEngine, BrowserSession};
use crate::error::{Result, SessionError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::Value;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Configuration for browser launch
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode (default: true)
    pub headless: bool,
    /// Browser window width (default: 1920)
    pub width: u32,
    /// Browser window height (default: 1080)
    pub height: u32,
    /// Enable sandbox (default: true for production)
    pub sandbox: bool,
    /// Per-call timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// Path to Chrome/Chromium executable (None = auto-detect)
    pub chrome_path: Option<String>,
    /// Additional Chrome arguments
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            width: 1920,
            height: 1080,
            sandbox: true,
            timeout_ms: 30000,
            chrome_path: None,
            extra_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    /// Create a new config builder
    pub fn builder() -> BrowserConfigBuilder {
        BrowserConfigBuilder::default()
    }
}

/// Builder for BrowserConfig
#[derive(Default)]
pub struct BrowserConfigBuilder {
    config: BrowserConfig,
}

impl BrowserConfigBuilder {
    /// Set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Set viewport dimensions
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enable/disable sandbox
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Set per-call timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set Chrome path
    pub fn chrome_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Add extra Chrome argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.config.extra_args.push(arg.into());
        self
    }

    /// Build the config
    pub fn build(self) -> BrowserConfig {
        self.config
    }
}

/// Engine that launches a fresh Chromium process per session
pub struct ChromiumEngine {
    config: BrowserConfig,
}

impl ChromiumEngine {
    /// Create an engine with default config
    pub fn new() -> Self {
        Self::with_config(BrowserConfig::default())
    }

    /// Create an engine with custom config
    pub fn with_config(config: BrowserConfig) -> Self {
        Self { config }
    }

    /// Get the browser configuration
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}

impl Default for ChromiumEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    #[instrument(skip(self))]
    async fn open(&self) -> Result<Box<dyn BrowserSession>> {
        let config = &self.config;
        info!("Launching browser: headless={}", config.headless);

        let mut builder = CdpBrowserConfig::builder();

        builder = builder.viewport(chromiumoxide::handler::viewport::Viewport {
            width: config.width,
            height: config.height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: true,
            has_touch: false,
        });

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.arg("--no-sandbox");
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        for arg in &config.extra_args {
            builder = builder.arg(arg);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| SessionError::ConfigError(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| SessionError::LaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    warn!("Browser handler event error");
                    break;
                }
            }
            debug!("Browser handler finished");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SessionError::LaunchFailed(e.to_string()))?;

        debug!("Browser launched, page ready");

        Ok(Box::new(ChromiumSession {
            browser,
            handler: handler_task,
            page,
            timeout_ms: config.timeout_ms,
        }))
    }
}

/// One Chromium process plus one page
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
    timeout_ms: u64,
}

impl ChromiumSession {
    async fn bounded<F, T, E>(&self, fut: F) -> Result<std::result::Result<T, E>>
    where
        F: std::future::Future<Output = std::result::Result<T, E>>,
    {
        tokio::time::timeout(Duration::from_millis(self.timeout_ms), fut)
            .await
            .map_err(|_| SessionError::Timeout(self.timeout_ms).into())
    }

    /// Wait until the document has finished loading.
    async fn wait_for_ready(&self) -> Result<()> {
        let script = r#"
            new Promise(resolve => {
                if (document.readyState === 'complete') {
                    resolve(true);
                } else {
                    window.addEventListener('load', () => resolve(true));
                }
            })
        "#;

        self.bounded(self.page.evaluate(script))
            .await?
            .map_err(|e| SessionError::NavigationFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    #[instrument(skip(self))]
    async fn navigate(&self, url: &str) -> Result<()> {
        // Reject unparseable URLs before handing them to the engine
        let parsed = url::Url::parse(url).map_err(|e| {
            SessionError::InvalidUrl(format!("{}: {}", url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https" | "file") {
            return Err(SessionError::InvalidUrl(format!(
                "URL must use http, https, or file scheme: {}",
                url
            ))
            .into());
        }

        info!("Navigating to: {}", url);

        self.bounded(self.page.goto(url))
            .await?
            .map_err(|e| SessionError::NavigationFailed(e.to_string()))?;

        self.wait_for_ready().await?;

        debug!("Navigation complete: {}", url);
        Ok(())
    }

    #[instrument(skip(self, html))]
    async fn set_content(&self, html: &str) -> Result<()> {
        debug!("Setting page content: {} bytes", html.len());

        self.bounded(self.page.set_content(html))
            .await?
            .map_err(|e| SessionError::SetContentFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, script))]
    async fn evaluate(&self, script: &str) -> Result<Value> {
        let result = self
            .bounded(self.page.evaluate(script))
            .await?
            .map_err(|e| SessionError::EvaluationFailed(e.to_string()))?;

        let value: Value = result
            .into_value()
            .map_err(|e| SessionError::EvaluationFailed(e.to_string()))?;

        Ok(value)
    }

    #[instrument(skip(self))]
    async fn screenshot_base64(&self) -> Result<String> {
        info!("Capturing full-page screenshot");

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .from_surface(true)
            .capture_beyond_viewport(true)
            .build();

        let data = self
            .bounded(self.page.screenshot(params))
            .await?
            .map_err(|e| SessionError::ScreenshotFailed(e.to_string()))?;

        debug!("Screenshot captured: {} bytes", data.len());
        Ok(BASE64.encode(&data))
    }

    #[instrument(skip(self))]
    async fn close(self: Box<Self>) -> Result<()> {
        info!("Closing browser session");

        let Self {
            mut browser,
            handler,
            ..
        } = *self;

        browser
            .close()
            .await
            .map_err(|e| SessionError::CloseFailed(e.to_string()))?;

        // Give the handler task a bounded window to drain
        let _ = tokio::time::timeout(Duration::from_secs(5), handler).await;

        info!("Browser session closed");
        Ok(())
    }
}
