//! Browser automation module
//!
//! This module provides the engine seam used by tool handlers and the
//! Chromium-backed implementation that drives a headless browser over CDP.

pub mod chromium;
pub mod engine;

pub use chromium::{BrowserConfig, ChromiumEngine, ChromiumSession};
pub use engine::{BrowserEngine, BrowserSession};
