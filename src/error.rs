//! Error types for PageScope
//!
//! This module provides the error type hierarchy using `thiserror`
//! for proper error handling across all components.

use thiserror::Error;

/// The main error type for PageScope operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Browser session errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// MCP protocol errors
    #[error("MCP error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Input/output schema validation errors
///
/// A payload that does not conform to a tool's declared schema is rejected
/// outright, never coerced.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Tool input does not match the declared input schema
    #[error("Invalid input for tool '{tool}': {message}")]
    InvalidInput {
        /// Tool name
        tool: String,
        /// What failed to validate
        message: String,
    },

    /// Handler output does not match the declared output schema
    #[error("Invalid output from tool '{tool}': {message}")]
    InvalidOutput {
        /// Tool name
        tool: String,
        /// What failed to validate
        message: String,
    },
}

/// Browser engine failures: launch, navigation, evaluation, capture
#[derive(Error, Debug)]
pub enum SessionError {
    /// Failed to launch the browser process
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// URL failed to parse at navigation time
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Navigation to a URL failed
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Setting page content failed
    #[error("Failed to set page content: {0}")]
    SetContentFailed(String),

    /// In-page script evaluation failed
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    /// Screenshot capture failed
    #[error("Screenshot capture failed: {0}")]
    ScreenshotFailed(String),

    /// Engine call exceeded the configured deadline
    #[error("Session operation timed out after {0}ms")]
    Timeout(u64),

    /// Closing the session failed
    #[error("Failed to close session: {0}")]
    CloseFailed(String),
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    /// Invalid JSON-RPC request
    #[error("Invalid JSON-RPC request: {0}")]
    InvalidRequest(String),

    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type alias for PageScope operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }
}
