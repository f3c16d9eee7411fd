//! MCP tool definitions and registry
//!
//! This module defines the available MCP tools and their implementations.
//! Every browser-backed tool follows the same sequence: open a fresh
//! session, perform one navigation/extraction action, close the session,
//! return the structured output. Sessions are never shared or reused.

use crate::browser::{BrowserEngine, BrowserSession, ChromiumEngine};
use crate::error::{McpError, Result, ValidationError};
use crate::extraction::{analyzer, dom, sanitize_html};
use crate::mcp::schema;
use crate::mcp::types::{McpToolDefinition, ToolCallResult};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// A registered MCP tool
pub trait McpTool: Send + Sync {
    /// Tool name
    fn name(&self) -> &str;
    /// Tool description
    fn description(&self) -> &str;
    /// Input schema as JSON
    fn input_schema(&self) -> Value;
    /// Output schema as JSON
    fn output_schema(&self) -> Value;
    /// Get tool definition
    fn definition(&self) -> McpToolDefinition {
        McpToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
            output_schema: self.output_schema(),
        }
    }
}

/// Tool registry holding all available tools
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
    engine: Arc<dyn BrowserEngine>,
}

impl ToolRegistry {
    /// Create a registry backed by a per-invocation Chromium engine
    pub fn new() -> Self {
        Self::with_engine(Arc::new(ChromiumEngine::new()))
    }

    /// Create a registry with all built-in tools against a custom engine
    pub fn with_engine(engine: Arc<dyn BrowserEngine>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
            engine,
        };

        registry.register(Box::new(AnalyzePageTool));
        registry.register(Box::new(AnalyzeHtmlTool));
        registry.register(Box::new(PageScreenshotTool));
        registry.register(Box::new(DomTreeTool));
        registry.register(Box::new(HtmlContentTool));
        registry.register(Box::new(InnerHtmlTool));
        registry.register(Box::new(SanitizeHtmlTool));

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Box<dyn McpTool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get all tool definitions, sorted by name for stable listings
    pub fn definitions(&self) -> Vec<McpToolDefinition> {
        let mut defs: Vec<_> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a tool by name
    #[instrument(skip(self, args))]
    pub async fn execute(&self, name: &str, args: Value) -> ToolCallResult {
        info!("Executing tool: {}", name);

        let tool = match self.tools.get(name) {
            Some(t) => t,
            None => return ToolCallResult::error(format!("Tool not found: {}", name)),
        };

        match self.run_validated(tool.as_ref(), &args).await {
            Ok(output) => {
                let text = serde_json::to_string_pretty(&output)
                    .unwrap_or_else(|_| output.to_string());
                ToolCallResult::text(text)
            }
            Err(e) => {
                error!("Tool {} failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
        }
    }

    /// Validate input, run the handler, validate output
    async fn run_validated(&self, tool: &dyn McpTool, args: &Value) -> Result<Value> {
        schema::validate(args, &tool.input_schema()).map_err(|message| {
            ValidationError::InvalidInput {
                tool: tool.name().to_string(),
                message,
            }
        })?;

        let output = self.dispatch(tool.name(), args).await?;

        schema::validate(&output, &tool.output_schema()).map_err(|message| {
            ValidationError::InvalidOutput {
                tool: tool.name().to_string(),
                message,
            }
        })?;

        Ok(output)
    }

    /// Dispatch a validated call to the matching handler
    async fn dispatch(&self, name: &str, args: &Value) -> Result<Value> {
        match name {
            // Pure transformation, no session
            "sanitize-html" => {
                let html = required_str(name, args, "html")?;
                Ok(json!({ "sanitized": sanitize_html(html) }))
            }
            // Everything else runs against a scoped browser session
            "analyze-page" | "analyze-html" | "get-page-screenshot" | "extract-dom-tree"
            | "get-html-content" | "extract-inner-html" => {
                self.with_session(name, args).await
            }
            _ => Err(McpError::ToolNotFound(name.to_string()).into()),
        }
    }

    /// Run one handler inside a freshly opened session.
    ///
    /// The session is closed exactly once on every exit path; a handler
    /// error takes precedence over a close error when both occur.
    async fn with_session(&self, name: &str, args: &Value) -> Result<Value> {
        let session = self.engine.open().await?;
        let result = Self::session_work(name, args, &*session).await;
        let closed = session.close().await;
        let output = result?;
        closed?;
        Ok(output)
    }

    async fn session_work(
        name: &str,
        args: &Value,
        session: &dyn BrowserSession,
    ) -> Result<Value> {
        match name {
            "analyze-page" => {
                session.navigate(required_str(name, args, "url")?).await?;
                let analysis = analyzer::analyze(session).await?;
                Ok(serde_json::to_value(analysis)?)
            }
            "analyze-html" => {
                session.set_content(required_str(name, args, "html")?).await?;
                let analysis = analyzer::analyze(session).await?;
                Ok(serde_json::to_value(analysis)?)
            }
            "get-page-screenshot" => {
                session.navigate(required_str(name, args, "url")?).await?;
                let image = session.screenshot_base64().await?;
                Ok(json!({ "imageBase64": image }))
            }
            "extract-dom-tree" => {
                session.navigate(required_str(name, args, "url")?).await?;
                let tree = dom::extract_tree(session).await?;
                Ok(json!({ "tree": serde_json::to_value(tree)? }))
            }
            "get-html-content" => {
                session.navigate(required_str(name, args, "url")?).await?;
                let html = dom::document_html(session).await?;
                Ok(json!({ "html": html }))
            }
            "extract-inner-html" => {
                session.navigate(required_str(name, args, "url")?).await?;
                let selector = required_str(name, args, "selector")?;
                match dom::inner_html(session, selector).await? {
                    Some(html) => Ok(json!({ "innerHTML": html })),
                    // Selector matched nothing: normal output, field absent
                    None => Ok(json!({})),
                }
            }
            _ => Err(McpError::ToolNotFound(name.to_string()).into()),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull a string field the input schema has already required
fn required_str<'a>(tool: &str, args: &'a Value, field: &str) -> Result<&'a str> {
    args.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            ValidationError::InvalidInput {
                tool: tool.to_string(),
                message: format!("missing required field '{}'", field),
            }
            .into()
        })
}

// ============================================================================
// Tool Definitions
// ============================================================================

fn url_input_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "url": {
                "type": "string",
                "description": description
            }
        },
        "required": ["url"]
    })
}

fn analysis_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "elements": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "tag": { "type": "string" },
                        "type": { "type": "string" },
                        "text": { "type": "string" },
                        "selector": { "type": "string" }
                    },
                    "required": ["tag", "selector"]
                }
            }
        },
        "required": ["title", "elements"]
    })
}

/// Analyze a page's interactive elements
struct AnalyzePageTool;

impl McpTool for AnalyzePageTool {
    fn name(&self) -> &str {
        "analyze-page"
    }

    fn description(&self) -> &str {
        "Navigate to a URL and list the page title and interactive elements (inputs, buttons, links, selects, textareas) with usable CSS selectors"
    }

    fn input_schema(&self) -> Value {
        url_input_schema("The URL to analyze")
    }

    fn output_schema(&self) -> Value {
        analysis_output_schema()
    }
}

/// Analyze an HTML string's interactive elements
struct AnalyzeHtmlTool;

impl McpTool for AnalyzeHtmlTool {
    fn name(&self) -> &str {
        "analyze-html"
    }

    fn description(&self) -> &str {
        "Load an HTML string into the browser and list the title and interactive elements, without touching the network"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "html": {
                    "type": "string",
                    "description": "The HTML content to analyze"
                }
            },
            "required": ["html"]
        })
    }

    fn output_schema(&self) -> Value {
        analysis_output_schema()
    }
}

/// Capture a full-page screenshot
struct PageScreenshotTool;

impl McpTool for PageScreenshotTool {
    fn name(&self) -> &str {
        "get-page-screenshot"
    }

    fn description(&self) -> &str {
        "Navigate to a URL and capture a base64-encoded full-page PNG screenshot"
    }

    fn input_schema(&self) -> Value {
        url_input_schema("The URL to capture")
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "imageBase64": { "type": "string" }
            },
            "required": ["imageBase64"]
        })
    }
}

/// Serialize the DOM into a tree of tag/id/class nodes
struct DomTreeTool;

impl McpTool for DomTreeTool {
    fn name(&self) -> &str {
        "extract-dom-tree"
    }

    fn description(&self) -> &str {
        "Navigate to a URL and serialize the document body into a tree of {tag, id, class, children} nodes"
    }

    fn input_schema(&self) -> Value {
        url_input_schema("The URL to extract the DOM tree from")
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "tree": {
                    "type": "object",
                    "properties": {
                        "tag": { "type": "string" },
                        "id": { "type": "string" },
                        "class": { "type": "string" },
                        "children": { "type": "array" }
                    },
                    "required": ["tag", "children"]
                }
            },
            "required": ["tree"]
        })
    }
}

/// Retrieve the full serialized document markup
struct HtmlContentTool;

impl McpTool for HtmlContentTool {
    fn name(&self) -> &str {
        "get-html-content"
    }

    fn description(&self) -> &str {
        "Navigate to a URL and return the full serialized document markup"
    }

    fn input_schema(&self) -> Value {
        url_input_schema("The URL to retrieve HTML from")
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "html": { "type": "string" }
            },
            "required": ["html"]
        })
    }
}

/// Retrieve the inner HTML of one element
struct InnerHtmlTool;

impl McpTool for InnerHtmlTool {
    fn name(&self) -> &str {
        "extract-inner-html"
    }

    fn description(&self) -> &str {
        "Navigate to a URL and return the inner HTML of the first element matching a CSS selector; the field is absent when nothing matches"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to query"
                },
                "selector": {
                    "type": "string",
                    "description": "CSS selector for the target element"
                }
            },
            "required": ["url", "selector"]
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "innerHTML": { "type": "string" }
            }
        })
    }
}

/// Strip active content from an HTML string
struct SanitizeHtmlTool;

impl McpTool for SanitizeHtmlTool {
    fn name(&self) -> &str {
        "sanitize-html"
    }

    fn description(&self) -> &str {
        "Strip script/style/iframe blocks, double-quoted inline event handlers, and javascript: scheme prefixes from an HTML string (best-effort textual filter)"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "html": {
                    "type": "string",
                    "description": "The HTML content to sanitize"
                }
            },
            "required": ["html"]
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sanitized": { "type": "string" }
            },
            "required": ["sanitized"]
        })
    }
}

/// List of all available tools (for documentation)
pub const AVAILABLE_TOOLS: &[&str] = &[
    "analyze-page",
    "analyze-html",
    "get-page-screenshot",
    "extract-dom-tree",
    "get-html-content",
    "extract-inner-html",
    "sanitize-html",
];
