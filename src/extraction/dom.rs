//! Structural DOM queries
//!
//! Serializes the live document into a [`DomNode`] tree and answers the
//! raw-markup queries (full document HTML, per-selector inner HTML).

use crate::browser::BrowserSession;
use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

/// One element in the serialized DOM tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomNode {
    /// Lower-cased tag name
    pub tag: String,
    /// The id attribute, if non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The class attribute string, if non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Child elements in document order; empty for leaves
    #[serde(default)]
    pub children: Vec<DomNode>,
}

/// Depth-first pre-order serialization starting at the document body.
///
/// Recursion runs inside the page, where the document being a finite tree
/// bounds the depth; the Rust side only deserializes the result.
const DOM_TREE_SCRIPT: &str = r#"
(() => {
    const serialize = (el) => {
        const node = { tag: el.tagName.toLowerCase(), children: [] };
        if (el.id) node.id = el.id;
        const cls = el.getAttribute('class');
        if (cls) node.class = cls;
        for (const child of el.children) {
            node.children.push(serialize(child));
        }
        return node;
    };
    return serialize(document.body);
})()
"#;

/// Serialize the session's current document body into a tree
#[instrument(skip(session))]
pub async fn extract_tree(session: &dyn BrowserSession) -> Result<DomNode> {
    let value = session.evaluate(DOM_TREE_SCRIPT).await?;

    let tree: DomNode = serde_json::from_value(value)
        .map_err(|e| SessionError::EvaluationFailed(format!("malformed DOM tree: {}", e)))?;

    debug!("Extracted DOM tree rooted at <{}>", tree.tag);
    Ok(tree)
}

/// Get the full serialized document markup
#[instrument(skip(session))]
pub async fn document_html(session: &dyn BrowserSession) -> Result<String> {
    let value = session
        .evaluate("document.documentElement.outerHTML")
        .await?;

    match value {
        Value::String(html) => Ok(html),
        other => Err(SessionError::EvaluationFailed(format!(
            "expected document markup string, got {}",
            other
        ))
        .into()),
    }
}

/// Get the inner HTML of the first element matching `selector`.
///
/// A selector that matches nothing is normal output (`None`), not an error;
/// querying is distinguished from navigating.
#[instrument(skip(session))]
pub async fn inner_html(session: &dyn BrowserSession, selector: &str) -> Result<Option<String>> {
    let probe = inner_html_probe(selector);
    let value = session.evaluate(&probe).await?;

    match value {
        Value::Null => Ok(None),
        Value::String(html) => Ok(Some(html)),
        other => Err(SessionError::EvaluationFailed(format!(
            "expected innerHTML string or null, got {}",
            other
        ))
        .into()),
    }
}

/// Build the querySelector probe with the selector embedded as a JSON
/// string literal, so quoting in the selector cannot break the script.
fn inner_html_probe(selector: &str) -> String {
    let sel = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(() => {{ const el = document.querySelector({sel}); return el ? el.innerHTML : null; }})()"#
    )
}
