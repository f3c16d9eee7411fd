//! Interactive-element analysis
//!
//! Finds the elements on a page an agent can act on (inputs, buttons,
//! links, selects, textareas, and anything with an explicit button role)
//! and describes each with a usable CSS selector.

use crate::browser::BrowserSession;
use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One actionable element found on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Lower-cased tag name
    pub tag: String,
    /// The element's `type` attribute, if present and non-empty
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub element_type: Option<String>,
    /// Trimmed visible text, if non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// CSS selector: `#id`, then `[name="..."]`, then bare tag name
    pub selector: String,
}

/// Title plus the ordered list of interactive elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// Document title
    pub title: String,
    /// Interactive elements in document order
    pub elements: Vec<ElementDescriptor>,
}

/// In-page script producing a `PageAnalysis`-shaped object.
///
/// Selector priority per element: non-empty id, then non-empty name
/// attribute, then the lower-cased tag name as a non-unique fallback.
const ANALYZE_ELEMENTS_SCRIPT: &str = r#"
(() => {
    const nodes = document.querySelectorAll(
        'input, button, a, select, textarea, [role="button"]'
    );
    const elements = [];
    for (const el of nodes) {
        const entry = { tag: el.tagName.toLowerCase() };
        const type = el.getAttribute('type');
        if (type) entry.type = type;
        const text = (el.textContent || '').trim();
        if (text) entry.text = text;
        if (el.id) {
            entry.selector = '#' + el.id;
        } else if (el.getAttribute('name')) {
            entry.selector = '[name="' + el.getAttribute('name') + '"]';
        } else {
            entry.selector = el.tagName.toLowerCase();
        }
        elements.push(entry);
    }
    return { title: document.title, elements };
})()
"#;

/// Run the analyzer script against the session's current page
#[instrument(skip(session))]
pub async fn analyze(session: &dyn BrowserSession) -> Result<PageAnalysis> {
    let value = session.evaluate(ANALYZE_ELEMENTS_SCRIPT).await?;

    let analysis: PageAnalysis = serde_json::from_value(value)
        .map_err(|e| SessionError::EvaluationFailed(format!("malformed analysis result: {}", e)))?;

    debug!(
        "Analyzed page '{}': {} interactive elements",
        analysis.title,
        analysis.elements.len()
    );

    Ok(analysis)
}
