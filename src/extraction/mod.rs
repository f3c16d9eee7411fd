//! Content extraction module
//!
//! The structured queries the tools run against a page (interactive-element
//! analysis, DOM tree serialization, raw-markup retrieval) and the
//! best-effort HTML sanitizer.

pub mod analyzer;
pub mod dom;
pub mod sanitize;

pub use analyzer::{analyze, ElementDescriptor, PageAnalysis};
pub use dom::{document_html, extract_tree, inner_html, DomNode};
pub use sanitize::sanitize_html;
