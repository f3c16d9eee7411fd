//! Extraction module tests
//!
//! These tests verify the sanitizer contract and the extraction output
//! shapes (element descriptors and DOM tree nodes).

use pagescope::extraction::{sanitize_html, DomNode, ElementDescriptor, PageAnalysis};
use pretty_assertions::assert_eq;

// ============================================================================
// Sanitizer contract
// ============================================================================

#[test]
fn test_sanitize_strips_script_block() {
    assert_eq!(
        sanitize_html("<script>evil()</script><b>ok</b>"),
        "<b>ok</b>"
    );
}

#[test]
fn test_sanitize_strips_inline_handler() {
    assert_eq!(sanitize_html("<p onclick=\"alert(1)\">hi</p>"), "<p>hi</p>");
}

#[test]
fn test_sanitize_is_idempotent_on_clean_input() {
    let input = "<div class=\"card\"><p>hello <b>world</b></p></div>";
    let once = sanitize_html(input);
    assert_eq!(once, input);
    assert_eq!(sanitize_html(&once), once);
}

#[test]
fn test_sanitize_handles_all_five_passes_together() {
    let input = concat!(
        "<script>a()</script>",
        "<style>.x{}</style>",
        "<div onclick=\"b()\">",
        "<a href=\"javascript:c()\">link</a>",
        "<iframe src=\"x\"></iframe>",
        "</div>"
    );
    assert_eq!(
        sanitize_html(input),
        "<div><a href=\"c()\">link</a></div>"
    );
}

#[test]
fn test_sanitize_scheme_case_insensitive() {
    assert_eq!(
        sanitize_html("<a href=\"JavaScript:x()\">y</a>"),
        "<a href=\"x()\">y</a>"
    );
}

// ============================================================================
// Element descriptors
// ============================================================================

#[test]
fn test_analysis_parse_selector_priority() {
    // Mirrors what the in-page analyzer emits: id beats name beats tag
    let analysis: PageAnalysis = serde_json::from_value(serde_json::json!({
        "title": "Search",
        "elements": [
            { "tag": "input", "type": "text", "selector": "#q" },
            { "tag": "button", "text": "Go", "selector": "[name=\"go\"]" },
            { "tag": "textarea", "selector": "textarea" }
        ]
    }))
    .unwrap();

    assert_eq!(analysis.title, "Search");
    assert_eq!(analysis.elements[0].selector, "#q");
    assert_eq!(analysis.elements[0].element_type.as_deref(), Some("text"));
    assert_eq!(analysis.elements[1].selector, "[name=\"go\"]");
    assert!(analysis.elements[1].element_type.is_none());
    assert_eq!(analysis.elements[2].selector, "textarea");
}

#[test]
fn test_element_descriptor_wire_shape() {
    let descriptor = ElementDescriptor {
        tag: "input".to_string(),
        element_type: Some("text".to_string()),
        text: None,
        selector: "#q".to_string(),
    };

    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(json["tag"], "input");
    assert_eq!(json["type"], "text");
    assert_eq!(json["selector"], "#q");
    assert!(json.get("text").is_none());
}

// ============================================================================
// DOM tree
// ============================================================================

#[test]
fn test_dom_tree_div_with_span_child() {
    // Body containing exactly <div><span></span></div>
    let tree: DomNode = serde_json::from_value(serde_json::json!({
        "tag": "body",
        "children": [
            {
                "tag": "div",
                "children": [
                    { "tag": "span", "children": [] }
                ]
            }
        ]
    }))
    .unwrap();

    let div = &tree.children[0];
    assert_eq!(div.tag, "div");
    assert_eq!(div.children.len(), 1);

    let span = &div.children[0];
    assert_eq!(span.tag, "span");
    assert!(span.children.is_empty());
}

#[test]
fn test_dom_node_round_trip() {
    let node = DomNode {
        tag: "div".to_string(),
        id: Some("app".to_string()),
        class: Some("container".to_string()),
        children: vec![DomNode {
            tag: "p".to_string(),
            id: None,
            class: None,
            children: Vec::new(),
        }],
    };

    let json = serde_json::to_value(&node).unwrap();
    let back: DomNode = serde_json::from_value(json).unwrap();
    assert_eq!(back, node);
}
