//! Property-based tests for the sanitizer and the JSON-RPC wire types.
//!
//! Uses proptest to generate arbitrary inputs and verify invariants:
//! the sanitizer's clean-input idempotence and the protocol types'
//! serialization round-trips.

use pagescope::extraction::sanitize_html;
use pagescope::mcp::types::JsonRpcRequest;
use proptest::prelude::*;
use serde_json::Value;

// ============================================================================
// SANITIZER STRATEGIES
// ============================================================================

/// Markup fragments that contain none of the patterns the sanitizer
/// strips: no script/style/iframe tags, no on*="..." attributes, no
/// javascript: substrings.
fn arb_clean_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{0,12}",
        Just("<b>".to_string()),
        Just("</b>".to_string()),
        Just("<p class=\"note\">".to_string()),
        Just("</p>".to_string()),
        Just("<div id=\"main\">".to_string()),
        Just("</div>".to_string()),
        Just("<a href=\"https://example.com\">".to_string()),
        Just("</a>".to_string()),
    ]
}

/// Clean HTML: a concatenation of clean fragments
fn arb_clean_html() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_clean_fragment(), 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    /// Sanitizing clean input is the identity, and therefore idempotent.
    #[test]
    fn sanitize_clean_input_is_identity(html in arb_clean_html()) {
        let once = sanitize_html(&html);
        prop_assert_eq!(&once, &html);

        let twice = sanitize_html(&once);
        prop_assert_eq!(twice, once);
    }

    /// The sanitizer only removes text, so output never grows.
    #[test]
    fn sanitize_never_grows_output(html in ".{0,256}") {
        prop_assert!(sanitize_html(&html).len() <= html.len());
    }

    /// A single well-formed script block is removed no matter its body.
    #[test]
    fn sanitize_strips_any_script_body(body in "[a-z(); ]{0,40}") {
        let input = format!("<script>{}</script><b>kept</b>", body);
        prop_assert_eq!(sanitize_html(&input), "<b>kept</b>");
    }

    /// A double-quoted handler attribute is removed whatever its name
    /// suffix and value.
    #[test]
    fn sanitize_strips_any_double_quoted_handler(
        name in "[a-z]{1,10}",
        value in "[a-z(1) ]{0,20}",
    ) {
        let input = format!("<p on{}=\"{}\">hi</p>", name, value);
        prop_assert_eq!(sanitize_html(&input), "<p>hi</p>");
    }
}

// ============================================================================
// JSON-RPC ROUND-TRIPS
// ============================================================================

fn arb_jsonrpc_id() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        (1i64..1000000).prop_map(|n| Some(Value::Number(n.into()))),
        "[a-zA-Z0-9_-]{1,36}".prop_map(|s| Some(Value::String(s))),
    ]
}

fn arb_method_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("initialize".to_string()),
        Just("tools/list".to_string()),
        Just("tools/call".to_string()),
        Just("ping".to_string()),
        "[a-z_]+/[a-z_]+",
    ]
}

fn arb_jsonrpc_request() -> impl Strategy<Value = JsonRpcRequest> {
    (
        arb_method_name(),
        prop::option::of(Just(serde_json::json!({ "url": "https://example.com" }))),
        arb_jsonrpc_id(),
    )
        .prop_map(|(method, params, id)| JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method,
            params,
            id,
        })
}

proptest! {
    /// Requests survive a serialize/deserialize round-trip unchanged.
    #[test]
    fn jsonrpc_request_round_trips(request in arb_jsonrpc_request()) {
        let wire = serde_json::to_value(&request).unwrap();
        let parsed: JsonRpcRequest = serde_json::from_value(wire.clone()).unwrap();
        prop_assert_eq!(serde_json::to_value(&parsed).unwrap(), wire);
    }
}
