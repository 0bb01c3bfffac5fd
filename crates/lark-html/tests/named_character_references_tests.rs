//! Integration tests for named character reference lookup.

use lark_html::tokenizer::character_reference::resolve_numeric_reference;
use lark_html::tokenizer::named_character_references::{any_entity_has_prefix, lookup_entity};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp;"), Some("&"));
    assert_eq!(lookup_entity("lt;"), Some("<"));
    assert_eq!(lookup_entity("gt;"), Some(">"));
    assert_eq!(lookup_entity("quot;"), Some("\""));
    assert_eq!(lookup_entity("nbsp;"), Some("\u{00A0}"));
    assert_eq!(lookup_entity("euro;"), Some("\u{20AC}"));
}

#[test]
fn test_lookup_legacy_entities_without_semicolon() {
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("copy"), Some("\u{00A9}"));
    assert_eq!(lookup_entity("not"), Some("\u{00AC}"));
    // Only the HTML 4 legacy set resolves without the semicolon.
    assert_eq!(lookup_entity("hellip"), None);
    assert_eq!(lookup_entity("notin"), None);
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_prefix_matching() {
    assert!(any_entity_has_prefix("a"));
    assert!(any_entity_has_prefix("am"));
    assert!(any_entity_has_prefix("amp;"));
    assert!(!any_entity_has_prefix("ampx"));
    assert!(!any_entity_has_prefix("xyz"));
}

#[test]
fn test_numeric_reference_replacements() {
    assert_eq!(resolve_numeric_reference(Some(0x41)), ('A', None));
    assert_eq!(resolve_numeric_reference(Some(0)).0, '\u{FFFD}');
    assert_eq!(resolve_numeric_reference(Some(0xD800)).0, '\u{FFFD}');
    assert_eq!(resolve_numeric_reference(Some(0x11_0000)).0, '\u{FFFD}');
    assert_eq!(resolve_numeric_reference(None).0, '\u{FFFD}');
}

#[test]
fn test_numeric_reference_windows_1252_table() {
    let (c, error) = resolve_numeric_reference(Some(0x80));
    assert_eq!(c, '\u{20AC}');
    assert!(error.is_some());
    assert_eq!(resolve_numeric_reference(Some(0x99)).0, '\u{2122}');
}
