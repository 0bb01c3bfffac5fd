//! Integration tests for fragment parsing against a context element.

use lark_dom::{DomTree, NodeId, NodeType};
use lark_html::{HTMLTreeBuilder, HtmlError, InsertionMode, ParsedFragment, ParserSettings, parse_fragment};

/// Helper to parse a fragment with default settings
fn fragment(input: &str, context: &str) -> ParsedFragment {
    parse_fragment(input, context, &ParserSettings::default()).expect("valid context")
}

/// Helper to list the tag names of the top-level nodes, `#text` for text
fn top_level(parsed: &ParsedFragment) -> Vec<String> {
    parsed
        .nodes
        .iter()
        .map(|&id| match &parsed.tree.get(id).expect("node").node_type {
            NodeType::Element(data) => data.tag_name.clone(),
            NodeType::Text(_) | NodeType::Data(_) => "#text".to_string(),
            NodeType::Comment(_) => "#comment".to_string(),
            other => format!("{other:?}"),
        })
        .collect()
}

fn text_of(tree: &DomTree, id: NodeId) -> String {
    tree.text_content(id)
}

#[test]
fn test_div_context() {
    let parsed = fragment("<p>a</p>b", "div");
    assert_eq!(top_level(&parsed), ["p", "#text"]);
}

#[test]
fn test_row_context_creates_cells() {
    let parsed = fragment("<td>a<td>b", "tr");
    assert_eq!(top_level(&parsed), ["td", "td"]);
    assert_eq!(text_of(&parsed.tree, parsed.nodes[1]), "b");
}

#[test]
fn test_table_context_implies_tbody() {
    let parsed = fragment("<tr><td>x", "table");
    assert_eq!(top_level(&parsed), ["tbody"]);
    assert_eq!(text_of(&parsed.tree, parsed.nodes[0]), "x");
}

#[test]
fn test_select_context() {
    let parsed = fragment("<option>a<option>b", "select");
    assert_eq!(top_level(&parsed), ["option", "option"]);
}

#[test]
fn test_title_context_is_rcdata() {
    let parsed = fragment("<b>x</b> &amp;", "title");
    assert_eq!(top_level(&parsed), ["#text"]);
    assert_eq!(text_of(&parsed.tree, parsed.nodes[0]), "<b>x</b> &");
}

#[test]
fn test_style_context_is_rawtext() {
    let parsed = fragment("p > a { x: &amp; }", "style");
    assert_eq!(text_of(&parsed.tree, parsed.nodes[0]), "p > a { x: &amp; }");
}

#[test]
fn test_plaintext_context() {
    let parsed = fragment("</plaintext>x", "plaintext");
    assert_eq!(top_level(&parsed), ["#text"]);
    assert_eq!(text_of(&parsed.tree, parsed.nodes[0]), "</plaintext>x");
}

#[test]
fn test_end_html_is_ignored_in_body_context() {
    let parsed = fragment("a</html>b", "body");
    assert_eq!(top_level(&parsed), ["#text"]);
    assert_eq!(text_of(&parsed.tree, parsed.nodes[0]), "ab");
}

#[test]
fn test_form_context_ignores_nested_form() {
    let parsed = fragment("<form>", "form");
    assert!(parsed.nodes.is_empty());
}

#[test]
fn test_svg_context_uses_foreign_rules() {
    let parsed = fragment("<circle/>", "svg");
    assert_eq!(top_level(&parsed), ["circle"]);
}

#[test]
fn test_context_name_is_lowercased() {
    let parsed = fragment("<td>x", "TR");
    assert_eq!(top_level(&parsed), ["td"]);
}

#[test]
fn test_empty_context_is_rejected() {
    let result = parse_fragment("x", "", &ParserSettings::default());
    assert!(matches!(result, Err(HtmlError::EmptyContextElement)));
}

#[test]
fn test_invalid_context_is_rejected() {
    for context in ["1abc", "a b", "a/b", "<div>"] {
        let result = parse_fragment("x", context, &ParserSettings::default());
        assert!(
            matches!(result, Err(HtmlError::InvalidContextElement(ref name)) if name == context),
            "{context:?} should be rejected"
        );
    }
}

#[test]
fn test_fragment_mode_from_context() {
    let cases = [
        ("div", InsertionMode::InBody),
        ("table", InsertionMode::InTable),
        ("tbody", InsertionMode::InTableBody),
        ("tr", InsertionMode::InRow),
        ("td", InsertionMode::InBody),
        ("caption", InsertionMode::InCaption),
        ("colgroup", InsertionMode::InColumnGroup),
        ("select", InsertionMode::InSelect),
        ("head", InsertionMode::InBody),
        ("frameset", InsertionMode::InFrameset),
        ("html", InsertionMode::BeforeHead),
    ];
    for (context, mode) in cases {
        let builder = HTMLTreeBuilder::new_fragment("", context, &ParserSettings::default())
            .expect("valid context");
        assert_eq!(builder.insertion_mode(), mode, "context {context}");
    }
}

#[test]
fn test_fragment_document_has_no_skeleton() {
    let parsed = fragment("x", "div");
    let root = parsed.tree.children(NodeId::ROOT)[0];
    assert_eq!(
        parsed.tree.as_element(root).map(|data| data.tag_name.as_str()),
        Some("html")
    );
    assert!(parsed.tree.body().is_none());
}

#[test]
fn test_fragment_errors_when_tracked() {
    let settings = ParserSettings::default().with_max_errors(5);
    let parsed = parse_fragment("</div>", "div", &settings).expect("valid context");
    assert_eq!(parsed.errors.len(), 1);
}
