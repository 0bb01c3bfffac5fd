//! Integration tests for tree construction.

use std::fmt::Write;

use lark_dom::{DomTree, NodeId, NodeType, QuirksMode};
use lark_html::{
    ActiveFormattingElement, HTMLTreeBuilder, HtmlError, InsertionMode, ParserSettings,
    format_tree, parse_document,
};

/// Helper to parse HTML and return the DOM tree
fn parse(html: &str) -> DomTree {
    parse_document(html, &ParserSettings::default())
        .expect("default settings are valid")
        .tree
}

/// Helper to serialize a subtree compactly, without end tags for void elements
fn serialize(tree: &DomTree, id: NodeId, out: &mut String) {
    let node = tree.get(id).expect("Node not found");
    match &node.node_type {
        NodeType::Element(data) => {
            let _ = write!(out, "<{}", data.tag_name);
            for (name, value) in data.attrs.iter() {
                let _ = write!(out, " {name}=\"{value}\"");
            }
            out.push('>');
            for &child in tree.children(id) {
                serialize(tree, child, out);
            }
            let void = matches!(
                data.tag_name.as_str(),
                "area" | "br" | "col" | "embed" | "frame" | "hr" | "img" | "input" | "link" | "meta"
                    | "param" | "source" | "track" | "wbr"
            );
            if !void {
                let _ = write!(out, "</{}>", data.tag_name);
            }
        }
        NodeType::Text(text) | NodeType::Data(text) => out.push_str(text),
        NodeType::Comment(data) => {
            let _ = write!(out, "<!--{data}-->");
        }
        NodeType::ProcessingInstruction(data) => {
            let _ = write!(out, "<?{data}>");
        }
        NodeType::Doctype(doctype) => {
            let _ = write!(out, "<!DOCTYPE {}>", doctype.name);
        }
        NodeType::Document(_) => {
            for &child in tree.children(id) {
                serialize(tree, child, out);
            }
        }
    }
}

/// Helper to serialize the children of `id`
fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(id) {
        serialize(tree, child, &mut out);
    }
    out
}

/// Helper to serialize the body's children
fn body_html(html: &str) -> String {
    let tree = parse(html);
    let body = tree.body().expect("body is always synthesized");
    inner_html(&tree, body)
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

fn tag_name(tree: &DomTree, id: NodeId) -> &str {
    tree.as_element(id).map_or("", |data| data.tag_name.as_str())
}

// ========== document skeleton ==========

#[test]
fn test_empty_input_builds_skeleton() {
    let tree = parse("");
    let html = tree.document_element().expect("html element");
    assert_eq!(tag_name(&tree, html), "html");
    let children: Vec<&str> = tree.children(html).iter().map(|&id| tag_name(&tree, id)).collect();
    assert_eq!(children, ["head", "body"]);
}

#[test]
fn test_explicit_structure() {
    let tree = parse("<!DOCTYPE html><html><head></head><body></body></html>");
    let first = tree.children(NodeId::ROOT)[0];
    assert!(matches!(
        &tree.get(first).expect("doctype").node_type,
        NodeType::Doctype(doctype) if doctype.name == "html"
    ));
    assert!(tree.head().is_some());
    assert!(tree.body().is_some());
}

#[test]
fn test_text_goes_to_body() {
    assert_eq!(body_html("Hello World"), "Hello World");
}

#[test]
fn test_leading_whitespace_is_dropped_before_html() {
    let tree = parse("   \n<p>x");
    let html = tree.document_element().expect("html element");
    assert_eq!(tree.children(NodeId::ROOT), &[html]);
}

#[test]
fn test_head_elements() {
    let tree = parse("<title>T</title><meta charset=utf-8><p>x");
    let head = tree.head().expect("head");
    assert_eq!(inner_html(&tree, head), "<title>T</title><meta charset=\"utf-8\">");
    let body = tree.body().expect("body");
    assert_eq!(inner_html(&tree, body), "<p>x</p>");
}

#[test]
fn test_title_is_rcdata() {
    let tree = parse("<title>a<b>&amp;c</title>");
    let title = find_element(&tree, NodeId::ROOT, "title").expect("title");
    assert_eq!(tree.text_content(title), "a<b>&c");
}

#[test]
fn test_script_contents_are_raw_data() {
    let tree = parse("<script>if (a<b) {}</script>");
    let script = find_element(&tree, NodeId::ROOT, "script").expect("script");
    let child = tree.children(script)[0];
    assert!(matches!(
        &tree.get(child).expect("data").node_type,
        NodeType::Data(data) if data == "if (a<b) {}"
    ));
}

#[test]
fn test_noscript_without_scripting() {
    let tree = parse("<head><noscript><link rel=x></noscript></head>");
    let noscript = find_element(&tree, NodeId::ROOT, "noscript").expect("noscript");
    assert_eq!(inner_html(&tree, noscript), "<link rel=\"x\">");
}

#[test]
fn test_noscript_with_scripting_is_rawtext() {
    let settings = ParserSettings::default().with_scripting(true);
    let tree = parse_document("<body><noscript><p>x</p></noscript>", &settings)
        .expect("valid settings")
        .tree;
    let noscript = find_element(&tree, NodeId::ROOT, "noscript").expect("noscript");
    assert_eq!(tree.text_content(noscript), "<p>x</p>");
    assert!(find_element(&tree, NodeId::ROOT, "p").is_none());
}

#[test]
fn test_template_left_open_in_head_is_closed_by_end_head() {
    let tree = parse("<head><template></head><meta>x");
    let html = tree.document_element().expect("html element");
    let head = tree.head().expect("head");
    let body = tree.body().expect("body");
    assert_eq!(tree.parent(head), Some(html));
    assert_eq!(tree.parent(body), Some(html));
    assert_eq!(inner_html(&tree, head), "<template></template><meta>");
    assert_eq!(inner_html(&tree, body), "x");
}

#[test]
fn test_template_left_open_in_head_before_style() {
    let tree = parse("<head><template></head><style>a</style>x");
    let head = tree.head().expect("head");
    assert_eq!(inner_html(&tree, head), "<template></template><style>a</style>");
    let body = tree.body().expect("body");
    assert_eq!(inner_html(&tree, body), "x");
}

#[test]
fn test_template_left_open_in_head_before_body_content() {
    let tree = parse("<head><template><p>x");
    let head = tree.head().expect("head");
    assert_eq!(inner_html(&tree, head), "<template></template>");
    let body = tree.body().expect("body");
    assert_eq!(inner_html(&tree, body), "<p>x</p>");
}

#[test]
fn test_head_is_never_on_the_stack_twice() {
    let mut builder = HTMLTreeBuilder::new(
        "<head><template></head><link rel=a><meta><style></style><div>",
        &ParserSettings::default(),
    )
    .expect("valid settings");
    while builder.step() {
        let open = builder.open_elements();
        for (index, node) in open.iter().enumerate() {
            assert!(!open[index + 1..].contains(node), "{node:?} is open twice");
        }
    }
}

// ========== comments and processing instructions ==========

#[test]
fn test_comment_before_html_goes_on_document() {
    let tree = parse("<!--c--><html><body>x");
    let first = tree.children(NodeId::ROOT)[0];
    assert!(matches!(
        &tree.get(first).expect("comment").node_type,
        NodeType::Comment(data) if data == "c"
    ));
}

#[test]
fn test_comment_after_body_goes_on_html() {
    let tree = parse("<html><body></body><!--x--></html><!--y-->");
    let html = tree.document_element().expect("html element");
    let html_children = tree.children(html);
    let last = *html_children.last().expect("children");
    assert!(matches!(
        &tree.get(last).expect("comment").node_type,
        NodeType::Comment(data) if data == "x"
    ));

    let document_last = *tree.children(NodeId::ROOT).last().expect("children");
    assert!(matches!(
        &tree.get(document_last).expect("comment").node_type,
        NodeType::Comment(data) if data == "y"
    ));
}

#[test]
fn test_question_mark_markup_becomes_processing_instruction() {
    let tree = parse(r#"<?xml version="1.0"?><p>x"#);
    let first = tree.children(NodeId::ROOT)[0];
    assert!(matches!(
        &tree.get(first).expect("instruction").node_type,
        NodeType::ProcessingInstruction(data) if data == r#"xml version="1.0""#
    ));
}

// ========== quirks mode ==========

#[test]
fn test_quirks_mode_from_doctype() {
    assert_eq!(parse("<!DOCTYPE html>").quirks_mode(), QuirksMode::NoQuirks);
    assert_eq!(parse("<p>no doctype").quirks_mode(), QuirksMode::Quirks);
    assert_eq!(
        parse(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#).quirks_mode(),
        QuirksMode::Quirks
    );
    assert_eq!(
        parse(
            r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
        )
        .quirks_mode(),
        QuirksMode::LimitedQuirks
    );
}

#[test]
fn test_table_closes_p_only_without_quirks() {
    assert_eq!(
        body_html("<!DOCTYPE html><p><table></table>"),
        "<p></p><table></table>"
    );
    assert_eq!(body_html("<p><table></table>"), "<p><table></table></p>");
}

// ========== implied end tags ==========

#[test]
fn test_p_closes_p() {
    assert_eq!(body_html("<p>a<p>b"), "<p>a</p><p>b</p>");
}

#[test]
fn test_block_closes_p() {
    assert_eq!(body_html("<p>a<div>b</div>"), "<p>a</p><div>b</div>");
}

#[test]
fn test_list_items() {
    assert_eq!(
        body_html("<ul><li>a<li>b</ul>"),
        "<ul><li>a</li><li>b</li></ul>"
    );
}

#[test]
fn test_definition_list() {
    assert_eq!(
        body_html("<dl><dt>a<dd>b<dt>c</dl>"),
        "<dl><dt>a</dt><dd>b</dd><dt>c</dt></dl>"
    );
}

#[test]
fn test_headings_do_not_nest() {
    assert_eq!(body_html("<h1>a<h2>b"), "<h1>a</h1><h2>b</h2>");
    assert_eq!(body_html("<h1>a</h2>b"), "<h1>a</h1>b");
}

#[test]
fn test_stray_end_p_inserts_empty_p() {
    assert_eq!(body_html("</p>"), "<p></p>");
}

#[test]
fn test_end_br_acts_as_br() {
    assert_eq!(body_html("a</br>b"), "a<br>b");
}

#[test]
fn test_unmatched_end_tag_is_ignored() {
    assert_eq!(body_html("<div>a</span>b</div>"), "<div>ab</div>");
}

#[test]
fn test_nested_buttons() {
    assert_eq!(
        body_html("<button>a<button>b"),
        "<button>a</button><button>b</button>"
    );
}

#[test]
fn test_nested_forms_are_ignored() {
    assert_eq!(body_html("<form><form></form>x"), "<form></form>x");
}

#[test]
fn test_image_is_renamed() {
    assert_eq!(body_html("<image src=a>"), "<img src=\"a\">");
}

#[test]
fn test_html_attributes_are_merged() {
    let tree = parse("<html lang=en><body><html class=x lang=fr>");
    let html = tree.document_element().expect("html element");
    let data = tree.as_element(html).expect("element");
    assert_eq!(data.attrs.get("lang"), Some("en"));
    assert_eq!(data.attrs.get("class"), Some("x"));
}

#[test]
fn test_leading_newline_dropped_in_pre_and_textarea() {
    assert_eq!(body_html("<pre>\n\nx</pre>"), "<pre>\nx</pre>");
    assert_eq!(body_html("<textarea>\nfoo</textarea>"), "<textarea>foo</textarea>");
    assert_eq!(body_html("<listing>\nx</listing>"), "<listing>x</listing>");
}

#[test]
fn test_plaintext_swallows_markup() {
    assert_eq!(
        body_html("<plaintext><b>x</plaintext>"),
        "<plaintext><b>x</plaintext></plaintext>"
    );
}

#[test]
fn test_null_characters_dropped_in_body() {
    assert_eq!(body_html("a\0b"), "ab");
}

#[test]
fn test_unterminated_tag_is_dropped() {
    assert_eq!(body_html(r#"<p id="foo"#), "");
}

#[test]
fn test_unknown_self_closing_tag() {
    let mut builder =
        HTMLTreeBuilder::new("<foo/>bar", &ParserSettings::default()).expect("valid settings");
    while builder.step() {}
    assert!(builder.schema().is_self_closing("foo"));
    assert!(!builder.schema().is_self_closing("div"));

    let tree = builder.run();
    let body = tree.body().expect("body");
    assert_eq!(inner_html(&tree, body), "<foo></foo>bar");
}

#[test]
fn test_self_closing_known_element_stays_open() {
    assert_eq!(body_html("<div/>x"), "<div>x</div>");
}

// ========== tables ==========

#[test]
fn test_foster_parenting_of_misplaced_content() {
    assert_eq!(
        body_html("<table><b><tr><td>aaa</td></tr>bbb</table>ccc"),
        "<b></b><b>bbb</b><table><tbody><tr><td>aaa</td></tr></tbody></table><b>ccc</b>"
    );
}

#[test]
fn test_cell_implies_tbody_and_tr() {
    assert_eq!(
        body_html("<table><td>1</td></table>"),
        "<table><tbody><tr><td>1</td></tr></tbody></table>"
    );
    assert_eq!(
        body_html("<table><tr><td>1<td>2</table>"),
        "<table><tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_text_whitespace_stays_in_table() {
    assert_eq!(
        body_html("<table> \n<tr><td>x</td></tr></table>"),
        "<table> \n<tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_text_with_content_is_foster_parented() {
    assert_eq!(
        body_html("<table> a <tr><td>x</td></tr></table>"),
        " a <table><tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_caption_is_closed_by_cell() {
    assert_eq!(
        body_html("<table><caption>c<td>x</table>"),
        "<table><caption>c</caption><tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_col_implies_colgroup() {
    assert_eq!(
        body_html("<table><col><tr><td>x</table>"),
        "<table><colgroup><col></colgroup><tbody><tr><td>x</td></tr></tbody></table>"
    );
    assert_eq!(
        body_html("<table><colgroup><col span=2></colgroup></table>"),
        "<table><colgroup><col span=\"2\"></colgroup></table>"
    );
}

#[test]
fn test_select_in_table_is_foster_parented() {
    assert_eq!(
        body_html("<table><select><option>a</select><tr><td>b"),
        "<select><option>a</option></select><table><tbody><tr><td>b</td></tr></tbody></table>"
    );
}

#[test]
fn test_cell_start_tag_closes_select_in_cell() {
    assert_eq!(
        body_html("<table><tr><td><select><option>a<td>x"),
        "<table><tbody><tr><td><select><option>a</option></select></td><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_end_table_closes_select_in_cell() {
    assert_eq!(
        body_html("<table><tr><td><select></table>x"),
        "<table><tbody><tr><td><select></select></td></tr></tbody></table>x"
    );
}

#[test]
fn test_cell_marker_blocks_outer_formatting() {
    assert_eq!(
        body_html("<table><tr><td><b>x</td><td>y"),
        "<table><tbody><tr><td><b>x</b></td><td>y</td></tr></tbody></table>"
    );
}

// ========== active formatting elements ==========

#[test]
fn test_adoption_agency_misnested_inline() {
    assert_eq!(
        body_html("<p>1<b>2<i>3</b>4</i>5</p>"),
        "<p>1<b>2<i>3</i></b><i>4</i>5</p>"
    );
}

#[test]
fn test_adoption_agency_with_furthest_block() {
    assert_eq!(body_html("<b>1<p>2</b>3</p>"), "<b>1</b><p><b>2</b>3</p>");
}

#[test]
fn test_nested_anchor_closes_previous() {
    assert_eq!(
        body_html("<a href=1>x<a href=2>y"),
        "<a href=\"1\">x</a><a href=\"2\">y</a>"
    );
}

#[test]
fn test_formatting_reconstructed_in_new_block() {
    assert_eq!(body_html("<b>x<p>y"), "<b>x<p>y</p></b>");
    assert_eq!(body_html("<p><b>x</p><p>y"), "<p><b>x</b></p><p><b>y</b></p>");
}

#[test]
fn test_noahs_ark_limits_reconstruction() {
    assert_eq!(
        body_html("<p><b><b><b><b>x</p><p>y"),
        "<p><b><b><b><b>x</b></b></b></b></p><p><b><b><b>y</b></b></b></p>"
    );
}

#[test]
fn test_nobr_nesting() {
    assert_eq!(body_html("<nobr>a<nobr>b"), "<nobr>a</nobr><nobr>b</nobr>");
}

#[test]
fn test_applet_marker_stops_reconstruction() {
    assert_eq!(
        body_html("<b><object>x</b>y</object>"),
        "<b><object>xy</object></b>"
    );
}

/// Helper to run a parse to completion and return the tag names of the
/// active formatting list, `|` for markers
fn active_formatting(html: &str) -> Vec<String> {
    let mut builder = HTMLTreeBuilder::new(html, &ParserSettings::default()).expect("valid settings");
    while builder.step() {}
    builder
        .active_formatting_elements()
        .iter()
        .map(|entry| match entry {
            ActiveFormattingElement::Element { node_id, .. } => {
                builder.sink().as_element(*node_id).map_or_else(String::new, |data| {
                    match data.attrs.get("class") {
                        Some(class) => format!("{}.{class}", data.tag_name),
                        None => data.tag_name.clone(),
                    }
                })
            }
            ActiveFormattingElement::Marker => "|".to_string(),
        })
        .collect()
}

#[test]
fn test_noahs_ark_keeps_three_identical_entries() {
    assert_eq!(active_formatting("<b><b><b><b><b><b>x"), ["b", "b", "b"]);
}

#[test]
fn test_noahs_ark_keeps_the_newest_entries() {
    let mut builder = HTMLTreeBuilder::new("<b><b><b><b><b><b>x", &ParserSettings::default())
        .expect("valid settings");
    while builder.step() {}
    let listed: Vec<_> = builder
        .active_formatting_elements()
        .iter()
        .filter_map(ActiveFormattingElement::node_id)
        .collect();
    let open = builder.open_elements();
    assert_eq!(listed, open[open.len() - 3..]);
}

#[test]
fn test_noahs_ark_compares_attributes() {
    assert_eq!(
        active_formatting("<b class=1><b class=2><b class=3><b class=4><b>x"),
        ["b.1", "b.2", "b.3", "b.4", "b"]
    );
    assert_eq!(
        active_formatting("<b class=1><b class=1><b class=1><b class=1><b class=2>x"),
        ["b.1", "b.1", "b.1", "b.2"]
    );
}

#[test]
fn test_noahs_ark_counts_per_marker_section() {
    assert_eq!(
        active_formatting("<b><b><b><table><tr><td><b><b><b><b>x"),
        ["b", "b", "b", "|", "b", "b", "b"]
    );
}

// ========== frameset ==========

#[test]
fn test_frameset_document() {
    let tree = parse("<frameset><frame></frameset>");
    let html = tree.document_element().expect("html element");
    let children: Vec<&str> = tree.children(html).iter().map(|&id| tag_name(&tree, id)).collect();
    assert_eq!(children, ["head", "frameset"]);
    let frameset = tree.body().expect("frameset acts as the body");
    assert_eq!(inner_html(&tree, frameset), "<frame>");
}

#[test]
fn test_frameset_ignored_after_content() {
    assert_eq!(body_html("<p>x<frameset>"), "<p>x</p>");
}

#[test]
fn test_frameset_replaces_body_while_frameset_ok() {
    let tree = parse("<div><frameset></frameset>");
    let html = tree.document_element().expect("html element");
    assert!(find_element(&tree, html, "body").is_none());
    assert!(find_element(&tree, html, "div").is_none());
    assert!(find_element(&tree, html, "frameset").is_some());
}

// ========== foreign content ==========

#[test]
fn test_svg_self_closing_children() {
    assert_eq!(
        body_html("<svg><circle/><rect/></svg>x"),
        "<svg><circle></circle><rect></rect></svg>x"
    );
}

#[test]
fn test_html_breaks_out_of_svg() {
    assert_eq!(body_html("<svg><g><p>x"), "<svg><g></g></svg><p>x</p>");
}

#[test]
fn test_cdata_in_svg() {
    assert_eq!(body_html("<svg><![CDATA[a<b]]></svg>"), "<svg>a<b</svg>");
}

#[test]
fn test_cdata_in_html_is_comment() {
    assert_eq!(body_html("<div><![CDATA[x]]></div>"), "<div><!--[CDATA[x]]--></div>");
}

#[test]
fn test_mathml_text_integration_point() {
    assert_eq!(
        body_html("<math><mi><b>x</b></mi></math>"),
        "<math><mi><b>x</b></mi></math>"
    );
}

#[test]
fn test_svg_foreign_object_takes_html() {
    assert_eq!(
        body_html("<svg><foreignObject><div>x</div></foreignObject></svg>"),
        "<svg><foreignobject><div>x</div></foreignobject></svg>"
    );
}

// ========== builder API ==========

#[test]
fn test_step_by_step_modes() {
    let mut builder =
        HTMLTreeBuilder::new("<html><head></head><body>", &ParserSettings::default())
            .expect("valid settings");
    assert_eq!(builder.insertion_mode(), InsertionMode::Initial);
    assert!(builder.step());
    assert_eq!(builder.insertion_mode(), InsertionMode::BeforeHead);
    assert!(builder.step());
    assert_eq!(builder.insertion_mode(), InsertionMode::InHead);
    assert!(builder.step());
    assert_eq!(builder.insertion_mode(), InsertionMode::AfterHead);
    assert!(builder.step());
    assert_eq!(builder.insertion_mode(), InsertionMode::InBody);
    assert!(!builder.step());
    assert!(!builder.step());
}

#[test]
fn test_open_elements_tracks_stack() {
    let mut builder =
        HTMLTreeBuilder::new("<div><span>", &ParserSettings::default()).expect("valid settings");
    while builder.step() {}
    let names: Vec<&str> = builder
        .open_elements()
        .iter()
        .map(|&id| builder.sink().as_element(id).map_or("", |e| e.tag_name.as_str()))
        .collect();
    assert_eq!(names, ["html", "body", "div", "span"]);
}

#[test]
fn test_errors_are_not_tracked_by_default() {
    let parsed = parse_document("<p></div>", &ParserSettings::default()).expect("valid settings");
    assert!(parsed.errors.is_empty());
}

#[test]
fn test_errors_are_tracked_when_requested() {
    let settings = ParserSettings::default().with_max_errors(10);
    let parsed = parse_document("<p></div>", &settings).expect("valid settings");
    assert!(!parsed.errors.is_empty());
    assert!(parsed.errors.len() <= 10);
}

#[test]
fn test_error_count_is_capped() {
    let settings = ParserSettings::default().with_max_errors(2);
    let parsed = parse_document("</a></b></c></d></e><p id=1 id=2>", &settings).expect("valid settings");
    assert_eq!(parsed.errors.len(), 2);
}

#[test]
fn test_base_uri_is_stored() {
    let settings = ParserSettings::default().with_base_uri("https://example.com/");
    let tree = parse_document("", &settings).expect("valid settings").tree;
    let data = tree.document_data().expect("document data");
    assert_eq!(data.base_uri.as_deref(), Some("https://example.com/"));
}

#[test]
fn test_empty_base_uri_is_rejected() {
    let settings = ParserSettings::default().with_base_uri("");
    let result = parse_document("", &settings);
    assert!(matches!(result, Err(HtmlError::EmptyBaseUri)));
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let html = "<div>".repeat(2000);
    let tree = parse(&html);
    let body = tree.body().expect("body");
    assert_eq!(tree.children(body).len(), 1);
}

#[test]
fn test_format_tree_outline() {
    let tree = parse("<!DOCTYPE html><p class=x>a\nb<!--c-->");
    let expected = concat!(
        "#document\n",
        "  <!DOCTYPE html>\n",
        "  <html>\n",
        "    <head>\n",
        "    <body>\n",
        "      <p class=\"x\">\n",
        "        \"a\\nb\"\n",
        "        <!-- c -->\n",
    );
    assert_eq!(format_tree(&tree, NodeId::ROOT), expected);
}

#[test]
fn test_unsupported_features_warn_once() {
    use lark_common::warning::{clear_warnings, was_warned};

    clear_warnings();
    let _ = parse("<svg></svg><template><p>x</p></template>");
    assert!(was_warned(
        "HTML Parser",
        "SVG and MathML are parsed without namespace adjustment"
    ));
    assert!(was_warned(
        "HTML Parser",
        "<template> contents are parsed as ordinary children"
    ));
}
