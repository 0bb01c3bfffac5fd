//! Tests for DOM tree mutation methods and the `TreeSink` implementation.

use lark_dom::{AttributesMap, DomTree, NodeId, NodeType, QuirksMode, TreeSink};

/// Helper to create a detached element node and return its `NodeId`.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(tag, AttributesMap::new())
}

/// Helper to build `<div>` with children `a`, `b`, `c` under the document.
fn div_with_three(tree: &mut DomTree) -> (NodeId, NodeId, NodeId, NodeId) {
    let parent = alloc_element(tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let a = alloc_element(tree, "a");
    let b = alloc_element(tree, "b");
    let c = alloc_element(tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);
    (parent, a, b, c)
}

// ========== remove_child / detach ==========

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = div_with_three(&mut tree);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_child_ignores_non_child() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = div_with_three(&mut tree);
    let other = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, other);

    tree.remove_child(other, b);

    assert_eq!(tree.children(parent), &[a, b, c]);
}

#[test]
fn test_detach_last_child() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = div_with_three(&mut tree);

    tree.detach(c);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.next_sibling(b), None);
    assert_eq!(tree.last_child(parent), Some(b));
}

#[test]
fn test_append_child_moves_attached_node() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = div_with_three(&mut tree);
    let target = alloc_element(&mut tree, "section");
    tree.append_child(NodeId::ROOT, target);

    tree.append_child(target, a);

    assert_eq!(tree.children(parent), &[b, c]);
    assert_eq!(tree.children(target), &[a]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.parent(a), Some(target));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = div_with_three(&mut tree);
    let new_child = alloc_element(&mut tree, "x");

    tree.insert_before(parent, new_child, a);

    assert_eq!(tree.children(parent), &[new_child, a, b, c]);
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.next_sibling(new_child), Some(a));
    assert_eq!(tree.prev_sibling(a), Some(new_child));
}

#[test]
fn test_insert_before_middle_links_both_sides() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = div_with_three(&mut tree);
    let new_child = alloc_element(&mut tree, "x");

    tree.insert_before(parent, new_child, c);

    assert_eq!(tree.children(parent), &[a, b, new_child, c]);
    assert_eq!(tree.next_sibling(b), Some(new_child));
    assert_eq!(tree.prev_sibling(new_child), Some(b));
    assert_eq!(tree.next_sibling(new_child), Some(c));
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let (parent, a, b, c) = div_with_three(&mut tree);
    let stranger = alloc_element(&mut tree, "y");
    let new_child = alloc_element(&mut tree, "x");

    tree.insert_before(parent, new_child, stranger);

    assert_eq!(tree.children(parent), &[a, b, c, new_child]);
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let (from, a, b, c) = div_with_three(&mut tree);
    let to = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, to);
    let existing = alloc_element(&mut tree, "x");
    tree.append_child(to, existing);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing, a, b, c]);
    assert_eq!(tree.next_sibling(existing), Some(a));
    assert_eq!(tree.prev_sibling(a), Some(existing));
    assert_eq!(tree.parent(c), Some(to));
}

// ========== AttributesMap ==========

#[test]
fn test_attributes_keep_source_order() {
    let attrs: AttributesMap = [("id", "x"), ("class", "a b"), ("title", "t")]
        .into_iter()
        .collect();

    let names: Vec<&str> = attrs.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["id", "class", "title"]);
}

#[test]
fn test_attributes_case_insensitive_lookup() {
    let mut attrs = AttributesMap::new();
    assert_eq!(attrs.insert("Href", "/a"), None);

    assert_eq!(attrs.get("href"), Some("/a"));
    assert_eq!(attrs.insert("HREF", "/b"), Some("/a".to_string()));
    assert_eq!(attrs.len(), 1);
    assert!(!attrs.insert_if_absent("href", "/c"));
    assert_eq!(attrs.get("href"), Some("/b"));
}

#[test]
fn test_attributes_first_occurrence_wins_when_collected() {
    let attrs: AttributesMap = [("a", "1"), ("A", "2")].into_iter().collect();
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs.get("a"), Some("1"));
}

// ========== TreeSink ==========

#[test]
fn test_sink_append_text_merges_adjacent_text() {
    let mut tree = DomTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);

    tree.append_text(p, None, "Hello", false);
    tree.append_text(p, None, ", world", false);

    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.text_content(p), "Hello, world");
}

#[test]
fn test_sink_append_text_before_reference_merges_with_previous() {
    let mut tree = DomTree::new();
    let body = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, body);
    let table = alloc_element(&mut tree, "table");
    tree.append_child(body, table);

    tree.append_text(body, Some(table), "a", false);
    tree.append_text(body, Some(table), "b", false);

    let children = tree.children(body);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_text(children[0]), Some("ab"));
    assert_eq!(children[1], table);
}

#[test]
fn test_sink_raw_text_does_not_merge_with_text() {
    let mut tree = DomTree::new();
    let script = alloc_element(&mut tree, "script");
    tree.append_child(NodeId::ROOT, script);

    tree.append_text(script, None, "a", false);
    tree.append_text(script, None, "b < c", true);
    tree.append_text(script, None, ";", true);

    let children = tree.children(script);
    assert_eq!(children.len(), 2);
    assert!(
        matches!(&tree.get(children[1]).map(|n| &n.node_type), Some(NodeType::Data(d)) if d == "b < c;")
    );
}

#[test]
fn test_sink_add_attributes_if_missing() {
    let mut tree = DomTree::new();
    let attrs: AttributesMap = [("lang", "en")].into_iter().collect();
    let html = tree.create_element("html", attrs);

    let extra: AttributesMap = [("lang", "fr"), ("dir", "ltr")].into_iter().collect();
    tree.add_attributes_if_missing(html, &extra);

    let data = tree.as_element(html).expect("html element");
    assert_eq!(data.attrs.get("lang"), Some("en"));
    assert_eq!(data.attrs.get("dir"), Some("ltr"));
}

#[test]
fn test_sink_document_state() {
    let mut tree = DomTree::new();
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);

    tree.set_quirks_mode(QuirksMode::Quirks);
    tree.set_base_uri("https://example.com/");

    assert_eq!(tree.quirks_mode(), QuirksMode::Quirks);
    assert_eq!(
        tree.document_data().and_then(|d| d.base_uri.as_deref()),
        Some("https://example.com/")
    );
}

#[test]
fn test_traversal_helpers() {
    let mut tree = DomTree::new();
    let (div, a, b, c) = div_with_three(&mut tree);

    assert_eq!(tree.first_child(div), Some(a));
    assert_eq!(tree.last_child(div), Some(c));
    assert!(tree.is_descendant_of(b, div));
    assert!(tree.is_descendant_of(b, NodeId::ROOT));
    assert!(!tree.is_descendant_of(div, b));

    let preceding: Vec<NodeId> = tree.preceding_siblings(c).collect();
    assert_eq!(preceding, vec![b, a]);
    let ancestors: Vec<NodeId> = tree.ancestors(a).collect();
    assert_eq!(ancestors, vec![div, NodeId::ROOT]);
}

#[test]
fn test_element_id_and_classes() {
    let mut attrs = AttributesMap::new();
    let _ = attrs.insert("id", "main");
    let _ = attrs.insert("class", " wide  dark ");
    let mut tree = DomTree::new();
    let el = tree.create_element("div", attrs);

    let data = tree.as_element(el).expect("element");
    assert_eq!(data.id(), Some("main"));
    assert_eq!(data.classes(), vec!["wide", "dark"]);
}
