//! Tests for the tag schema.

use lark_html::TagSchema;

#[test]
fn test_known_tags() {
    let schema = TagSchema::new();
    assert!(schema.is_known("div"));
    assert!(schema.is_known("SPAN"));
    assert!(!schema.is_known("my-widget"));
}

#[test]
fn test_block_content_model() {
    let mut schema = TagSchema::new();
    assert!(schema.get_or_create("div").can_contain_block);
    assert!(!schema.get_or_create("span").can_contain_block);
    assert!(!schema.get_or_create("br").can_contain_block);
}

#[test]
fn test_void_elements_are_self_closing() {
    let schema = TagSchema::new();
    for name in ["br", "img", "input", "meta", "hr", "col"] {
        assert!(schema.is_empty(name), "{name} should be void");
        assert!(schema.is_self_closing(name), "{name} should be self-closing");
    }
    assert!(!schema.is_empty("div"));
}

#[test]
fn test_get_or_create_unknown() {
    let mut schema = TagSchema::new();
    let tag = schema.get_or_create("Foo-Bar");
    assert_eq!(tag.name, "foo-bar");
    assert!(!tag.known);
    assert!(tag.can_contain_block);
    assert!(schema.get("foo-bar").is_some());
    assert!(!schema.is_known("foo-bar"));
}

#[test]
fn test_mark_self_closing_only_affects_unknown_tags() {
    let mut schema = TagSchema::new();
    schema.mark_self_closing("foo");
    schema.mark_self_closing("div");
    assert!(schema.is_self_closing("foo"));
    assert!(!schema.is_self_closing("div"));
}

#[test]
fn test_marks_are_scoped_to_one_schema() {
    let mut first = TagSchema::new();
    first.mark_self_closing("foo");
    let second = TagSchema::default();
    assert!(!second.is_self_closing("foo"));
}

#[test]
fn test_special_and_formatting_sets() {
    assert!(TagSchema::is_special("address"));
    assert!(TagSchema::is_special("template"));
    assert!(!TagSchema::is_special("span"));

    assert!(TagSchema::is_formatting("nobr"));
    assert!(TagSchema::is_formatting("a"));
    assert!(!TagSchema::is_formatting("div"));
}
