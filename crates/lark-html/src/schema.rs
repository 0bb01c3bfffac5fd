//! Tag metadata consulted by the tree builder.
//!
//! [§ 13.1.1 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
//!
//! The schema knows the standard HTML element names and their broad layout
//! content model. Names it has never seen are auto-vivified as inline elements that
//! may contain block content, so unknown tags are accepted anywhere.

use std::collections::HashMap;

/// Standard element names that may contain block content.
pub const BLOCK_TAGS: &[&str] = &[
    "html", "head", "body", "frameset", "script", "noscript", "style", "meta", "link", "title",
    "frame", "noframes", "section", "nav", "aside", "hgroup", "header", "footer", "p", "h1", "h2",
    "h3", "h4", "h5", "h6", "ul", "ol", "pre", "div", "blockquote", "hr", "address", "figure",
    "figcaption", "form", "fieldset", "ins", "del", "dl", "dt", "dd", "li", "table", "caption",
    "thead", "tfoot", "tbody", "colgroup", "col", "tr", "th", "td", "video", "audio", "canvas",
    "details", "menu", "plaintext", "template", "article", "main", "svg", "math", "center",
    "search", "dialog", "listing", "xmp", "dir",
];

/// Standard element names that hold phrasing content only.
pub const INLINE_TAGS: &[&str] = &[
    "object", "base", "font", "tt", "i", "b", "u", "big", "small", "em", "strong", "dfn", "code",
    "samp", "kbd", "var", "cite", "abbr", "time", "acronym", "mark", "ruby", "rt", "rp", "rb",
    "rtc", "a", "img", "br", "wbr", "map", "q", "sub", "sup", "bdo", "bdi", "iframe", "embed",
    "span", "input", "select", "textarea", "label", "button", "optgroup", "option", "legend",
    "datalist", "keygen", "output", "progress", "meter", "area", "param", "source", "track",
    "summary", "command", "device", "basefont", "bgsound", "menuitem", "s", "strike", "nobr",
    "applet", "marquee", "noembed", "data", "picture", "slot", "image",
];

/// [§ 13.1.2 Void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "area, base, br, col, embed, hr, img, input, link, meta, source, track, wbr"
/// plus the obsolete void elements the parser still treats as empty.
pub const EMPTY_TAGS: &[&str] = &[
    "meta", "link", "base", "frame", "img", "br", "wbr", "embed", "hr", "input", "keygen", "col",
    "command", "device", "area", "basefont", "bgsound", "menuitem", "param", "source", "track",
];

/// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules."
pub const SPECIAL_TAGS: &[&str] = &[
    "address", "applet", "area", "article", "aside", "base", "basefont", "bgsound", "blockquote",
    "body", "br", "button", "caption", "center", "col", "colgroup", "dd", "details", "dir", "div",
    "dl", "dt", "embed", "fieldset", "figcaption", "figure", "footer", "form", "frame", "frameset",
    "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup", "hr", "html", "iframe", "img",
    "input", "keygen", "li", "link", "listing", "main", "marquee", "menu", "meta", "nav",
    "noembed", "noframes", "noscript", "object", "ol", "p", "param", "plaintext", "pre", "script",
    "search", "section", "select", "source", "style", "summary", "table", "tbody", "td",
    "template", "textarea", "tfoot", "th", "thead", "title", "tr", "track", "ul", "wbr", "xmp",
];

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
///
/// "The following HTML elements are those that end up in the list of active
/// formatting elements: a, b, big, code, em, font, i, nobr, s, small, strike,
/// strong, tt, and u."
pub const FORMATTING_TAGS: &[&str] = &[
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt",
    "u",
];

/// Metadata for one tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    /// The lowercase tag name.
    pub name: String,
    /// True for names the schema was seeded with.
    pub known: bool,
    /// May contain block content.
    pub can_contain_block: bool,
    /// A void element that never has children.
    pub empty: bool,
    /// Seen written as `<name/>` when the name was not known.
    pub self_closing: bool,
}

impl TagDefinition {
    /// The definition given to names the schema has never seen.
    fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            known: false,
            can_contain_block: true,
            empty: false,
            self_closing: false,
        }
    }

    /// True if `<name/>` closes the element: void elements and unknown names
    /// that have been seen self-closed.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.empty || self.self_closing
    }
}

/// Tag metadata lookup with auto-vivification of unknown names.
///
/// Each tree builder owns its own schema, so names marked self-closing during
/// one parse do not leak into another.
///
/// ```
/// use lark_html::TagSchema;
///
/// let mut schema = TagSchema::new();
/// assert!(schema.is_empty("br"));
/// assert!(!schema.is_known("my-widget"));
///
/// schema.mark_self_closing("my-widget");
/// assert!(schema.is_self_closing("my-widget"));
/// ```
#[derive(Debug, Clone)]
pub struct TagSchema {
    tags: HashMap<String, TagDefinition>,
}

impl Default for TagSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSchema {
    /// A schema seeded with the standard HTML element names.
    #[must_use]
    pub fn new() -> Self {
        let mut tags = HashMap::new();
        let seeded = BLOCK_TAGS
            .iter()
            .map(|&name| (name, true))
            .chain(INLINE_TAGS.iter().map(|&name| (name, false)));
        for (name, can_contain_block) in seeded {
            let _ = tags.insert(
                name.to_string(),
                TagDefinition {
                    name: name.to_string(),
                    known: true,
                    can_contain_block,
                    empty: false,
                    self_closing: false,
                },
            );
        }
        for &name in EMPTY_TAGS {
            if let Some(tag) = tags.get_mut(name) {
                tag.can_contain_block = false;
                tag.empty = true;
            }
        }
        Self { tags }
    }

    /// Look up `name`, creating a generic inline definition if it is unknown.
    pub fn get_or_create(&mut self, name: &str) -> &TagDefinition {
        let key = name.to_ascii_lowercase();
        self.tags
            .entry(key)
            .or_insert_with_key(|key| TagDefinition::unknown(key))
    }

    /// Look up `name` without creating it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(&name.to_ascii_lowercase())
    }

    /// True if `name` is one of the standard names the schema was seeded with.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.get(name).is_some_and(|tag| tag.known)
    }

    /// True if `name` is a void element.
    #[must_use]
    pub fn is_empty(&self, name: &str) -> bool {
        self.get(name).is_some_and(|tag| tag.empty)
    }

    /// True if `<name/>` closes the element.
    #[must_use]
    pub fn is_self_closing(&self, name: &str) -> bool {
        self.get(name).is_some_and(TagDefinition::is_self_closing)
    }

    /// Record that an unknown name was written self-closed. Known names are
    /// left alone.
    pub fn mark_self_closing(&mut self, name: &str) {
        let key = name.to_ascii_lowercase();
        let tag = self
            .tags
            .entry(key)
            .or_insert_with_key(|key| TagDefinition::unknown(key));
        if !tag.known {
            tag.self_closing = true;
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#special)
    /// True if `name` is in the special category.
    #[must_use]
    pub fn is_special(name: &str) -> bool {
        SPECIAL_TAGS.contains(&name)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
    /// True if `name` is in the formatting category.
    #[must_use]
    pub fn is_formatting(name: &str) -> bool {
        FORMATTING_TAGS.contains(&name)
    }
}
