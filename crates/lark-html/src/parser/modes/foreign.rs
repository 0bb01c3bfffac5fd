use std::borrow::Cow;

use lark_dom::{NodeId, TreeSink};

use super::is_all_whitespace;
use crate::parser::core::HTMLTreeBuilder;
use crate::tokenizer::Token;

/// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
///
/// "A node is a MathML text integration point if it is one of the following
/// elements: A MathML mi element, A MathML mo element, A MathML mn element, A
/// MathML ms element, A MathML mtext element"
const MATHML_TEXT_INTEGRATION_POINTS: &[&str] = &["mi", "mo", "mn", "ms", "mtext"];

/// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
///
/// "An SVG foreignObject element, An SVG desc element, An SVG title element".
/// Names are compared lowercased.
const HTML_INTEGRATION_POINTS: &[&str] = &["foreignobject", "desc", "title"];

/// Start tags that break out of foreign content back into HTML.
const BREAKOUT_TAGS: &[&str] = &[
    "b", "big", "blockquote", "body", "br", "center", "code", "dd", "div", "dl", "dt", "em",
    "embed", "h1", "h2", "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing",
    "menu", "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span", "strong", "strike",
    "sub", "sup", "table", "tt", "u", "ul", "var",
];

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// True if `token` must be handled by the rules for foreign content rather
    /// than the current insertion mode.
    pub(crate) fn uses_foreign_content_rules(&self, token: &Token) -> bool {
        // "If the stack of open elements is empty"
        // "If the adjusted current node is an element in the HTML namespace"
        let Some(node) = self.adjusted_current_node() else {
            return false;
        };
        if !self.is_foreign(node) {
            return false;
        }

        let current = self.node_name(node);
        let text_integration_point = MATHML_TEXT_INTEGRATION_POINTS.contains(&current);
        let html_integration_point = HTML_INTEGRATION_POINTS.contains(&current);

        match token {
            // "If the token is an end-of-file token"
            Token::EndOfFile => false,

            Token::StartTag { name, .. } => {
                // "If the adjusted current node is a MathML text integration point
                // and the token is a start tag whose tag name is neither "mglyph"
                // nor "malignmark""
                if text_integration_point && name != "mglyph" && name != "malignmark" {
                    return false;
                }
                // "If the adjusted current node is a MathML annotation-xml element
                // and the token is a start tag whose tag name is "svg""
                if current == "annotation-xml" && name == "svg" {
                    return false;
                }
                // "If the adjusted current node is an HTML integration point and
                // the token is a start tag"
                !html_integration_point
            }

            // "If the adjusted current node is a MathML text integration point and
            // the token is a character token"
            // "If the adjusted current node is an HTML integration point and the
            // token is a character token"
            Token::Character { .. } => !(text_integration_point || html_integration_point),

            Token::EndTag { .. } | Token::Comment { .. } | Token::Doctype { .. } => true,
        }
    }

    fn is_integration_point(&self, node: NodeId) -> bool {
        let name = self.node_name(node);
        MATHML_TEXT_INTEGRATION_POINTS.contains(&name) || HTML_INTEGRATION_POINTS.contains(&name)
    }

    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(crate) fn handle_foreign_content(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Insert a U+FFFD REPLACEMENT CHARACTER character."
            // "Any other character token"
            // "Insert the token's character."
            // "Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                let text = if data.contains('\0') {
                    self.error("Unexpected null character in foreign content");
                    Cow::Owned(data.replace('\0', "\u{FFFD}"))
                } else {
                    Cow::Borrowed(data.as_str())
                };
                self.insert_characters(&text);
                if !is_all_whitespace(&text) {
                    self.frameset_ok = false;
                }
                true
            }

            // "A comment token"
            Token::Comment { .. } => {
                self.insert_comment(token, None);
                true
            }

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.unexpected(token);
                false
            }

            // "A start tag whose tag name is one of: "b", "big", "blockquote", ...
            // "A start tag whose tag name is "font", if the token has any
            // attributes named "color", "face", or "size""
            // "An end tag whose tag name is "br", "p""
            Token::StartTag { name, .. } if Self::breaks_out_of_foreign_content(name, token) => {
                self.break_out_of_foreign_content(token)
            }
            Token::EndTag { name, .. } if name == "br" || name == "p" => {
                self.break_out_of_foreign_content(token)
            }

            // "Any other start tag"
            // "Insert a foreign element for the token"
            // "If the token has its self-closing flag set, then ... Pop the current
            // node off the stack of open elements and acknowledge the token's
            // self-closing flag."
            Token::StartTag { .. } => {
                let _ = self.insert_foreign_element(token);
                true
            }

            Token::EndTag { name, .. } => self.foreign_end_tag(name, token),

            // The dispatcher never routes end-of-file here.
            Token::EndOfFile => self.process_in_mode(self.insertion_mode, token),
        }
    }

    fn breaks_out_of_foreign_content(name: &str, token: &Token) -> bool {
        BREAKOUT_TAGS.contains(&name)
            || (name == "font"
                && ["color", "face", "size"]
                    .iter()
                    .any(|attr| token.attribute(attr).is_some()))
    }

    /// "Parse error."
    /// "While the current node is not a MathML text integration point, an HTML
    /// integration point, or an element in the HTML namespace, pop elements from
    /// the stack of open elements."
    /// "Reprocess the token according to the rules given in the section
    /// corresponding to the current insertion mode in HTML content."
    fn break_out_of_foreign_content(&mut self, token: &Token) -> bool {
        self.unexpected(token);
        while let Some(node) = self.current_node()
            && self.is_foreign(node)
            && !self.is_integration_point(node)
        {
            let _ = self.pop();
        }
        self.process_in_mode(self.insertion_mode, token)
    }

    /// "Any other end tag"
    fn foreign_end_tag(&mut self, name: &str, token: &Token) -> bool {
        let Some(mut index) = self.open_elements.len().checked_sub(1) else {
            return false;
        };

        // STEP 1: "Initialize node to be the current node (the bottommost node of the stack)."
        // STEP 2: "If node's tag name, converted to ASCII lowercase, is not the
        //          same as the tag name of the token, then this is a parse error."
        if !self
            .node_name(self.open_elements[index])
            .eq_ignore_ascii_case(name)
        {
            self.unexpected(token);
        }

        loop {
            let node = self.open_elements[index];

            // STEP 3: "Loop: If node is the topmost element in the stack of open
            //          elements, then return. (fragment case)"
            if index == 0 {
                return false;
            }

            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the same
            //          as the tag name of the token, pop elements from the stack of
            //          open elements until node has been popped from the stack, and
            //          then return."
            if self.node_name(node).eq_ignore_ascii_case(name) {
                self.pop_until_node(node);
                return true;
            }

            // STEP 5: "Set node to the previous entry in the stack of open elements."
            index -= 1;

            // STEP 6: "If node is not an element in the HTML namespace, return to
            //          the step labeled loop."
            // STEP 7: "Otherwise, process the token according to the rules given in
            //          the section corresponding to the current insertion mode in
            //          HTML content."
            if !self.is_foreign(self.open_elements[index]) {
                return self.process_in_mode(self.insertion_mode, token);
            }
        }
    }
}
