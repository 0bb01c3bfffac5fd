use lark_dom::TreeSink;

use crate::parser::core::{HTMLTreeBuilder, InsertionMode};
use crate::tokenizer::Token;

/// Table structure tags that break out of a select inside a table.
const TABLE_BREAKOUT_TAGS: &[&str] = &[
    "caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th",
];

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(crate) fn handle_in_select_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            // "Any other character token"
            // "Insert the token's character."
            Token::Character { data } => {
                if data.contains('\0') {
                    self.error("Unexpected null character in <select>");
                    self.insert_characters(&data.replace('\0', ""));
                } else {
                    self.insert_characters(data);
                }
                true
            }

            Token::Comment { .. } => {
                self.insert_comment(token, None);
                true
            }

            Token::Doctype { .. } => {
                self.unexpected(token);
                false
            }

            Token::StartTag { name, .. } => match name.as_str() {
                "html" => self.process_in_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is "option""
                // "If the current node is an option element, pop that node from
                // the stack of open elements."
                // "Insert an HTML element for the token."
                "option" => {
                    self.pop_if_current("option");
                    let _ = self.insert_element(token);
                    true
                }

                // "A start tag whose tag name is "optgroup""
                // "A start tag whose tag name is "hr""
                "optgroup" | "hr" => {
                    // "If the current node is an option element, pop that node from
                    // the stack of open elements."
                    self.pop_if_current("option");
                    // "If the current node is an optgroup element, pop that node
                    // from the stack of open elements."
                    self.pop_if_current("optgroup");
                    if name == "hr" {
                        // "Insert an HTML element for the token. Immediately pop the
                        // current node off the stack of open elements."
                        // "Acknowledge the token's self-closing flag, if it is set."
                        let _ = self.insert_empty(token);
                    } else {
                        let _ = self.insert_element(token);
                    }
                    true
                }

                // "A start tag whose tag name is "select""
                "select" => {
                    // "Parse error."
                    self.unexpected(token);
                    // "If the stack of open elements does not have a select element
                    // in select scope, ignore the token. (fragment case)"
                    // "Otherwise: Pop elements from the stack of open elements until
                    // a select element has been popped from the stack."
                    // "Reset the insertion mode appropriately."
                    self.close_select()
                }

                // "A start tag whose tag name is one of: "input", "keygen", "textarea""
                "input" | "keygen" | "textarea" => {
                    self.unexpected(token);
                    // "If the stack of open elements does not have a select element
                    // in select scope, ignore the token. (fragment case)"
                    // "Otherwise: ..." "Reprocess the token."
                    self.close_select() && self.process_token(token)
                }

                // "A start tag whose tag name is one of: "script", "template""
                "script" | "template" => self.process_in_mode(InsertionMode::InHead, token),

                _ => {
                    self.unexpected(token);
                    false
                }
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "optgroup""
                "optgroup" => {
                    // STEP 1: "If the current node is an option element, and the
                    //          node immediately before it in the stack of open elements
                    //          is an optgroup element, then pop the current node from
                    //          the stack of open elements."
                    let len = self.open_elements.len();
                    if len >= 2
                        && self.current_node_is("option")
                        && self.is_html_named(self.open_elements[len - 2], "optgroup")
                    {
                        let _ = self.pop();
                    }
                    // STEP 2: "If the current node is an optgroup element, then pop
                    //          that node from the stack of open elements. Otherwise,
                    //          this is a parse error; ignore the token."
                    if self.current_node_is("optgroup") {
                        let _ = self.pop();
                        true
                    } else {
                        self.unexpected(token);
                        false
                    }
                }

                // "An end tag whose tag name is "option""
                // "If the current node is an option element, then pop that node from
                // the stack of open elements. Otherwise, this is a parse error;
                // ignore the token."
                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.pop();
                        true
                    } else {
                        self.unexpected(token);
                        false
                    }
                }

                // "An end tag whose tag name is "select""
                "select" => {
                    if self.has_element_in_select_scope("select") {
                        self.close_select()
                    } else {
                        // "If the stack of open elements does not have a select
                        // element in select scope, this is a parse error; ignore the
                        // token. (fragment case)"
                        self.unexpected(token);
                        false
                    }
                }

                "template" => self.process_in_mode(InsertionMode::InHead, token),

                _ => {
                    self.unexpected(token);
                    false
                }
            },

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.process_in_mode(InsertionMode::InBody, token),
        }
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(crate) fn handle_in_select_in_table_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A start tag whose tag name is one of: "caption", "table", "tbody",
            // "tfoot", "thead", "tr", "td", "th""
            // "Parse error."
            // "Pop elements from the stack of open elements until a select element
            // has been popped from the stack."
            // "Reset the insertion mode appropriately."
            // "Reprocess the token."
            Token::StartTag { name, .. } if TABLE_BREAKOUT_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
                self.pop_until_named("select");
                self.reset_insertion_mode();
                self.process_token(token)
            }

            // "An end tag whose tag name is one of: "caption", "table", "tbody",
            // "tfoot", "thead", "tr", "td", "th""
            Token::EndTag { name, .. } if TABLE_BREAKOUT_TAGS.contains(&name.as_str()) => {
                // "Parse error."
                self.unexpected(token);
                // "If the stack of open elements does not have an element in table
                // scope that is an HTML element with the same tag name as that of
                // the token, then ignore the token."
                if !self.has_element_in_table_scope(name) {
                    return false;
                }
                self.pop_until_named("select");
                self.reset_insertion_mode();
                self.process_token(token)
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion mode."
            _ => self.process_in_mode(InsertionMode::InSelect, token),
        }
    }

    fn pop_if_current(&mut self, name: &str) {
        if self.current_node_is(name) {
            let _ = self.pop();
        }
    }

    /// Pop up to and including the open select and reset the insertion mode.
    /// Returns false when there is no select in select scope.
    fn close_select(&mut self) -> bool {
        if !self.has_element_in_select_scope("select") {
            return false;
        }
        self.pop_until_named("select");
        self.reset_insertion_mode();
        true
    }
}
