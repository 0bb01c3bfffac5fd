use lark_dom::TreeSink;

use super::{is_html_whitespace, split_leading_whitespace};
use crate::parser::core::{HTMLTreeBuilder, InsertionMode};
use crate::tokenizer::Token;

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(crate) fn handle_after_body_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A
            // LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or
            // U+0020 SPACE"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Character { data } => {
                let (whitespace, rest) = split_leading_whitespace(data);
                if !whitespace.is_empty() {
                    let _ = self.process_in_mode(InsertionMode::InBody, &Token::character(whitespace));
                }
                if rest.is_empty() {
                    return true;
                }
                self.after_body_anything_else(&Token::character(rest))
            }

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { .. } => {
                let html = self.open_elements.first().copied();
                self.insert_comment(token, html);
                true
            }

            Token::Doctype { .. } => {
                self.unexpected(token);
                false
            }

            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token)
            }

            // "An end tag whose tag name is "html""
            Token::EndTag { name, .. } if name == "html" => {
                // "If the parser was created as part of the HTML fragment parsing
                // algorithm, this is a parse error; ignore the token. (fragment case)"
                if self.context_element.is_some() {
                    self.unexpected(token);
                    return false;
                }
                // "Otherwise, switch the insertion mode to "after after body"."
                self.switch_mode(InsertionMode::AfterAfterBody);
                true
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => true,

            _ => self.after_body_anything_else(token),
        }
    }

    /// "Parse error. Switch the insertion mode to "in body" and reprocess the token."
    fn after_body_anything_else(&mut self, token: &Token) -> bool {
        self.unexpected(token);
        self.switch_mode(InsertionMode::InBody);
        self.process_token(token)
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(crate) fn handle_in_frameset_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
            Token::Character { data } => self.insert_frameset_whitespace(data),

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
                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token."
                "frameset" => {
                    let _ = self.insert_element(token);
                    true
                }
                // "A start tag whose tag name is "frame""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements."
                // "Acknowledge the token's self-closing flag, if it is set."
                "frame" => {
                    let _ = self.insert_empty(token);
                    true
                }
                "noframes" => self.process_in_mode(InsertionMode::InHead, token),
                _ => {
                    self.unexpected(token);
                    false
                }
            },

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name, .. } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                // parse error; ignore the token. (fragment case)"
                if self.open_elements.len() <= 1 {
                    self.unexpected(token);
                    return false;
                }
                // "Otherwise, pop the current node from the stack of open elements."
                let _ = self.pop();
                // "If the parser was not created as part of the HTML fragment
                // parsing algorithm (fragment case), and the current node is no
                // longer a frameset element, then switch the insertion mode to
                // "after frameset"."
                if self.context_element.is_none() && !self.current_node_is("frameset") {
                    self.switch_mode(InsertionMode::AfterFrameset);
                }
                true
            }

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is a
            // parse error."
            // "Note: The current node can only be the root html element in the
            // fragment case."
            // "Stop parsing."
            Token::EndOfFile => {
                if self.open_elements.len() > 1 {
                    self.error("Unexpected end of file in <frameset>");
                }
                true
            }

            Token::EndTag { .. } => {
                self.unexpected(token);
                false
            }
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(crate) fn handle_after_frameset_mode(&mut self, token: &Token) -> bool {
        match token {
            Token::Character { data } => self.insert_frameset_whitespace(data),

            Token::Comment { .. } => {
                self.insert_comment(token, None);
                true
            }

            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token)
            }

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            Token::EndTag { name, .. } if name == "html" => {
                self.switch_mode(InsertionMode::AfterAfterFrameset);
                true
            }

            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_in_mode(InsertionMode::InHead, token)
            }

            Token::EndOfFile => true,

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => {
                self.unexpected(token);
                false
            }
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(crate) fn handle_after_after_body_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { .. } => {
                let document = self.sink.document();
                self.insert_comment(token, Some(document));
                true
            }

            // "A DOCTYPE token"
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Character { data } => {
                let (whitespace, rest) = split_leading_whitespace(data);
                if !whitespace.is_empty() {
                    let _ = self.process_in_mode(InsertionMode::InBody, &Token::character(whitespace));
                }
                if rest.is_empty() {
                    return true;
                }
                self.after_body_anything_else(&Token::character(rest))
            }
            Token::Doctype { .. } => self.process_in_mode(InsertionMode::InBody, token),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token)
            }

            Token::EndOfFile => true,

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess the token."
            _ => self.after_body_anything_else(token),
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(crate) fn handle_after_after_frameset_mode(&mut self, token: &Token) -> bool {
        match token {
            Token::Comment { .. } => {
                let document = self.sink.document();
                self.insert_comment(token, Some(document));
                true
            }

            Token::Character { data } => {
                let whitespace: String = data.chars().filter(|&c| is_html_whitespace(c)).collect();
                if whitespace.len() != data.len() {
                    self.error("Unexpected text after </html>");
                }
                whitespace.is_empty()
                    || self.process_in_mode(InsertionMode::InBody, &Token::character(whitespace))
            }
            Token::Doctype { .. } => self.process_in_mode(InsertionMode::InBody, token),
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token)
            }

            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_in_mode(InsertionMode::InHead, token)
            }

            Token::EndOfFile => true,

            _ => {
                self.unexpected(token);
                false
            }
        }
    }

    /// The frameset modes keep whitespace characters and drop the rest with a
    /// parse error.
    fn insert_frameset_whitespace(&mut self, data: &str) -> bool {
        let whitespace: String = data.chars().filter(|&c| is_html_whitespace(c)).collect();
        if whitespace.len() != data.len() {
            self.error("Unexpected text in frameset content");
        }
        if whitespace.is_empty() {
            return false;
        }
        self.insert_characters(&whitespace);
        true
    }
}
