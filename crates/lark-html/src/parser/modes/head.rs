use lark_common::warning::warn_once;
use lark_dom::{QuirksMode, TreeSink};

use super::split_leading_whitespace;
use crate::parser::core::{HTMLTreeBuilder, InsertionMode};
use crate::parser::quirks::quirks_mode_for_doctype;
use crate::tokenizer::{Token, TokenizerState};

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(crate) fn handle_initial_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            Token::Character { data } => {
                let (_, rest) = split_leading_whitespace(data);
                if rest.is_empty() {
                    return true;
                }
                self.initial_anything_else(&Token::character(rest))
            }

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { .. } => {
                let document = self.sink.document();
                self.insert_comment(token, Some(document));
                true
            }

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                // "If the DOCTYPE token's name is not "html", or the token's public
                // identifier is not missing, or the token's system identifier is
                // neither missing nor "about:legacy-compat", then there is a parse error."
                if name.as_deref() != Some("html")
                    || public_identifier.is_some()
                    || system_identifier
                        .as_deref()
                        .is_some_and(|id| id != "about:legacy-compat")
                {
                    self.error(format_args!("Unexpected DOCTYPE {token}"));
                }

                // "Append a DocumentType node to the Document node, with its name
                // set to the name given in the DOCTYPE token, or the empty string if
                // the name was missing; its public ID set to the public identifier
                // given in the DOCTYPE token, or the empty string if the public
                // identifier was missing; and its system ID set to the system
                // identifier given in the DOCTYPE token, or the empty string if the
                // system identifier was missing."
                let doctype = self.sink.create_doctype(
                    name.as_deref().unwrap_or_default(),
                    public_identifier.as_deref().unwrap_or_default(),
                    system_identifier.as_deref().unwrap_or_default(),
                );
                let document = self.sink.document();
                self.sink.append(document, doctype);

                let mode = quirks_mode_for_doctype(
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                    *force_quirks,
                );
                self.set_quirks_mode(mode);

                // "Then, switch the insertion mode to "before html"."
                self.switch_mode(InsertionMode::BeforeHtml);
                true
            }

            _ => self.initial_anything_else(token),
        }
    }

    /// "Anything else"
    /// "If the document is not an iframe srcdoc document, then this is a parse
    /// error; if the parser cannot change the mode flag is false, set the
    /// Document to quirks mode."
    /// "In any case, switch the insertion mode to "before html", then reprocess
    /// the token."
    fn initial_anything_else(&mut self, token: &Token) -> bool {
        self.error("Expected a DOCTYPE");
        self.set_quirks_mode(QuirksMode::Quirks);
        self.switch_mode(InsertionMode::BeforeHtml);
        self.process_token(token)
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
        self.sink.set_quirks_mode(mode);
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(crate) fn handle_before_html_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.unexpected(token);
                false
            }

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { .. } => {
                let document = self.sink.document();
                self.insert_comment(token, Some(document));
                true
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Ignore the token."
            Token::Character { data } => {
                let (_, rest) = split_leading_whitespace(data);
                if rest.is_empty() {
                    return true;
                }
                self.before_html_anything_else(&Token::character(rest))
            }

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document object.
            // Put this element in the stack of open elements."
            // "Switch the insertion mode to "before head"."
            Token::StartTag { name, .. } if name == "html" => {
                let html = self.create_element_for_token(token);
                let document = self.sink.document();
                self.sink.append(document, html);
                self.push(html);
                self.switch_mode(InsertionMode::BeforeHead);
                true
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. } if matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.before_html_anything_else(token)
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => {
                self.unexpected(token);
                false
            }

            _ => self.before_html_anything_else(token),
        }
    }

    /// "Anything else"
    /// "Create an html element whose node document is the Document object.
    /// Append it to the Document object. Put this element in the stack of open
    /// elements."
    /// "Switch the insertion mode to "before head", then reprocess the token."
    fn before_html_anything_else(&mut self, token: &Token) -> bool {
        let html = self.create_element_for_token(&Token::start_tag("html"));
        let document = self.sink.document();
        self.sink.append(document, html);
        self.push(html);
        self.switch_mode(InsertionMode::BeforeHead);
        self.process_token(token)
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(crate) fn handle_before_head_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Ignore the token."
            Token::Character { data } => {
                let (_, rest) = split_leading_whitespace(data);
                if rest.is_empty() {
                    return true;
                }
                self.before_head_anything_else(&Token::character(rest))
            }

            // "A comment token"
            // "Insert a comment."
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

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token)
            }

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_element(token);
                self.head_element_pointer = Some(head);
                self.switch_mode(InsertionMode::InHead);
                true
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. } if matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.before_head_anything_else(token)
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => {
                self.unexpected(token);
                false
            }

            _ => self.before_head_anything_else(token),
        }
    }

    /// "Anything else"
    /// "Insert an HTML element for a "head" start tag token with no attributes."
    /// "Set the head element pointer to the newly created head element."
    /// "Switch the insertion mode to "in head"."
    /// "Reprocess the current token."
    fn before_head_anything_else(&mut self, token: &Token) -> bool {
        let head = self.insert_element_named("head");
        self.head_element_pointer = Some(head);
        self.switch_mode(InsertionMode::InHead);
        self.process_token(token)
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(crate) fn handle_in_head_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
            Token::Character { data } => {
                let (whitespace, rest) = split_leading_whitespace(data);
                self.insert_characters(whitespace);
                if rest.is_empty() {
                    return true;
                }
                self.in_head_anything_else(&Token::character(rest))
            }

            // "A comment token"
            // "Insert a comment."
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

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                // "Process the token using the rules for the "in body" insertion mode."
                "html" => self.process_in_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is one of: "base", "basefont", "bgsound", "link""
                // "A start tag whose tag name is "meta""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements."
                // "Acknowledge the token's self-closing flag, if it is set."
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    let _ = self.insert_empty(token);
                    true
                }

                // "A start tag whose tag name is "title""
                // "Follow the generic RCDATA element parsing algorithm."
                "title" => {
                    self.parse_text_element(token, TokenizerState::RCDATA);
                    true
                }

                // "A start tag whose tag name is "noscript", if the scripting flag is enabled"
                // "A start tag whose tag name is one of: "noframes", "style""
                // "Follow the generic raw text element parsing algorithm."
                "noscript" if self.scripting => {
                    self.parse_text_element(token, TokenizerState::RAWTEXT);
                    true
                }
                "noframes" | "style" => {
                    self.parse_text_element(token, TokenizerState::RAWTEXT);
                    true
                }

                // "A start tag whose tag name is "noscript", if the scripting flag is disabled"
                // "Insert an HTML element for the token."
                // "Switch the insertion mode to "in head noscript"."
                "noscript" => {
                    let _ = self.insert_element(token);
                    self.switch_mode(InsertionMode::InHeadNoscript);
                    true
                }

                // "A start tag whose tag name is "script""
                // The script element is inserted, the tokenizer switched to the
                // script data state and the insertion mode to "text". Scripts
                // are never executed.
                "script" => {
                    self.parse_text_element(token, TokenizerState::ScriptData);
                    true
                }

                // "A start tag whose tag name is "template""
                // Template contents are parsed as ordinary children.
                "template" => {
                    warn_once("HTML Parser", "<template> contents are parsed as ordinary children");
                    let _ = self.insert_element(token);
                    self.frameset_ok = false;
                    true
                }

                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                "head" => {
                    self.unexpected(token);
                    false
                }

                _ => self.in_head_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "head""
                // "Pop the current node (which will be the head element) off the
                // stack of open elements."
                // "Switch the insertion mode to "after head"."
                "head" => {
                    self.close_head_element(token);
                    self.switch_mode(InsertionMode::AfterHead);
                    true
                }

                // "An end tag whose tag name is one of: "body", "html", "br""
                // "Act as described in the "anything else" entry below."
                "body" | "html" | "br" => self.in_head_anything_else(token),

                // "An end tag whose tag name is "template""
                "template" => {
                    // "If there is no template element on the stack of open
                    // elements, then this is a parse error; ignore the token."
                    if !self.stack_contains("template") {
                        self.unexpected(token);
                        return false;
                    }
                    // "Generate all implied end tags thoroughly."
                    self.generate_all_implied_end_tags_thoroughly();
                    // "If the current node is not a template element, then this
                    // is a parse error."
                    if !self.current_node_is("template") {
                        self.error("Unclosed elements inside <template>");
                    }
                    // "Pop elements from the stack of open elements until a
                    // template element has been popped from the stack."
                    self.pop_until_named("template");
                    true
                }

                // "Any other end tag"
                // "Parse error. Ignore the token."
                _ => {
                    self.unexpected(token);
                    false
                }
            },

            _ => self.in_head_anything_else(token),
        }
    }

    /// "Anything else"
    /// "Pop the current node (which will be the head element) off the stack of
    /// open elements."
    /// "Switch the insertion mode to "after head"."
    /// "Reprocess the token."
    fn in_head_anything_else(&mut self, token: &Token) -> bool {
        self.close_head_element(token);
        self.switch_mode(InsertionMode::AfterHead);
        self.process_token(token)
    }

    /// Pop up to and including the head element. A `<template>` parsed as an
    /// ordinary element may still be open above it.
    fn close_head_element(&mut self, token: &Token) {
        match self.head_element_pointer {
            Some(head) if self.stack_position(head).is_some() => {
                if self.current_node() != Some(head) {
                    self.unexpected(token);
                }
                self.pop_until_node(head);
            }
            _ => {
                let _ = self.pop();
            }
        }
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(crate) fn handle_in_head_noscript_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.unexpected(token);
                false
            }

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_in_mode(InsertionMode::InBody, token)
            }

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from the
            // stack of open elements; the new current node will be a head element."
            // "Switch the insertion mode to "in head"."
            Token::EndTag { name, .. } if name == "noscript" => {
                let _ = self.pop();
                self.switch_mode(InsertionMode::InHead);
                true
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Process the token using the rules for the "in head" insertion mode."
            Token::Character { data } => {
                let (whitespace, rest) = split_leading_whitespace(data);
                if !whitespace.is_empty() {
                    let _ = self.process_in_mode(InsertionMode::InHead, &Token::character(whitespace));
                }
                if rest.is_empty() {
                    return true;
                }
                self.in_head_noscript_anything_else(&Token::character(rest))
            }

            // "A comment token"
            // "A start tag whose tag name is one of: "basefont", "bgsound",
            // "link", "meta", "noframes", "style""
            // "Process the token using the rules for the "in head" insertion mode."
            Token::Comment { .. } => self.process_in_mode(InsertionMode::InHead, token),
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.process_in_mode(InsertionMode::InHead, token)
            }

            // "An end tag whose tag name is "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. } if name == "br" => self.in_head_noscript_anything_else(token),

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if matches!(name.as_str(), "head" | "noscript") => {
                self.unexpected(token);
                false
            }
            Token::EndTag { .. } => {
                self.unexpected(token);
                false
            }

            _ => self.in_head_noscript_anything_else(token),
        }
    }

    /// "Anything else"
    /// "Parse error."
    /// "Pop the current node (which will be a noscript element) from the stack
    /// of open elements; the new current node will be a head element."
    /// "Switch the insertion mode to "in head"."
    /// "Reprocess the token."
    fn in_head_noscript_anything_else(&mut self, token: &Token) -> bool {
        self.unexpected(token);
        let _ = self.pop();
        self.switch_mode(InsertionMode::InHead);
        self.process_token(token)
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(crate) fn handle_after_head_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ..."
            // "Insert the character."
            Token::Character { data } => {
                let (whitespace, rest) = split_leading_whitespace(data);
                self.insert_characters(whitespace);
                if rest.is_empty() {
                    return true;
                }
                self.after_head_anything_else(&Token::character(rest))
            }

            // "A comment token"
            // "Insert a comment."
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

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "html""
                // "Process the token using the rules for the "in body" insertion mode."
                "html" => self.process_in_mode(InsertionMode::InBody, token),

                // "A start tag whose tag name is "body""
                // "Insert an HTML element for the token."
                // "Set the frameset-ok flag to "not ok"."
                // "Switch the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_element(token);
                    self.frameset_ok = false;
                    self.switch_mode(InsertionMode::InBody);
                    true
                }

                // "A start tag whose tag name is "frameset""
                // "Insert an HTML element for the token."
                // "Switch the insertion mode to "in frameset"."
                "frameset" => {
                    let _ = self.insert_element(token);
                    self.switch_mode(InsertionMode::InFrameset);
                    true
                }

                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link", "meta", "noframes", "script", "style",
                // "template", "title""
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
                | "template" | "title" => {
                    // "Parse error."
                    self.unexpected(token);
                    // "Push the node pointed to by the head element pointer onto
                    // the stack of open elements."
                    let Some(head) = self.head_element_pointer else {
                        return self.after_head_anything_else(token);
                    };
                    let already_open = self.stack_position(head).is_some();
                    if !already_open {
                        self.push(head);
                    }
                    // "Process the token using the rules for the "in head" insertion mode."
                    let handled = self.process_in_mode(InsertionMode::InHead, token);
                    // "Remove the node pointed to by the head element pointer from
                    // the stack of open elements. (It might not be the current node
                    // at this point.)"
                    if !already_open {
                        self.remove_from_stack(head);
                    }
                    handled
                }

                // "A start tag whose tag name is "head""
                // "Parse error. Ignore the token."
                "head" => {
                    self.unexpected(token);
                    false
                }

                _ => self.after_head_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "template""
                // "Process the token using the rules for the "in head" insertion mode."
                "template" => self.process_in_mode(InsertionMode::InHead, token),

                // "An end tag whose tag name is one of: "body", "html", "br""
                // "Act as described in the "anything else" entry below."
                "body" | "html" | "br" => self.after_head_anything_else(token),

                // "Any other end tag"
                // "Parse error. Ignore the token."
                _ => {
                    self.unexpected(token);
                    false
                }
            },

            _ => self.after_head_anything_else(token),
        }
    }

    /// "Anything else"
    /// "Insert an HTML element for a "body" start tag token with no attributes."
    /// "Switch the insertion mode to "in body"."
    /// "Reprocess the current token."
    fn after_head_anything_else(&mut self, token: &Token) -> bool {
        let _ = self.insert_element_named("body");
        self.switch_mode(InsertionMode::InBody);
        self.process_token(token)
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(crate) fn handle_text_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Character { data } => {
                self.insert_characters(data);
                true
            }

            // "An end-of-file token"
            // "Parse error."
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode and
            // reprocess the token."
            Token::EndOfFile => {
                self.error("Unexpected end of file in text content");
                let _ = self.pop();
                self.switch_mode(self.original_insertion_mode);
                self.process_token(token)
            }

            // "An end tag whose tag name is "script""
            // "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.pop();
                self.switch_mode(self.original_insertion_mode);
                true
            }

            // The tokenizer produces nothing else in RCDATA, RAWTEXT and
            // script data content.
            Token::StartTag { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.unexpected(token);
                false
            }
        }
    }
}
