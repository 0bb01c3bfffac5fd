use std::borrow::Cow;

use lark_common::warning::warn_once;
use lark_dom::{QuirksMode, TreeSink};

use super::is_all_whitespace;
use crate::parser::core::{HTMLTreeBuilder, InsertionMode, attributes_to_map};
use crate::schema::TagSchema;
use crate::tokenizer::{Token, TokenizerState};

/// Start tags that close an open `p` element before being inserted.
const BLOCK_START_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div", "dl",
    "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main", "menu", "nav", "ol",
    "p", "search", "section", "summary", "ul",
];

/// End tags closed by generating implied end tags and popping to the element.
const BLOCK_END_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "button", "center", "details", "dialog", "dir",
    "div", "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "listing",
    "main", "menu", "nav", "ol", "pre", "search", "section", "summary", "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Elements that may legitimately still be open when the body ends.
const CLOSABLE_AT_BODY_END: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td", "tfoot",
    "th", "thead", "tr", "body", "html",
];

/// Table-only start tags ignored in body content.
const TABLE_PARTS: &[&str] = &[
    "caption", "col", "colgroup", "frame", "head", "tbody", "td", "tfoot", "th", "thead", "tr",
];

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(crate) fn handle_in_body_mode(&mut self, token: &Token) -> bool {
        match token {
            Token::Character { data } => self.in_body_characters(data),

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

            Token::StartTag { name, .. } => self.in_body_start_tag(name, token),
            Token::EndTag { name, .. } => self.in_body_end_tag(name, token),

            // "An end-of-file token"
            // "If there is a node in the stack of open elements that is not either
            // a dd element, a dt element, an li element, an optgroup element, an
            // option element, a p element, an rb element, an rp element, an rt
            // element, an rtc element, a tbody element, a td element, a tfoot
            // element, a th element, a thead element, a tr element, the body
            // element, or the html element, then this is a parse error."
            // "Stop parsing."
            Token::EndOfFile => {
                self.report_unclosed_elements();
                true
            }
        }
    }

    fn report_unclosed_elements(&mut self) {
        let unclosed = self
            .open_elements
            .iter()
            .any(|&node| !self.is_html_named_one_of(node, CLOSABLE_AT_BODY_END));
        if unclosed {
            self.error("Unclosed elements at end of body");
        }
    }

    fn in_body_characters(&mut self, data: &str) -> bool {
        // "A character token that is U+0000 NULL"
        // "Parse error. Ignore the token."
        let text = if data.contains('\0') {
            self.error("Unexpected null character");
            Cow::Owned(data.replace('\0', ""))
        } else {
            Cow::Borrowed(data)
        };
        if text.is_empty() {
            return false;
        }

        // "Reconstruct the active formatting elements, if any."
        // "Insert the token's character."
        self.reconstruct_active_formatting_elements();
        self.insert_characters(&text);

        // "Any other character token" ... "Set the frameset-ok flag to "not ok"."
        if !is_all_whitespace(&text) {
            self.frameset_ok = false;
        }
        true
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "Generate implied end tags, except for p elements."
    /// "If the current node is not a p element, then this is a parse error."
    /// "Pop elements from the stack of open elements until a p element has
    /// been popped from the stack."
    pub(crate) fn close_p_element(&mut self) {
        self.generate_implied_end_tags(Some("p"));
        if !self.current_node_is("p") {
            self.error("Unclosed elements inside <p>");
        }
        self.pop_until_named("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    fn close_p_in_button_scope(&mut self) {
        if self.has_element_in_button_scope("p") {
            self.close_p_element();
        }
    }

    #[allow(clippy::too_many_lines)]
    fn in_body_start_tag(&mut self, name: &str, token: &Token) -> bool {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                // "Parse error."
                self.unexpected(token);
                // "If there is a template element on the stack of open elements,
                // then ignore the token."
                if self.stack_contains("template") {
                    return false;
                }
                // "Otherwise, for each attribute on the token, check to see if the
                // attribute is already present on the top element of the stack of
                // open elements. If it is not, add the attribute and its
                // corresponding value to that element."
                if let Some(&root) = self.open_elements.first()
                    && let Token::StartTag { attributes, .. } = token
                {
                    self.sink
                        .add_attributes_if_missing(root, &attributes_to_map(attributes));
                }
                true
            }

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound",
            // "link", "meta", "noframes", "script", "style", "template", "title""
            // "Process the token using the rules for the "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
            | "template" | "title" => self.process_in_mode(InsertionMode::InHead, token),

            // "A start tag whose tag name is "body""
            "body" => {
                // "Parse error."
                self.unexpected(token);
                // "If the second element on the stack of open elements is not a
                // body element, if the stack of open elements has only one node on
                // it, or if there is a template element on the stack of open
                // elements, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                let Some(body) = self
                    .open_elements
                    .get(1)
                    .copied()
                    .filter(|&node| self.is_html_named(node, "body"))
                else {
                    return false;
                };
                if self.stack_contains("template") {
                    return false;
                }
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for each
                // attribute on the token, check to see if the attribute is already
                // present on the body element (the second element) on the stack of
                // open elements, and if it is not, add the attribute and its
                // corresponding value to that element."
                self.frameset_ok = false;
                if let Token::StartTag { attributes, .. } = token {
                    self.sink
                        .add_attributes_if_missing(body, &attributes_to_map(attributes));
                }
                true
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                // "Parse error."
                self.unexpected(token);
                // "If the stack of open elements has only one node on it, or if the
                // second element on the stack of open elements is not a body
                // element, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                let Some(body) = self
                    .open_elements
                    .get(1)
                    .copied()
                    .filter(|&node| self.is_html_named(node, "body"))
                else {
                    return false;
                };
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                if !self.frameset_ok {
                    return false;
                }
                // STEP 1: "Remove the second element on the stack of open elements
                //          from its parent node, if it has one."
                self.sink.detach(body);
                // STEP 2: "Pop all the nodes from the bottom of the stack of open
                //          elements, from the current node up to, but not including,
                //          the root html element."
                self.open_elements.truncate(1);
                // STEP 3: "Insert an HTML element for the token."
                let _ = self.insert_element(token);
                // STEP 4: "Switch the insertion mode to "in frameset"."
                self.switch_mode(InsertionMode::InFrameset);
                true
            }

            // "A start tag whose tag name is one of: "address", "article", "aside",
            // "blockquote", "center", "details", "dialog", "dir", "div", "dl",
            // "fieldset", "figcaption", "figure", "footer", "header", "hgroup",
            // "main", "menu", "nav", "ol", "p", "search", "section", "summary", "ul""
            // "If the stack of open elements has a p element in button scope, then
            // close a p element."
            // "Insert an HTML element for the token."
            _ if BLOCK_START_TAGS.contains(&name) => {
                self.close_p_in_button_scope();
                let _ = self.insert_element(token);
                true
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                self.close_p_in_button_scope();
                // "If the current node is an HTML element whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse error;
                // pop the current node off the stack of open elements."
                if self.current_node_is_one_of(HEADINGS) {
                    self.error(format_args!("Nested heading <{name}>"));
                    let _ = self.pop();
                }
                let _ = self.insert_element(token);
                true
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                self.close_p_in_button_scope();
                let _ = self.insert_element(token);
                // "If the next token is a U+000A LINE FEED (LF) character token,
                // then ignore that token and move on to the next one. (Newlines at
                // the start of pre blocks are ignored as an authoring convenience.)"
                self.ignore_next_line_feed = true;
                // "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                true
            }

            // "A start tag whose tag name is "form""
            "form" => {
                let template_open = self.stack_contains("template");
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is a
                // parse error; ignore the token."
                if self.form_element_pointer.is_some() && !template_open {
                    self.unexpected(token);
                    return false;
                }
                self.close_p_in_button_scope();
                // "Insert an HTML element for the token, and, if there is no
                // template element on the stack of open elements, set the form
                // element pointer to point to the element created."
                let form = self.insert_element(token);
                if !template_open {
                    self.form_element_pointer = Some(form);
                }
                true
            }

            // "A start tag whose tag name is "li""
            // "A start tag whose tag name is one of: "dd", "dt""
            "li" | "dd" | "dt" => {
                // STEP 1: "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                let closes: &[&str] = if name == "li" { &["li"] } else { &["dd", "dt"] };

                // STEP 2-5: "Initialize node to be the current node (the
                //            bottommost node of the stack). Loop:"
                for index in (0..self.open_elements.len()).rev() {
                    let node = self.open_elements[index];
                    // "If node is an li element [dd or dt element], then run these substeps:"
                    if self.is_html_named_one_of(node, closes) {
                        let node_name = self.node_name(node).to_string();
                        // "Generate implied end tags, except for li elements."
                        self.generate_implied_end_tags(Some(&node_name));
                        // "If the current node is not an li element, then this is a
                        // parse error."
                        if !self.current_node_is(&node_name) {
                            self.error(format_args!("Unclosed elements inside <{node_name}>"));
                        }
                        // "Pop elements from the stack of open elements until an li
                        // element has been popped from the stack."
                        self.pop_until_named(&node_name);
                        break;
                    }
                    // "If node is in the special category, but is not an address,
                    // div, or p element, then jump to the step labeled done below."
                    if self.is_special(node) && !self.is_html_named_one_of(node, &["address", "div", "p"]) {
                        break;
                    }
                }

                // STEP 6: "Done: If the stack of open elements has a p element in
                //          button scope, then close a p element."
                self.close_p_in_button_scope();
                // STEP 7: "Finally, insert an HTML element for the token."
                let _ = self.insert_element(token);
                true
            }

            // "A start tag whose tag name is "plaintext""
            "plaintext" => {
                self.close_p_in_button_scope();
                let _ = self.insert_element(token);
                // "Switch the tokenizer to the PLAINTEXT state."
                self.tokenizer.transition(TokenizerState::PLAINTEXT);
                true
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // "If the stack of open elements has a button element in scope,
                // then run these substeps:"
                if self.has_element_in_scope("button") {
                    // "Parse error."
                    self.error("Nested <button> element");
                    // "Generate implied end tags."
                    self.generate_implied_end_tags(None);
                    // "Pop elements from the stack of open elements until a button
                    // element has been popped from the stack."
                    self.pop_until_named("button");
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_element(token);
                self.frameset_ok = false;
                true
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a element
                // between the end of the list and the last marker on the list (or
                // the start of the list if there is no marker on the list), then
                // this is a parse error; run the adoption agency algorithm for the
                // token, then remove that element from the list of active formatting
                // elements and the stack of open elements if the adoption agency
                // algorithm didn't already remove it (it might not have if the
                // element is not in table scope)."
                if let Some((_, existing)) = self.last_formatting_element_named("a") {
                    self.error("Nested <a> element");
                    let _ = self.run_adoption_agency("a");
                    self.remove_from_active_formatting_elements(existing);
                    self.remove_from_stack(existing);
                }
                self.reconstruct_active_formatting_elements();
                let node = self.insert_element(token);
                self.push_active_formatting_element(node, token);
                true
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            // "font", "i", "s", "small", "strike", "strong", "tt", "u""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token. Push onto the list of active
            // formatting elements that element."
            _ if TagSchema::is_formatting(name) && !matches!(name, "a" | "nobr") => {
                self.reconstruct_active_formatting_elements();
                let node = self.insert_element(token);
                self.push_active_formatting_element(node, token);
                true
            }

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope, then
                // this is a parse error; run the adoption agency algorithm for the
                // token, then once again reconstruct the active formatting
                // elements, if any."
                if self.has_element_in_scope("nobr") {
                    self.error("Nested <nobr> element");
                    let _ = self.run_adoption_agency("nobr");
                    self.reconstruct_active_formatting_elements();
                }
                let node = self.insert_element(token);
                self.push_active_formatting_element(node, token);
                true
            }

            // "A start tag whose tag name is one of: "applet", "marquee", "object""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            // "Insert a marker at the end of the list of active formatting elements."
            // "Set the frameset-ok flag to "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_element(token);
                self.insert_marker();
                self.frameset_ok = false;
                true
            }

            // "A start tag whose tag name is "table""
            "table" => {
                // "If the Document is not set to quirks mode, and the stack of open
                // elements has a p element in button scope, then close a p element."
                if self.quirks_mode != QuirksMode::Quirks {
                    self.close_p_in_button_scope();
                }
                let _ = self.insert_element(token);
                self.frameset_ok = false;
                self.switch_mode(InsertionMode::InTable);
                true
            }

            // "A start tag whose tag name is one of: "area", "br", "embed", "img",
            // "keygen", "wbr""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token. Immediately pop the current
            // node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            // "Set the frameset-ok flag to "not ok"."
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_empty(token);
                self.frameset_ok = false;
                true
            }

            // "A start tag whose tag name is "input""
            "input" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_empty(token);
                // "If the token does not have an attribute with the name "type", or
                // if it does, but that attribute's value is not an ASCII
                // case-insensitive match for the string "hidden", then: set the
                // frameset-ok flag to "not ok"."
                let hidden = token
                    .attribute("type")
                    .is_some_and(|value| value.eq_ignore_ascii_case("hidden"));
                if !hidden {
                    self.frameset_ok = false;
                }
                true
            }

            // "A start tag whose tag name is one of: "param", "source", "track""
            "param" | "source" | "track" => {
                let _ = self.insert_empty(token);
                true
            }

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_in_button_scope();
                let _ = self.insert_empty(token);
                self.frameset_ok = false;
                true
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess it.
            // (Don't ask.)"
            "image" => {
                self.error("<image> start tag treated as <img>");
                let Token::StartTag {
                    self_closing,
                    attributes,
                    ..
                } = token
                else {
                    return false;
                };
                let img = Token::StartTag {
                    name: "img".to_string(),
                    self_closing: *self_closing,
                    attributes: attributes.clone(),
                };
                self.process_token(&img)
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // STEP 1: "Insert an HTML element for the token."
                let _ = self.insert_element(token);
                // STEP 2: "If the next token is a U+000A LINE FEED (LF) character
                //          token, then ignore that token and move on to the next one."
                self.ignore_next_line_feed = true;
                // STEP 3: "Switch the tokenizer to the RCDATA state."
                self.tokenizer.transition(TokenizerState::RCDATA);
                // STEP 4: "Let the original insertion mode be the current insertion mode."
                self.original_insertion_mode = self.insertion_mode;
                // STEP 5: "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                // STEP 6: "Switch the insertion mode to "text"."
                self.switch_mode(InsertionMode::Text);
                true
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                self.close_p_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::RAWTEXT);
                true
            }

            // "A start tag whose tag name is "iframe""
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::RAWTEXT);
                true
            }

            // "A start tag whose tag name is "noembed""
            // "A start tag whose tag name is "noscript", if the scripting flag is enabled"
            // "Follow the generic raw text element parsing algorithm."
            "noembed" => {
                self.parse_text_element(token, TokenizerState::RAWTEXT);
                true
            }
            "noscript" if self.scripting => {
                self.parse_text_element(token, TokenizerState::RAWTEXT);
                true
            }

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_element(token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption", "in
                // table body", "in row", or "in cell", then switch the insertion
                // mode to "in select in table". Otherwise, switch the insertion
                // mode to "in select"."
                let mode = if matches!(
                    self.insertion_mode,
                    InsertionMode::InTable
                        | InsertionMode::InCaption
                        | InsertionMode::InTableBody
                        | InsertionMode::InRow
                        | InsertionMode::InCell
                ) {
                    InsertionMode::InSelectInTable
                } else {
                    InsertionMode::InSelect
                };
                self.switch_mode(mode);
                true
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            "optgroup" | "option" => {
                // "If the current node is an option element, then pop the current
                // node off the stack of open elements."
                if self.current_node_is("option") {
                    let _ = self.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_element(token);
                true
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            "rb" | "rtc" => {
                // "If the stack of open elements has a ruby element in scope, then
                // generate implied end tags. If the current node is not now a ruby
                // element, this is a parse error."
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags(None);
                    if !self.current_node_is("ruby") {
                        self.error(format_args!("<{name}> outside of <ruby>"));
                    }
                }
                let _ = self.insert_element(token);
                true
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            "rp" | "rt" => {
                // "If the stack of open elements has a ruby element in scope, then
                // generate implied end tags, except for rtc elements. If the current
                // node is not now a rtc element or a ruby element, this is a parse
                // error."
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags(Some("rtc"));
                    if !self.current_node_is_one_of(&["rtc", "ruby"]) {
                        self.error(format_args!("<{name}> outside of <ruby>"));
                    }
                }
                let _ = self.insert_element(token);
                true
            }

            // "A start tag whose tag name is "math""
            // "A start tag whose tag name is "svg""
            // "Reconstruct the active formatting elements, if any."
            // "Insert a foreign element for the token."
            // "If the token has its self-closing flag set, pop the current node off
            // the stack of open elements and acknowledge the token's self-closing flag."
            "math" | "svg" => {
                warn_once("HTML Parser", "SVG and MathML are parsed without namespace adjustment");
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_foreign_element(token);
                true
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "frame", "head", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            _ if TABLE_PARTS.contains(&name) => {
                self.unexpected(token);
                false
            }

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                if token.is_self_closing() && !self.schema.is_known(name) {
                    self.insert_unknown_self_closing(token);
                } else {
                    let _ = self.insert_element(token);
                }
                true
            }
        }
    }

    fn in_body_end_tag(&mut self, name: &str, token: &Token) -> bool {
        match name {
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion mode."
            "template" => self.process_in_mode(InsertionMode::InHead, token),

            // "An end tag whose tag name is "body""
            // "An end tag whose tag name is "html""
            "body" | "html" => {
                // "If the stack of open elements does not have a body element in
                // scope, this is a parse error; ignore the token."
                if !self.has_element_in_scope("body") {
                    self.unexpected(token);
                    return false;
                }
                // "Otherwise, if there is a node in the stack of open elements that
                // is not either a dd element, ... then this is a parse error."
                self.report_unclosed_elements();
                // "Switch the insertion mode to "after body"."
                self.switch_mode(InsertionMode::AfterBody);
                // "</html>": "Reprocess the token."
                if name == "html" {
                    return self.process_token(token);
                }
                true
            }

            // "An end tag whose tag name is one of: "address", "article", "aside",
            // "blockquote", "button", "center", "details", "dialog", "dir", "div",
            // "dl", "fieldset", "figcaption", "figure", "footer", "header",
            // "hgroup", "listing", "main", "menu", "nav", "ol", "pre", "search",
            // "section", "summary", "ul""
            _ if BLOCK_END_TAGS.contains(&name) => {
                // "If the stack of open elements does not have an element in scope
                // that is an HTML element with the same tag name as that of the
                // token, then this is a parse error; ignore the token."
                if !self.has_element_in_scope(name) {
                    self.unexpected(token);
                    return false;
                }
                self.close_in_scope_element(name, &[name]);
                true
            }

            // "An end tag whose tag name is "form""
            "form" => {
                if self.stack_contains("template") {
                    // "If there is a template element on the stack of open elements"
                    if !self.has_element_in_scope("form") {
                        self.unexpected(token);
                        return false;
                    }
                    self.close_in_scope_element("form", &["form"]);
                    return true;
                }

                // STEP 1: "Let node be the element that the form element pointer is set to, or null"
                // STEP 2: "Set the form element pointer to null."
                let node = self.form_element_pointer.take();

                // STEP 3: "If node is null or if the stack of open elements does not
                //          have node in scope, then this is a parse error; return
                //          and ignore the token."
                let Some(node) = node.filter(|&node| self.has_node_in_scope(node)) else {
                    self.unexpected(token);
                    return false;
                };

                // STEP 4: "Generate implied end tags."
                self.generate_implied_end_tags(None);

                // STEP 5: "If the current node is not node, then this is a parse error."
                if self.current_node() != Some(node) {
                    self.error("Unclosed elements inside <form>");
                }

                // STEP 6: "Remove node from the stack of open elements."
                self.remove_from_stack(node);
                true
            }

            // "An end tag whose tag name is "p""
            "p" => {
                // "If the stack of open elements does not have a p element in
                // button scope, then this is a parse error; insert an HTML element
                // for a "p" start tag token with no attributes."
                if !self.has_element_in_button_scope("p") {
                    self.unexpected(token);
                    let _ = self.insert_element_named("p");
                }
                // "Close a p element."
                self.close_p_element();
                true
            }

            // "An end tag whose tag name is "li""
            "li" => {
                // "If the stack of open elements does not have an li element in
                // list item scope, then this is a parse error; ignore the token."
                if !self.has_element_in_list_item_scope("li") {
                    self.unexpected(token);
                    return false;
                }
                self.close_in_scope_element("li", &["li"]);
                true
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            "dd" | "dt" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let single = [name];
                let targets: &[&str] = if HEADINGS.contains(&name) { HEADINGS } else { &single };
                // "If the stack of open elements does not have an element in scope
                // that is an HTML element and whose tag name is one of ..., then
                // this is a parse error; ignore the token."
                if !self.has_any_element_in_scope(targets) {
                    self.unexpected(token);
                    return false;
                }
                self.close_in_scope_element(name, targets);
                true
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code", "em",
            // "font", "i", "nobr", "s", "small", "strike", "strong", "tt", "u""
            // "Run the adoption agency algorithm for the token."
            _ if TagSchema::is_formatting(name) => {
                if self.run_adoption_agency(name) {
                    true
                } else {
                    self.any_other_end_tag(name, token)
                }
            }

            // "An end tag token whose tag name is one of: "applet", "marquee", "object""
            "applet" | "marquee" | "object" => {
                // "If the stack of open elements does not have an element in scope
                // that is an HTML element with the same tag name as that of the
                // token, then this is a parse error; ignore the token."
                if !self.has_element_in_scope(name) {
                    self.unexpected(token);
                    return false;
                }
                self.close_in_scope_element(name, &[name]);
                // "Clear the list of active formatting elements up to the last marker."
                self.clear_active_formatting_elements_to_last_marker();
                true
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br" start
            // tag token with no attributes, rather than the end tag token that it
            // actually is."
            "br" => {
                self.unexpected(token);
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_empty(&Token::start_tag("br"));
                self.frameset_ok = false;
                true
            }

            _ => self.any_other_end_tag(name, token),
        }
    }

    /// The shared tail of the block, list item, definition and heading end
    /// tags: "Generate implied end tags" (keeping `name` itself open), report
    /// a parse error if the current node is not `name`, then pop until one of
    /// `targets` has been popped.
    fn close_in_scope_element(&mut self, name: &str, targets: &[&str]) {
        self.generate_implied_end_tags(Some(name));
        if !self.current_node_is(name) {
            self.error(format_args!("Unclosed elements before </{name}>"));
        }
        self.pop_until_one_of(targets);
    }

    /// "Any other end tag"
    pub(crate) fn any_other_end_tag(&mut self, name: &str, token: &Token) -> bool {
        // STEP 1: "Initialize node to be the current node (the bottommost node of the stack)."
        for index in (0..self.open_elements.len()).rev() {
            let node = self.open_elements[index];

            // STEP 2: "Loop: If node is an HTML element with the same tag name as the
            //          token, then:"
            if self.is_html_named(node, name) {
                // STEP 2.1: "Generate implied end tags, except for HTML elements
                //            with the same tag name as the token."
                self.generate_implied_end_tags(Some(name));
                // STEP 2.2: "If node is not the current node, then this is a parse error."
                if self.current_node() != Some(node) {
                    self.error(format_args!("Unclosed elements before </{name}>"));
                }
                // STEP 2.3: "Pop all the nodes from the current node up to node,
                //            including node, then stop these steps."
                self.pop_until_node(node);
                return true;
            }

            // STEP 3: "Otherwise, if node is in the special category, then this is
            //          a parse error; ignore the token, and return."
            if self.is_special(node) {
                self.unexpected(token);
                return false;
            }
            // STEP 4-5: "Set node to the previous entry in the stack of open
            //            elements. Return to the step labeled loop."
        }
        false
    }
}
