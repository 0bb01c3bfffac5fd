use lark_dom::TreeSink;

use super::{is_all_whitespace, split_leading_whitespace};
use crate::parser::core::{HTMLTreeBuilder, InsertionMode};
use crate::tokenizer::Token;

/// Current nodes that send character tokens through "in table text".
const TABLE_TEXT_PARENTS: &[&str] = &["table", "tbody", "template", "tfoot", "thead", "tr"];

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

const CELLS: &[&str] = &["td", "th"];

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(crate) fn handle_in_table_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token, if the current node is table, tbody, template,
            // tfoot, thead, or tr element"
            Token::Character { .. } if self.current_node_is_one_of(TABLE_TEXT_PARENTS) => {
                // "Let the pending table character tokens be an empty list of tokens."
                self.pending_table_character_tokens.clear();
                // "Let the original insertion mode be the current insertion mode."
                self.original_insertion_mode = self.insertion_mode;
                // "Switch the insertion mode to "in table text" and reprocess the token."
                self.switch_mode(InsertionMode::InTableText);
                self.process_token(token)
            }

            // "A comment token"
            Token::Comment { .. } => {
                self.insert_comment(token, None);
                true
            }

            // "A DOCTYPE token"
            Token::Doctype { .. } => {
                self.unexpected(token);
                false
            }

            Token::StartTag { name, .. } => match name.as_str() {
                // "A start tag whose tag name is "caption""
                "caption" => {
                    // "Clear the stack back to a table context."
                    self.clear_stack_back_to_table_context();
                    // "Insert a marker at the end of the list of active formatting elements."
                    self.insert_marker();
                    // "Insert an HTML element for the token, then switch the
                    // insertion mode to "in caption"."
                    let _ = self.insert_element(token);
                    self.switch_mode(InsertionMode::InCaption);
                    true
                }

                // "A start tag whose tag name is "colgroup""
                "colgroup" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_element(token);
                    self.switch_mode(InsertionMode::InColumnGroup);
                    true
                }

                // "A start tag whose tag name is "col""
                // "Clear the stack back to a table context. Insert an HTML element
                // for a "colgroup" start tag token with no attributes, then switch
                // the insertion mode to "in column group"."
                // "Reprocess the current token."
                "col" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_element_named("colgroup");
                    self.switch_mode(InsertionMode::InColumnGroup);
                    self.process_token(token)
                }

                // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
                "tbody" | "tfoot" | "thead" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_element(token);
                    self.switch_mode(InsertionMode::InTableBody);
                    true
                }

                // "A start tag whose tag name is one of: "td", "th", "tr""
                // "Clear the stack back to a table context. Insert an HTML element
                // for a "tbody" start tag token with no attributes, then switch the
                // insertion mode to "in table body"."
                // "Reprocess the current token."
                "td" | "th" | "tr" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_element_named("tbody");
                    self.switch_mode(InsertionMode::InTableBody);
                    self.process_token(token)
                }

                // "A start tag whose tag name is "table""
                "table" => {
                    // "Parse error."
                    self.unexpected(token);
                    // "If the stack of open elements does not have a table element
                    // in table scope, ignore the token."
                    if !self.has_element_in_table_scope("table") {
                        return false;
                    }
                    // "Otherwise: Pop elements from this stack until a table element
                    // has been popped from the stack."
                    self.pop_until_named("table");
                    // "Reset the insertion mode appropriately."
                    self.reset_insertion_mode();
                    // "Reprocess the token."
                    self.process_token(token)
                }

                // "A start tag whose tag name is one of: "style", "script", "template""
                "style" | "script" | "template" => {
                    self.process_in_mode(InsertionMode::InHead, token)
                }

                // "A start tag whose tag name is "input""
                // "If the token does not have an attribute with the name "type", or
                // if it does, but that attribute's value is not an ASCII
                // case-insensitive match for the string "hidden", then: act as
                // described in the "anything else" entry below."
                // "Otherwise: Parse error. Insert an HTML element for the token.
                // Pop that input element off the stack of open elements.
                // Acknowledge the token's self-closing flag, if it is set."
                "input"
                    if token
                        .attribute("type")
                        .is_some_and(|value| value.eq_ignore_ascii_case("hidden")) =>
                {
                    self.unexpected(token);
                    let _ = self.insert_empty(token);
                    true
                }

                // "A start tag whose tag name is "form""
                "form" => {
                    // "Parse error."
                    self.unexpected(token);
                    // "If there is a template element on the stack of open elements,
                    // or if the form element pointer is not null, ignore the token."
                    if self.stack_contains("template") || self.form_element_pointer.is_some() {
                        return false;
                    }
                    // "Otherwise: Insert an HTML element for the token, and set the
                    // form element pointer to point to the element created."
                    // "Pop that form element off the stack of open elements."
                    let form = self.insert_element(token);
                    self.form_element_pointer = Some(form);
                    let _ = self.pop();
                    true
                }

                _ => self.in_table_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "table""
                "table" => {
                    // "If the stack of open elements does not have a table element
                    // in table scope, this is a parse error; ignore the token."
                    if !self.has_element_in_table_scope("table") {
                        self.unexpected(token);
                        return false;
                    }
                    self.pop_until_named("table");
                    self.reset_insertion_mode();
                    true
                }

                // "An end tag whose tag name is one of: "body", "caption", "col",
                // "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr""
                // "Parse error. Ignore the token."
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot"
                | "th" | "thead" | "tr" => {
                    self.unexpected(token);
                    false
                }

                // "An end tag whose tag name is "template""
                "template" => self.process_in_mode(InsertionMode::InHead, token),

                _ => self.in_table_anything_else(token),
            },

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion mode."
            Token::EndOfFile => self.process_in_mode(InsertionMode::InBody, token),

            Token::Character { .. } => self.in_table_anything_else(token),
        }
    }

    /// "Anything else" in the "in table" insertion mode.
    ///
    /// "Parse error. Enable foster parenting, process the token using the rules
    /// for the "in body" insertion mode, and then disable foster parenting."
    fn in_table_anything_else(&mut self, token: &Token) -> bool {
        self.unexpected(token);
        self.foster_parenting = true;
        let handled = self.process_in_mode(InsertionMode::InBody, token);
        self.foster_parenting = false;
        handled
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(crate) fn handle_in_table_text_mode(&mut self, token: &Token) -> bool {
        if let Token::Character { data } = token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            if data.contains('\0') {
                self.error("Unexpected null character in table text");
                self.pending_table_character_tokens
                    .push(data.replace('\0', ""));
            } else {
                // "Any other character token"
                // "Append the character token to the pending table character tokens list."
                self.pending_table_character_tokens.push(data.clone());
            }
            return true;
        }

        // "Anything else"
        self.flush_pending_table_text();
        // "Switch the insertion mode to the original insertion mode and
        // reprocess the token."
        self.switch_mode(self.original_insertion_mode);
        self.process_token(token)
    }

    /// "If any of the tokens in the pending table character tokens list are
    /// character tokens that are not ASCII whitespace, then this is a parse
    /// error: reprocess the character tokens in the pending table character
    /// tokens list using the rules given in the "anything else" entry in the
    /// "in table" insertion mode."
    /// "Otherwise, insert the characters given by the pending table character
    /// tokens list."
    fn flush_pending_table_text(&mut self) {
        let pending = std::mem::take(&mut self.pending_table_character_tokens).concat();
        if pending.is_empty() {
            return;
        }

        if is_all_whitespace(&pending) {
            self.insert_characters(&pending);
            return;
        }

        self.error("Non-whitespace text inside a table");
        self.foster_parenting = true;
        let _ = self.process_in_mode(InsertionMode::InBody, &Token::character(pending));
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(crate) fn handle_in_caption_mode(&mut self, token: &Token) -> bool {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag { name, .. } if name == "caption" => self.close_caption(token),

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "tbody", "td", "tfoot", "th", "thead", "tr""
            // "An end tag whose tag name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                self.close_caption(token) && self.process_token(token)
            }
            Token::EndTag { name, .. } if name == "table" => {
                self.close_caption(token) && self.process_token(token)
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            // "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                self.unexpected(token);
                false
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.process_in_mode(InsertionMode::InBody, token),
        }
    }

    /// Close the open caption, returning false if there is none.
    fn close_caption(&mut self, token: &Token) -> bool {
        // STEP 1: "If the stack of open elements does not have a caption element
        //          in table scope, this is a parse error; ignore the token.
        //          (fragment case)"
        if !self.has_element_in_table_scope("caption") {
            self.unexpected(token);
            return false;
        }
        // STEP 2: "Generate implied end tags."
        self.generate_implied_end_tags(None);
        // STEP 3: "Now, if the current node is not a caption element, then this
        //          is a parse error."
        if !self.current_node_is("caption") {
            self.error("Unclosed elements inside <caption>");
        }
        // STEP 4: "Pop elements from this stack until a caption element has
        //          been popped from the stack."
        self.pop_until_named("caption");
        // STEP 5: "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 6: "Switch the insertion mode to "in table"."
        self.switch_mode(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(crate) fn handle_in_column_group_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A
            // LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or
            // U+0020 SPACE"
            // "Insert the character."
            Token::Character { data } => {
                let (whitespace, rest) = split_leading_whitespace(data);
                self.insert_characters(whitespace);
                if rest.is_empty() {
                    return true;
                }
                self.in_column_group_anything_else(&Token::character(rest))
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
                // "A start tag whose tag name is "col""
                // "Insert an HTML element for the token. Immediately pop the
                // current node off the stack of open elements."
                // "Acknowledge the token's self-closing flag, if it is set."
                "col" => {
                    let _ = self.insert_empty(token);
                    true
                }
                "template" => self.process_in_mode(InsertionMode::InHead, token),
                _ => self.in_column_group_anything_else(token),
            },

            Token::EndTag { name, .. } => match name.as_str() {
                // "An end tag whose tag name is "colgroup""
                "colgroup" => {
                    // "If the current node is not a colgroup element, then this is
                    // a parse error; ignore the token."
                    if !self.current_node_is("colgroup") {
                        self.unexpected(token);
                        return false;
                    }
                    // "Otherwise, pop the current node from the stack of open
                    // elements. Switch the insertion mode to "in table"."
                    let _ = self.pop();
                    self.switch_mode(InsertionMode::InTable);
                    true
                }
                // "An end tag whose tag name is "col""
                // "Parse error. Ignore the token."
                "col" => {
                    self.unexpected(token);
                    false
                }
                "template" => self.process_in_mode(InsertionMode::InHead, token),
                _ => self.in_column_group_anything_else(token),
            },

            Token::EndOfFile => self.process_in_mode(InsertionMode::InBody, token),
        }
    }

    /// "Anything else" in the "in column group" insertion mode.
    fn in_column_group_anything_else(&mut self, token: &Token) -> bool {
        // "If the current node is not a colgroup element, then this is a parse
        // error; ignore the token."
        if !self.current_node_is("colgroup") {
            self.unexpected(token);
            return false;
        }
        // "Otherwise, pop the current node from the stack of open elements."
        // "Switch the insertion mode to "in table"."
        // "Reprocess the token."
        let _ = self.pop();
        self.switch_mode(InsertionMode::InTable);
        self.process_token(token)
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(crate) fn handle_in_table_body_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A start tag whose tag name is "tr""
            // "Clear the stack back to a table body context."
            // "Insert an HTML element for the token, then switch the insertion
            // mode to "in row"."
            Token::StartTag { name, .. } if name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_element(token);
                self.switch_mode(InsertionMode::InRow);
                true
            }

            // "A start tag whose tag name is one of: "th", "td""
            // "Parse error."
            // "Clear the stack back to a table body context."
            // "Insert an HTML element for a "tr" start tag token with no
            // attributes, then switch the insertion mode to "in row"."
            // "Reprocess the current token."
            Token::StartTag { name, .. } if CELLS.contains(&name.as_str()) => {
                self.unexpected(token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_element_named("tr");
                self.switch_mode(InsertionMode::InRow);
                self.process_token(token)
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                // "If the stack of open elements does not have an element in table
                // scope that is an HTML element with the same tag name as the
                // token, this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(name) {
                    self.unexpected(token);
                    return false;
                }
                // "Otherwise: Clear the stack back to a table body context."
                // "Pop the current node from the stack of open elements. Switch
                // the insertion mode to "in table"."
                self.clear_stack_back_to_table_body_context();
                let _ = self.pop();
                self.switch_mode(InsertionMode::InTable);
                true
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "tbody", "tfoot", "thead""
            // "An end tag whose tag name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.close_table_section(token)
            }
            Token::EndTag { name, .. } if name == "table" => self.close_table_section(token),

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.unexpected(token);
                false
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.process_in_mode(InsertionMode::InTable, token),
        }
    }

    /// Close the open table section and reprocess `token` in table mode.
    fn close_table_section(&mut self, token: &Token) -> bool {
        // "If the stack of open elements does not have a tbody, thead, or tfoot
        // element in table scope, this is a parse error; ignore the token."
        if !self.has_any_element_in_table_scope(TABLE_SECTIONS) {
            self.unexpected(token);
            return false;
        }
        // "Otherwise: Clear the stack back to a table body context."
        // "Pop the current node from the stack of open elements. Switch the
        // insertion mode to "in table"."
        // "Reprocess the token."
        self.clear_stack_back_to_table_body_context();
        let _ = self.pop();
        self.switch_mode(InsertionMode::InTable);
        self.process_token(token)
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(crate) fn handle_in_row_mode(&mut self, token: &Token) -> bool {
        match token {
            // "A start tag whose tag name is one of: "th", "td""
            // "Clear the stack back to a table row context."
            // "Insert an HTML element for the token, then switch the insertion
            // mode to "in cell"."
            // "Insert a marker at the end of the list of active formatting elements."
            Token::StartTag { name, .. } if CELLS.contains(&name.as_str()) => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_element(token);
                self.switch_mode(InsertionMode::InCell);
                self.insert_marker();
                true
            }

            // "An end tag whose tag name is "tr""
            Token::EndTag { name, .. } if name == "tr" => self.close_row(token),

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "tbody", "tfoot", "thead", "tr""
            // "An end tag whose tag name is "table""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                self.close_row(token) && self.process_token(token)
            }
            Token::EndTag { name, .. } if name == "table" => {
                self.close_row(token) && self.process_token(token)
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                // "If the stack of open elements does not have an element in table
                // scope that is an HTML element with the same tag name as the
                // token, this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(name) {
                    self.unexpected(token);
                    return false;
                }
                // "If the stack of open elements does not have a tr element in
                // table scope, ignore the token."
                if !self.has_element_in_table_scope("tr") {
                    return false;
                }
                self.close_row(token) && self.process_token(token)
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html", "td", "th""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.unexpected(token);
                false
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion mode."
            _ => self.process_in_mode(InsertionMode::InTable, token),
        }
    }

    /// Close the open row, returning false if there is none in table scope.
    fn close_row(&mut self, token: &Token) -> bool {
        // "If the stack of open elements does not have a tr element in table
        // scope, this is a parse error; ignore the token."
        if !self.has_element_in_table_scope("tr") {
            self.unexpected(token);
            return false;
        }
        // "Otherwise: Clear the stack back to a table row context."
        // "Pop the current node (which will be a tr element) from the stack of
        // open elements. Switch the insertion mode to "in table body"."
        self.clear_stack_back_to_table_row_context();
        let _ = self.pop();
        self.switch_mode(InsertionMode::InTableBody);
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(crate) fn handle_in_cell_mode(&mut self, token: &Token) -> bool {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name, .. } if CELLS.contains(&name.as_str()) => {
                // "If the stack of open elements does not have an element in table
                // scope that is an HTML element with the same tag name as that of
                // the token, then this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(name) {
                    self.unexpected(token);
                    return false;
                }
                // STEP 1: "Generate implied end tags."
                self.generate_implied_end_tags(None);
                // STEP 2: "Now, if the current node is not an HTML element with the
                //          same tag name as the token, then this is a parse error."
                if !self.current_node_is(name) {
                    self.error(format_args!("Unclosed elements inside <{name}>"));
                }
                // STEP 3: "Pop elements from the stack of open elements until an
                //          HTML element with the same tag name as the token has been
                //          popped from the stack."
                self.pop_until_named(name);
                // STEP 4: "Clear the list of active formatting elements up to the last marker."
                self.clear_active_formatting_elements_to_last_marker();
                // STEP 5: "Switch the insertion mode to "in row"."
                self.switch_mode(InsertionMode::InRow);
                true
            }

            // "A start tag whose tag name is one of: "caption", "col", "colgroup",
            // "tbody", "td", "tfoot", "th", "thead", "tr""
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                // "Assert: The stack of open elements has a td or th element in
                // table scope."
                if !self.has_any_element_in_table_scope(CELLS) {
                    self.unexpected(token);
                    return false;
                }
                // "Close the cell (see below) and reprocess the token."
                self.close_the_cell();
                self.process_token(token)
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            // "colgroup", "html""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.unexpected(token);
                false
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            // "thead", "tr""
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                // "If the stack of open elements does not have an element in table
                // scope that is an HTML element with the same tag name as that of
                // the token, then this is a parse error; ignore the token."
                if !self.has_element_in_table_scope(name) {
                    self.unexpected(token);
                    return false;
                }
                // "Otherwise, close the cell (see below) and reprocess the token."
                self.close_the_cell();
                self.process_token(token)
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion mode."
            _ => self.process_in_mode(InsertionMode::InBody, token),
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags(None);
        // STEP 2: "If the current node is not now a td element or a th element,
        //          then this is a parse error."
        if !self.current_node_is_one_of(CELLS) {
            self.error("Unclosed elements inside a table cell");
        }
        // STEP 3: "Pop elements from the stack of open elements until a td element
        //          or a th element has been popped from the stack."
        self.pop_until_one_of(CELLS);
        // STEP 4: "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.switch_mode(InsertionMode::InRow);
    }
}
