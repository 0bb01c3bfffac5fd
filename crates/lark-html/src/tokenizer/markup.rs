//! Markup declaration states: comments, DOCTYPEs and CDATA sections.
//!
//! [§ 13.2.5.41](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
//! through [§ 13.2.5.71](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state).

use super::core::{HTMLTokenizer, TokenizerState};

impl HTMLTokenizer {
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "Two U+002D HYPHEN-MINUS characters (-) - Consume those two characters,
        // create a comment token whose data is the empty string, and switch to
        // the comment start state."
        if self.reader.match_consume("--") {
            self.comment.reset();
            self.switch_to(TokenizerState::CommentStart);
        }
        // "ASCII case-insensitive match for the word "DOCTYPE" - Consume those
        // characters and switch to the DOCTYPE state."
        else if self.reader.match_consume_ignore_case("DOCTYPE") {
            self.doctype.reset();
            self.switch_to(TokenizerState::DOCTYPE);
        }
        // "The string "[CDATA[" - Consume those characters. If there is an
        // adjusted current node and it is not an element in the HTML namespace,
        // then switch to the CDATA section state. Otherwise, this is a
        // cdata-in-html-content parse error. Create a comment token whose data
        // is the "[CDATA[" string. Switch to the bogus comment state."
        else if self.reader.match_consume("[CDATA[") {
            if self.allow_cdata {
                self.switch_to(TokenizerState::CDATASection);
            } else {
                self.error("CDATA in HTML content");
                self.create_bogus_comment();
                self.comment.data.push_str("[CDATA[");
            }
        }
        // "Anything else - This is an incorrectly-opened-comment parse error.
        // Create a comment token whose data is the empty string. Switch to the
        // bogus comment state (don't consume anything in the current state)."
        else {
            self.error("Incorrectly opened comment");
            self.create_bogus_comment();
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.reader.current() {
            Some('>') => {
                self.advance_transition(TokenizerState::Data);
                self.emit_comment();
            }
            None => self.eof_in_comment(),
            Some('\0') => {
                self.error("Unexpected null character in comment");
                self.reader.advance();
                self.comment.data.push('\u{FFFD}');
            }
            Some(_) => {
                let run = self.reader.consume_to_any(&['>', '\0']);
                self.comment.data.push_str(&run);
            }
        }
    }

    // =========================================================================
    // Comment states
    // =========================================================================

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.reader.consume() {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            // "U+003E GREATER-THAN SIGN (>) - This is an
            // abrupt-closing-of-empty-comment parse error. Switch to the data
            // state. Emit the current comment token."
            Some('>') => {
                self.error("Abrupt closing of empty comment");
                self.switch_to(TokenizerState::Data);
                self.emit_comment();
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.reader.consume() {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.error("Abrupt closing of empty comment");
                self.switch_to(TokenizerState::Data);
                self.emit_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.comment.data.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.reader.current() {
            Some('<') => {
                self.comment.data.push('<');
                self.advance_transition(TokenizerState::CommentLessThanSign);
            }
            Some('-') => self.advance_transition(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.error("Unexpected null character in comment");
                self.reader.advance();
                self.comment.data.push('\u{FFFD}');
            }
            None => self.eof_in_comment(),
            Some(_) => {
                let run = self.reader.consume_to_any(&['<', '-', '\0']);
                self.comment.data.push_str(&run);
            }
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.reader.consume() {
            Some('!') => {
                self.comment.data.push('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            Some('<') => self.comment.data.push('<'),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        if self.reader.matches('-') {
            self.advance_transition(TokenizerState::CommentLessThanSignBangDash);
        } else {
            self.switch_to(TokenizerState::Comment);
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        if self.reader.matches('-') {
            self.advance_transition(TokenizerState::CommentLessThanSignBangDashDash);
        } else {
            self.switch_to(TokenizerState::CommentEndDash);
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        // "U+003E GREATER-THAN SIGN (>), EOF - Reconsume in the comment end state."
        // "Anything else - This is a nested-comment parse error. Reconsume in the
        // comment end state."
        if !self.reader.matches('>') && !self.reader.is_empty() {
            self.error("Nested comment");
        }
        self.switch_to(TokenizerState::CommentEnd);
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.reader.consume() {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.comment.data.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.reader.consume() {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_comment();
            }
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            // "U+002D HYPHEN-MINUS (-) - Append a U+002D HYPHEN-MINUS character
            // (-) to the comment token's data."
            Some('-') => self.comment.data.push('-'),
            None => self.eof_in_comment(),
            Some(_) => {
                self.comment.data.push_str("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.reader.consume() {
            Some('-') => {
                self.comment.data.push_str("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an incorrectly-closed-comment
            // parse error. Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.error("Incorrectly closed comment");
                self.switch_to(TokenizerState::Data);
                self.emit_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.comment.data.push_str("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// "EOF - This is an eof-in-comment parse error. Emit the current comment
    /// token. Emit an end-of-file token."
    ///
    /// The bogus comment state has the same EOF behaviour without the error.
    fn eof_in_comment(&mut self) {
        if !self.comment.bogus {
            self.error("EOF in comment");
        }
        self.switch_to(TokenizerState::Data);
        self.emit_comment();
    }

    // =========================================================================
    // DOCTYPE states
    // =========================================================================

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => self.switch_to(TokenizerState::BeforeDOCTYPEName),
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            None => self.eof_in_doctype(),
            // "Anything else - This is a missing-whitespace-before-doctype-name
            // parse error. Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.error("Missing whitespace before DOCTYPE name");
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => {}
            Some('\0') => {
                self.error("Unexpected null character in DOCTYPE name");
                self.doctype.push_name('\u{FFFD}');
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-name parse
            // error. Create a new DOCTYPE token. Set its force-quirks flag to on.
            // Switch to the data state. Emit the current token."
            Some('>') => {
                self.error("Missing DOCTYPE name");
                self.doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                self.doctype.push_name(c.to_ascii_lowercase());
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => self.switch_to(TokenizerState::AfterDOCTYPEName),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            Some('\0') => {
                self.error("Unexpected null character in DOCTYPE name");
                self.doctype.push_name('\u{FFFD}');
            }
            None => self.eof_in_doctype(),
            Some(c) => self.doctype.push_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.reader.current() {
            Some('\t' | '\n' | '\x0C' | ' ') => self.reader.advance(),
            Some('>') => {
                self.advance_transition(TokenizerState::Data);
                self.emit_doctype();
            }
            None => self.eof_in_doctype(),
            // "If the six characters starting from the current input character
            // are an ASCII case-insensitive match for the word "PUBLIC", then
            // consume those characters and switch to the after DOCTYPE public
            // keyword state."
            Some(_) if self.reader.match_consume_ignore_case("PUBLIC") => {
                self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
            }
            Some(_) if self.reader.match_consume_ignore_case("SYSTEM") => {
                self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
            }
            // "Otherwise, this is an invalid-character-sequence-after-doctype-name
            // parse error. Set the current DOCTYPE token's force-quirks flag to on.
            // Reconsume in the bogus DOCTYPE state."
            Some(_) => {
                self.error("Invalid character sequence after DOCTYPE name");
                self.doctype.force_quirks = true;
                self.switch_to(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// and [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_keyword_state(&mut self, public: bool) {
        let keyword = if public { "public" } else { "system" };
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => {
                self.switch_to(if public {
                    TokenizerState::BeforeDOCTYPEPublicIdentifier
                } else {
                    TokenizerState::BeforeDOCTYPESystemIdentifier
                });
            }
            // "U+0022 QUOTATION MARK (") - This is a
            // missing-whitespace-after-doctype-public-keyword parse error. Set the
            // current DOCTYPE token's public identifier to the empty string (not
            // missing), then switch to the DOCTYPE public identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.error(format_args!("Missing whitespace after DOCTYPE {keyword} keyword"));
                self.begin_doctype_identifier(public, quote);
            }
            Some('>') => {
                self.error(format_args!("Missing DOCTYPE {keyword} identifier"));
                self.doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.error(format_args!("Missing quote before DOCTYPE {keyword} identifier"));
                self.doctype.force_quirks = true;
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// and [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_identifier_state(&mut self, public: bool) {
        let keyword = if public { "public" } else { "system" };
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => {}
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(public, quote),
            Some('>') => {
                self.error(format_args!("Missing DOCTYPE {keyword} identifier"));
                self.doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.error(format_args!("Missing quote before DOCTYPE {keyword} identifier"));
                self.doctype.force_quirks = true;
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.59](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// through [§ 13.2.5.66](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state):
    /// the four quoted identifier states.
    pub(super) fn handle_doctype_identifier_quoted_state(&mut self, public: bool, quote: char) {
        let keyword = if public { "public" } else { "system" };
        match self.reader.consume() {
            Some(c) if c == quote => {
                self.switch_to(if public {
                    TokenizerState::AfterDOCTYPEPublicIdentifier
                } else {
                    TokenizerState::AfterDOCTYPESystemIdentifier
                });
            }
            Some('\0') => {
                self.error("Unexpected null character in DOCTYPE identifier");
                self.doctype_identifier(public).push('\u{FFFD}');
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an
            // abrupt-doctype-public-identifier parse error. Set the current DOCTYPE
            // token's force-quirks flag to on. Switch to the data state. Emit the
            // current DOCTYPE token."
            Some('>') => {
                self.error(format_args!("Abrupt DOCTYPE {keyword} identifier"));
                self.doctype.force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => self.doctype_identifier(public).push(c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            Some(quote @ ('"' | '\'')) => {
                self.error("Missing whitespace between DOCTYPE public and system identifiers");
                self.begin_doctype_identifier(false, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => {
                self.error("Missing quote before DOCTYPE system identifier");
                self.doctype.force_quirks = true;
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_identifiers_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(false, quote),
            None => self.eof_in_doctype(),
            Some(_) => {
                self.error("Missing quote before DOCTYPE system identifier");
                self.doctype.force_quirks = true;
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            None => self.eof_in_doctype(),
            // "Anything else - This is an
            // unexpected-character-after-doctype-system-identifier parse error.
            // Reconsume in the bogus DOCTYPE state. (This does not set the
            // current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.error("Unexpected character after DOCTYPE system identifier");
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.reader.consume() {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            Some('\0') => self.error("Unexpected null character in DOCTYPE"),
            // "EOF - Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype();
            }
            Some(_) => {}
        }
    }

    /// Set the public or system identifier to the empty string and switch to
    /// the matching quoted identifier state.
    fn begin_doctype_identifier(&mut self, public: bool, quote: char) {
        self.doctype_identifier(public).clear();
        let state = match (public, quote) {
            (true, '"') => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            (true, _) => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            (false, '"') => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
            (false, _) => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        };
        self.switch_to(state);
    }

    /// The identifier being filled in, created as the empty string if missing.
    fn doctype_identifier(&mut self, public: bool) -> &mut String {
        let slot = if public {
            &mut self.doctype.public_identifier
        } else {
            &mut self.doctype.system_identifier
        };
        slot.get_or_insert_with(String::new)
    }

    /// "EOF - This is an eof-in-doctype parse error. Set the current DOCTYPE
    /// token's force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.error("EOF in DOCTYPE");
        self.doctype.force_quirks = true;
        self.switch_to(TokenizerState::Data);
        self.emit_doctype();
    }

    // =========================================================================
    // CDATA states
    // =========================================================================

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    pub(super) fn handle_cdata_section_state(&mut self) {
        match self.reader.current() {
            Some(']') => self.advance_transition(TokenizerState::CDATASectionBracket),
            // "EOF - This is an eof-in-cdata parse error. Emit an end-of-file token."
            None => {
                self.error("EOF in CDATA section");
                self.switch_to(TokenizerState::Data);
                self.emit_eof();
            }
            // "U+0000 NULL characters are handled in the tree construction stage."
            Some(_) => {
                let run = self.reader.consume_to(']');
                self.emit_str(&run);
            }
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(super) fn handle_cdata_section_bracket_state(&mut self) {
        if self.reader.matches(']') {
            self.advance_transition(TokenizerState::CDATASectionEnd);
        } else {
            self.emit_char(']');
            self.switch_to(TokenizerState::CDATASection);
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(super) fn handle_cdata_section_end_state(&mut self) {
        match self.reader.current() {
            Some(']') => {
                self.reader.advance();
                self.emit_char(']');
            }
            Some('>') => self.advance_transition(TokenizerState::Data),
            _ => {
                self.emit_str("]]");
                self.switch_to(TokenizerState::CDATASection);
            }
        }
    }
}
