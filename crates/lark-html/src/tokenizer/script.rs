//! Script data escape states.
//!
//! [§ 13.2.5.15](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
//! through [§ 13.2.5.31](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state).
//!
//! These handle `<!--` inside `<script>`, where a nested `<script>` start tag
//! puts the tokenizer in the double escaped states and `</script>` is then not
//! an end tag until the escape closes.

use super::core::{HTMLTokenizer, TokenizerState};

impl HTMLTokenizer {
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn handle_script_data_less_than_sign_state(&mut self) {
        match self.reader.consume() {
            // "U+002F SOLIDUS (/) - Set the temporary buffer to the empty string.
            // Switch to the script data end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEndTagOpen);
            }
            // "U+0021 EXCLAMATION MARK (!) - Switch to the script data escape
            // start state. Emit a U+003C LESS-THAN SIGN character token and a
            // U+0021 EXCLAMATION MARK character token."
            Some('!') => {
                self.emit_str("<!");
                self.switch_to(TokenizerState::ScriptDataEscapeStart);
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptData);
            }
        }
    }

    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    pub(super) fn handle_script_data_escape_start_state(&mut self) {
        self.escape_start_dash(TokenizerState::ScriptDataEscapeStartDash);
    }

    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    pub(super) fn handle_script_data_escape_start_dash_state(&mut self) {
        self.escape_start_dash(TokenizerState::ScriptDataEscapedDashDash);
    }

    /// "U+002D HYPHEN-MINUS (-) - Switch to the next state. Emit a U+002D
    /// HYPHEN-MINUS character token."
    /// "Anything else - Reconsume in the script data state."
    fn escape_start_dash(&mut self, on_dash: TokenizerState) {
        if self.reader.matches('-') {
            self.emit_char('-');
            self.advance_transition(on_dash);
        } else {
            self.switch_to(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    pub(super) fn handle_script_data_escaped_state(&mut self) {
        match self.reader.current() {
            Some('-') => {
                self.emit_char('-');
                self.advance_transition(TokenizerState::ScriptDataEscapedDash);
            }
            Some('<') => self.advance_transition(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.error("Unexpected null character in script");
                self.reader.advance();
                self.emit_char('\u{FFFD}');
            }
            None => self.eof_in_script_comment(),
            Some(_) => {
                let run = self.reader.consume_to_any(&['-', '<', '\0']);
                self.emit_str(&run);
            }
        }
    }

    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    pub(super) fn handle_script_data_escaped_dash_state(&mut self) {
        match self.reader.consume() {
            Some('-') => {
                self.emit_char('-');
                self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
            }
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.error("Unexpected null character in script");
                self.emit_char('\u{FFFD}');
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
            None => self.eof_in_script_comment(),
            Some(c) => {
                self.emit_char(c);
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    pub(super) fn handle_script_data_escaped_dash_dash_state(&mut self) {
        match self.reader.consume() {
            Some('-') => self.emit_char('-'),
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            // "U+003E GREATER-THAN SIGN (>) - Switch to the script data state.
            // Emit a U+003E GREATER-THAN SIGN character token."
            Some('>') => {
                self.emit_char('>');
                self.switch_to(TokenizerState::ScriptData);
            }
            Some('\0') => {
                self.error("Unexpected null character in script");
                self.emit_char('\u{FFFD}');
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
            None => self.eof_in_script_comment(),
            Some(c) => {
                self.emit_char(c);
                self.switch_to(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_escaped_less_than_sign_state(&mut self) {
        match self.reader.consume() {
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEscapedEndTagOpen);
            }
            // "ASCII alpha - Set the temporary buffer to the empty string. Emit a
            // U+003C LESS-THAN SIGN character token. Reconsume in the script data
            // double escape start state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.clear();
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptDataDoubleEscapeStart);
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    pub(super) fn handle_script_data_double_escape_start_state(&mut self) {
        self.double_escape_boundary(
            TokenizerState::ScriptDataDoubleEscaped,
            TokenizerState::ScriptDataEscaped,
        );
    }

    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    pub(super) fn handle_script_data_double_escape_end_state(&mut self) {
        self.double_escape_boundary(
            TokenizerState::ScriptDataEscaped,
            TokenizerState::ScriptDataDoubleEscaped,
        );
    }

    /// The double escape start and end states read a tag name into the
    /// temporary buffer and, at its end, switch to `if_script` when the name
    /// was "script" and to `otherwise` when it was not.
    fn double_escape_boundary(&mut self, if_script: TokenizerState, otherwise: TokenizerState) {
        match self.reader.consume() {
            Some(c @ ('\t' | '\n' | '\x0C' | ' ' | '/' | '>')) => {
                let next = if self.temporary_buffer == "script" {
                    if_script
                } else {
                    otherwise
                };
                self.emit_char(c);
                self.switch_to(next);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.push(c.to_ascii_lowercase());
                self.emit_char(c);
            }
            // "Anything else - Reconsume in the script data (double) escaped state."
            _ => self.reconsume_in(otherwise),
        }
    }

    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    pub(super) fn handle_script_data_double_escaped_state(&mut self) {
        match self.reader.current() {
            Some('-') => {
                self.emit_char('-');
                self.advance_transition(TokenizerState::ScriptDataDoubleEscapedDash);
            }
            Some('<') => {
                self.emit_char('<');
                self.advance_transition(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('\0') => {
                self.error("Unexpected null character in script");
                self.reader.advance();
                self.emit_char('\u{FFFD}');
            }
            None => self.eof_in_script_comment(),
            Some(_) => {
                let run = self.reader.consume_to_any(&['-', '<', '\0']);
                self.emit_str(&run);
            }
        }
    }

    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_state(&mut self) {
        match self.reader.consume() {
            Some('-') => {
                self.emit_char('-');
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedDashDash);
            }
            Some('<') => {
                self.emit_char('<');
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('\0') => {
                self.error("Unexpected null character in script");
                self.emit_char('\u{FFFD}');
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
            }
            None => self.eof_in_script_comment(),
            Some(c) => {
                self.emit_char(c);
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
            }
        }
    }

    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_dash_state(&mut self) {
        match self.reader.consume() {
            Some('-') => self.emit_char('-'),
            Some('<') => {
                self.emit_char('<');
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
            }
            Some('>') => {
                self.emit_char('>');
                self.switch_to(TokenizerState::ScriptData);
            }
            Some('\0') => {
                self.error("Unexpected null character in script");
                self.emit_char('\u{FFFD}');
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
            }
            None => self.eof_in_script_comment(),
            Some(c) => {
                self.emit_char(c);
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
            }
        }
    }

    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_double_escaped_less_than_sign_state(&mut self) {
        if self.reader.matches('/') {
            self.temporary_buffer.clear();
            self.emit_char('/');
            self.advance_transition(TokenizerState::ScriptDataDoubleEscapeEnd);
        } else {
            self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
        }
    }

    /// "EOF - This is an eof-in-script-html-comment-like-text parse error.
    /// Emit an end-of-file token."
    fn eof_in_script_comment(&mut self) {
        self.error("EOF in script HTML comment-like text");
        self.switch_to(TokenizerState::Data);
        self.emit_eof();
    }
}
