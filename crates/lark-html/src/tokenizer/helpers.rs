//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! state transitions ("Switch to", "Reconsume in"), token emission ("Emit the
//! current token") and the shared bits of tag construction.

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::{TagKind, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed by
    /// that state's handler.
    pub(super) fn switch_to(&mut self, new_state: TokenizerState) {
        if self.state != new_state {
            log::trace!(target: "lark_html::tokenizer", "{} -> {}", self.state, new_state);
        }
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Steps back over the character just consumed and switches state, so the
    /// same character is processed again by the new state.
    pub(super) fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reader.unconsume();
        self.switch_to(new_state);
    }

    /// Consume the character that was only peeked at, then switch state.
    pub(super) fn advance_transition(&mut self, new_state: TokenizerState) {
        self.reader.advance();
        self.switch_to(new_state);
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-end-tag-token)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        self.tag.kind() == TagKind::End
            && self
                .last_start_tag_name
                .as_deref()
                .is_some_and(|last| last == self.tag.name())
    }
}

// =============================================================================
// Token Construction Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_attribute(&mut self) {
        if self.tag.new_attribute() {
            self.error("Duplicate attribute");
        }
    }

    /// "Create a comment token whose data is the empty string. Reconsume in
    /// the bogus comment state."
    ///
    /// Callers only peek at the offending character, so switching is enough.
    pub(super) fn create_bogus_comment(&mut self) {
        self.comment.reset();
        self.comment.bogus = true;
        self.switch_to(TokenizerState::BogusComment);
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Queue a completed token. [`HTMLTokenizer::read`] returns it once any
    /// buffered characters have been handed out.
    pub(super) fn emit(&mut self, token: Token) {
        debug_assert!(
            self.emit_pending.is_none(),
            "a token is already pending: {:?}",
            self.emit_pending
        );
        self.emit_pending = Some(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_char(&mut self, c: char) {
        self.char_buffer.push(c);
    }

    /// Emit a run of characters.
    pub(super) fn emit_str(&mut self, s: &str) {
        self.char_buffer.push_str(s);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof(&mut self) {
        self.emit(Token::EndOfFile);
    }

    /// "Emit the current tag token."
    ///
    /// [§ 13.2.5.8](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    /// "When an end tag token is emitted with attributes, that is an
    /// end-tag-with-attributes parse error. When an end tag token is emitted
    /// with its self-closing flag set, that is an end-tag-with-trailing-solidus
    /// parse error."
    pub(super) fn emit_tag(&mut self) {
        let (token, duplicate) = self.tag.finish();
        if duplicate {
            self.error("Duplicate attribute");
        }
        match &token {
            Token::StartTag { name, .. } => {
                self.last_start_tag_name = Some(name.clone());
            }
            Token::EndTag {
                self_closing,
                attributes,
                ..
            } => {
                if !attributes.is_empty() {
                    self.error("Attributes incorrectly present on end tag");
                }
                if *self_closing {
                    self.error("End tag with trailing solidus");
                }
            }
            _ => {}
        }
        self.emit(token);
    }

    /// "Emit the current comment token."
    pub(super) fn emit_comment(&mut self) {
        let token = self.comment.finish();
        self.emit(token);
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_doctype(&mut self) {
        let token = self.doctype.finish();
        self.emit(token);
    }
}
