use std::borrow::Cow;

/// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
///
/// "Before the tokenization stage, the input stream must be preprocessed by
/// normalizing newlines. Thus, newlines in HTML DOMs are represented by U+000A
/// LF characters, and there are never any U+000D CR characters in the input
/// to the tokenization stage."
///
/// Replaces every CR LF pair with a single LF, then every remaining CR with
/// LF. Borrows the input when it contains no CR at all.
#[must_use]
pub fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
}

/// A cursor over the normalized input text.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
/// "The next input character is the first character in the input stream that
/// has not yet been consumed."
///
/// All operations move the cursor only. None of them fail: reading past the
/// end yields `None` (the EOF marker) or an empty string. The position always
/// stays within `0..=len`.
#[derive(Debug, Clone)]
pub struct CharacterReader {
    input: Vec<char>,
    pos: usize,
    mark: usize,
    /// Set when the last `consume` hit EOF, so a following `unconsume`
    /// restores "before EOF" rather than stepping back over a real character.
    consumed_eof: bool,
}

impl CharacterReader {
    /// Create a reader over `input`, normalizing newlines once up front.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: normalize_newlines(input).chars().collect(),
            pos: 0,
            mark: 0,
            consumed_eof: false,
        }
    }

    /// Current cursor position, in characters.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Total number of characters in the normalized input.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.input.len()
    }

    /// True when every character has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The next input character without consuming it.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    /// Consume and return the next input character, or `None` at EOF.
    pub fn consume(&mut self) -> Option<char> {
        match self.input.get(self.pos).copied() {
            Some(c) => {
                self.pos += 1;
                self.consumed_eof = false;
                Some(c)
            }
            None => {
                self.consumed_eof = true;
                None
            }
        }
    }

    /// Step back over the last consumed character.
    pub fn unconsume(&mut self) {
        if self.consumed_eof {
            self.consumed_eof = false;
        } else {
            self.pos = self.pos.saturating_sub(1);
        }
    }

    /// Skip the next character.
    pub fn advance(&mut self) {
        self.consumed_eof = false;
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    /// Remember the current position for [`Self::rewind_to_mark`].
    pub const fn mark(&mut self) {
        self.mark = self.pos;
    }

    /// Return to the last marked position.
    pub const fn rewind_to_mark(&mut self) {
        self.pos = self.mark;
        self.consumed_eof = false;
    }

    fn take_while(&mut self, mut keep: impl FnMut(char) -> bool) -> String {
        self.consumed_eof = false;
        let start = self.pos;
        while self.pos < self.input.len() && keep(self.input[self.pos]) {
            self.pos += 1;
        }
        self.input[start..self.pos].iter().collect()
    }

    /// Consume up to (not including) `delimiter`, or to the end.
    pub fn consume_to(&mut self, delimiter: char) -> String {
        self.take_while(|c| c != delimiter)
    }

    /// Consume up to (not including) the first of any `delimiters`.
    pub fn consume_to_any(&mut self, delimiters: &[char]) -> String {
        self.take_while(|c| !delimiters.contains(&c))
    }

    /// Consume a run of ASCII letters.
    pub fn consume_letter_sequence(&mut self) -> String {
        self.take_while(|c| c.is_ascii_alphabetic())
    }

    /// Consume a run of ASCII letters followed by a run of ASCII digits.
    pub fn consume_letter_then_digit_sequence(&mut self) -> String {
        let mut out = self.consume_letter_sequence();
        out.push_str(&self.consume_digit_sequence());
        out
    }

    /// Consume a run of ASCII hex digits.
    pub fn consume_hex_sequence(&mut self) -> String {
        self.take_while(|c| c.is_ascii_hexdigit())
    }

    /// Consume a run of ASCII decimal digits.
    pub fn consume_digit_sequence(&mut self) -> String {
        self.take_while(|c| c.is_ascii_digit())
    }

    /// True if the next character is `c`.
    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        self.current() == Some(c)
    }

    fn remaining_starts_with(&self, seq: &str, ignore_case: bool) -> bool {
        let mut pos = self.pos;
        for expected in seq.chars() {
            let Some(&actual) = self.input.get(pos) else {
                return false;
            };
            let same = if ignore_case {
                actual.eq_ignore_ascii_case(&expected)
            } else {
                actual == expected
            };
            if !same {
                return false;
            }
            pos += 1;
        }
        true
    }

    /// True if the remaining input starts with `seq`.
    #[must_use]
    pub fn matches_str(&self, seq: &str) -> bool {
        self.remaining_starts_with(seq, false)
    }

    /// True if the remaining input starts with `seq`, ignoring ASCII case.
    #[must_use]
    pub fn matches_ignore_case(&self, seq: &str) -> bool {
        self.remaining_starts_with(seq, true)
    }

    /// True if the next character is one of `chars`.
    #[must_use]
    pub fn matches_any(&self, chars: &[char]) -> bool {
        self.current().is_some_and(|c| chars.contains(&c))
    }

    /// True if the next character is an ASCII letter.
    #[must_use]
    pub fn matches_letter(&self) -> bool {
        self.current().is_some_and(|c| c.is_ascii_alphabetic())
    }

    /// Consume `seq` if the remaining input starts with it.
    pub fn match_consume(&mut self, seq: &str) -> bool {
        if self.matches_str(seq) {
            self.pos += seq.chars().count();
            self.consumed_eof = false;
            true
        } else {
            false
        }
    }

    /// Consume `seq` if the remaining input starts with it, ignoring ASCII case.
    pub fn match_consume_ignore_case(&mut self, seq: &str) -> bool {
        if self.matches_ignore_case(seq) {
            self.pos += seq.chars().count();
            self.consumed_eof = false;
            true
        } else {
            false
        }
    }
}
