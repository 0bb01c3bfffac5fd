//! Character reference decoding for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! The character reference states of the standard are collapsed into a single
//! call. The caller has already consumed the `&`; on success the decoded text
//! is returned and the reference consumed, on failure the reader is left just
//! after the `&` so the caller can emit it literally.

use super::core::HTMLTokenizer;
use super::named_character_references::lookup_entity;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: [(u32, char); 27] = [
    (0x80, '\u{20AC}'), // EURO SIGN
    (0x82, '\u{201A}'), // SINGLE LOW-9 QUOTATION MARK
    (0x83, '\u{0192}'), // LATIN SMALL LETTER F WITH HOOK
    (0x84, '\u{201E}'), // DOUBLE LOW-9 QUOTATION MARK
    (0x85, '\u{2026}'), // HORIZONTAL ELLIPSIS
    (0x86, '\u{2020}'), // DAGGER
    (0x87, '\u{2021}'), // DOUBLE DAGGER
    (0x88, '\u{02C6}'), // MODIFIER LETTER CIRCUMFLEX ACCENT
    (0x89, '\u{2030}'), // PER MILLE SIGN
    (0x8A, '\u{0160}'), // LATIN CAPITAL LETTER S WITH CARON
    (0x8B, '\u{2039}'), // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
    (0x8C, '\u{0152}'), // LATIN CAPITAL LIGATURE OE
    (0x8E, '\u{017D}'), // LATIN CAPITAL LETTER Z WITH CARON
    (0x91, '\u{2018}'), // LEFT SINGLE QUOTATION MARK
    (0x92, '\u{2019}'), // RIGHT SINGLE QUOTATION MARK
    (0x93, '\u{201C}'), // LEFT DOUBLE QUOTATION MARK
    (0x94, '\u{201D}'), // RIGHT DOUBLE QUOTATION MARK
    (0x95, '\u{2022}'), // BULLET
    (0x96, '\u{2013}'), // EN DASH
    (0x97, '\u{2014}'), // EM DASH
    (0x98, '\u{02DC}'), // SMALL TILDE
    (0x99, '\u{2122}'), // TRADE MARK SIGN
    (0x9A, '\u{0161}'), // LATIN SMALL LETTER S WITH CARON
    (0x9B, '\u{203A}'), // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
    (0x9C, '\u{0153}'), // LATIN SMALL LIGATURE OE
    (0x9E, '\u{017E}'), // LATIN SMALL LETTER Z WITH CARON
    (0x9F, '\u{0178}'), // LATIN CAPITAL LETTER Y WITH DIAERESIS
];

/// [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Map a numeric character reference's code to the character it produces,
/// along with the parse error the code triggers, if any.
#[must_use]
pub fn resolve_numeric_reference(code: Option<u32>) -> (char, Option<&'static str>) {
    let Some(code) = code else {
        return ('\u{FFFD}', Some("Character reference outside unicode range"));
    };
    match code {
        // "If the number is 0x00, then this is a null-character-reference parse error."
        0 => ('\u{FFFD}', Some("Null character reference")),
        // "If the number is greater than 0x10FFFF, then this is a
        // character-reference-outside-unicode-range parse error."
        c if c > 0x0010_FFFF => ('\u{FFFD}', Some("Character reference outside unicode range")),
        // "If the number is a surrogate, then this is a surrogate-character-reference parse error."
        0xD800..=0xDFFF => ('\u{FFFD}', Some("Surrogate character reference")),
        0x80..=0x9F => C1_REPLACEMENTS
            .iter()
            .find(|(from, _)| *from == code)
            .map_or_else(
                || (char::from_u32(code).unwrap_or('\u{FFFD}'), Some("Control character reference")),
                |&(_, to)| (to, Some("Control character reference")),
            ),
        c => {
            let decoded = char::from_u32(c).unwrap_or('\u{FFFD}');
            // "If the number is a noncharacter, then this is a
            // noncharacter-character-reference parse error."
            let error = if (0xFDD0..=0xFDEF).contains(&c) || (c & 0xFFFE) == 0xFFFE {
                Some("Noncharacter character reference")
            } else if c == 0x0D || (c < 0x20 && !matches!(c, 0x09 | 0x0A | 0x0C)) || (0x7F..=0x9F).contains(&c) {
                Some("Control character reference")
            } else {
                None
            };
            (decoded, error)
        }
    }
}

impl HTMLTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Decode the reference following an already-consumed `&`.
    ///
    /// `additional_allowed` is the quote (or `>` for unquoted values) that
    /// ends the attribute value being read; seeing it right after the `&`
    /// means there is no reference. `in_attribute` enables the historical
    /// rule that leaves `&amp=` and `&notit` alone inside attribute values.
    ///
    /// Returns `None` when nothing was decoded; the reader is then positioned
    /// right after the `&`.
    pub(crate) fn consume_character_reference(
        &mut self,
        additional_allowed: Option<char>,
        in_attribute: bool,
    ) -> Option<String> {
        let next = self.reader.current()?;
        if Some(next) == additional_allowed || matches!(next, '\t' | '\n' | '\x0C' | ' ' | '<' | '&') {
            return None;
        }

        self.reader.mark();
        if self.reader.match_consume("#") {
            return self.consume_numeric_character_reference();
        }
        self.consume_named_character_reference(in_attribute)
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    fn consume_numeric_character_reference(&mut self) -> Option<String> {
        // "U+0078 LATIN SMALL LETTER X, U+0058 LATIN CAPITAL LETTER X - Append
        // the current input character to the temporary buffer. Switch to the
        // hexadecimal character reference start state."
        let hex = self.reader.match_consume_ignore_case("x");
        let digits = if hex {
            self.reader.consume_hex_sequence()
        } else {
            self.reader.consume_digit_sequence()
        };

        // "Anything else - This is an absence-of-digits-in-numeric-character-reference
        // parse error. Flush code points consumed as a character reference."
        if digits.is_empty() {
            self.error("Absence of digits in numeric character reference");
            self.reader.rewind_to_mark();
            return None;
        }

        // "U+003B SEMICOLON - Switch to the numeric character reference end state."
        // "Anything else - This is a missing-semicolon-after-character-reference parse error."
        if !self.reader.match_consume(";") {
            self.error("Missing semicolon after character reference");
        }

        let code = u32::from_str_radix(&digits, if hex { 16 } else { 10 }).ok();
        let (decoded, error) = resolve_numeric_reference(code);
        if let Some(message) = error {
            self.error(message);
        }
        Some(decoded.to_string())
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the named character references
    /// table."
    fn consume_named_character_reference(&mut self, in_attribute: bool) -> Option<String> {
        let name = self.reader.consume_letter_then_digit_sequence();
        if name.is_empty() {
            self.reader.rewind_to_mark();
            return None;
        }
        let followed_by_semicolon = self.reader.matches(';');

        if followed_by_semicolon && let Some(value) = lookup_entity(&format!("{name};")) {
            self.reader.advance();
            return Some(value.to_string());
        }

        // Legacy references may appear without the semicolon and as a prefix
        // of a longer run, as in `&notit`. Shrink until one matches.
        let chars: Vec<char> = name.chars().collect();
        let mut matched = None;
        for len in (1..=chars.len()).rev() {
            let candidate: String = chars[..len].iter().collect();
            if let Some(value) = lookup_entity(&candidate) {
                matched = Some(value);
                break;
            }
            self.reader.unconsume();
        }

        let Some(value) = matched else {
            // [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
            // "U+003B SEMICOLON (;) - This is an unknown-named-character-reference parse error."
            if followed_by_semicolon {
                self.error(format_args!("Unknown named character reference &{name};"));
            }
            self.reader.rewind_to_mark();
            return None;
        };

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;),
        // and the next input character is either a U+003D EQUALS SIGN character
        // (=) or an ASCII alphanumeric, then, for historical reasons, flush code
        // points consumed as a character reference and switch to the return state."
        // `-` and `_` are treated the same way, so `&copy-2` in a URL survives.
        if in_attribute
            && (self.reader.matches_any(&['=', '-', '_'])
                || self.reader.current().is_some_and(|c| c.is_ascii_alphanumeric()))
        {
            self.reader.rewind_to_mark();
            return None;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;),
        // then this is a missing-semicolon-after-character-reference parse error."
        self.error("Missing semicolon after character reference");
        Some(value.to_string())
    }
}
