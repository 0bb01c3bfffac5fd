//! Integration tests for the input cursor and newline normalization.

use std::borrow::Cow;

use lark_html::tokenizer::{CharacterReader, normalize_newlines};

#[test]
fn test_normalize_newlines() {
    assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    assert_eq!(normalize_newlines("\r\r\n"), "\n\n");
}

#[test]
fn test_normalize_newlines_borrows_without_cr() {
    assert!(matches!(normalize_newlines("no carriage returns\n"), Cow::Borrowed(_)));
}

#[test]
fn test_reader_normalizes_input() {
    let mut reader = CharacterReader::new("a\r\nb");
    assert_eq!(reader.len(), 3);
    assert_eq!(reader.consume_to_any(&[]), "a\nb");
}

#[test]
fn test_consume_and_unconsume() {
    let mut reader = CharacterReader::new("ab");
    assert_eq!(reader.consume(), Some('a'));
    assert_eq!(reader.consume(), Some('b'));
    assert_eq!(reader.consume(), None);

    // Stepping back after EOF restores "before EOF", not the last character.
    reader.unconsume();
    assert_eq!(reader.pos(), 2);
    reader.unconsume();
    assert_eq!(reader.current(), Some('b'));
}

#[test]
fn test_unconsume_at_start_stays_at_start() {
    let mut reader = CharacterReader::new("x");
    reader.unconsume();
    assert_eq!(reader.pos(), 0);
    assert_eq!(reader.current(), Some('x'));
}

#[test]
fn test_consume_to_delimiters() {
    let mut reader = CharacterReader::new("name=value>rest");
    assert_eq!(reader.consume_to('='), "name");
    assert!(reader.match_consume("="));
    assert_eq!(reader.consume_to_any(&['>', ' ']), "value");
    assert!(reader.matches('>'));
    reader.advance();
    assert_eq!(reader.consume_to('#'), "rest");
    assert!(reader.is_empty());
}

#[test]
fn test_sequences() {
    let mut reader = CharacterReader::new("frac12;#x1F600;123abc");
    assert_eq!(reader.consume_letter_then_digit_sequence(), "frac12");
    assert!(reader.match_consume(";#"));
    assert!(reader.match_consume_ignore_case("X"));
    assert_eq!(reader.consume_hex_sequence(), "1F600");
    reader.advance();
    assert_eq!(reader.consume_digit_sequence(), "123");
    assert_eq!(reader.consume_letter_sequence(), "abc");
}

#[test]
fn test_mark_and_rewind() {
    let mut reader = CharacterReader::new("&notit;");
    reader.advance();
    reader.mark();
    assert_eq!(reader.consume_letter_sequence(), "notit");
    reader.rewind_to_mark();
    assert_eq!(reader.pos(), 1);
}

#[test]
fn test_matching_is_non_consuming() {
    let reader = CharacterReader::new("<!DOCTYPE html>");
    assert!(reader.matches('<'));
    assert!(reader.matches_str("<!DOC"));
    assert!(!reader.matches_str("<!doc"));
    assert!(reader.matches_ignore_case("<!doc"));
    assert!(reader.matches_any(&['>', '<']));
    assert!(!reader.matches_letter());
    assert_eq!(reader.pos(), 0);
}
