//! Integration tests for the HTML tokenizer.

use lark_html::{
    Attribute, HTMLTokenizer, HtmlError, ParseErrorList, ParserSettings, Token, TokenizerState,
};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HTMLTokenizer::new(input).run()
}

/// Helper to concatenate the data of every character token
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character { data } => Some(data.as_str()),
            _ => None,
        })
        .collect()
}

/// Helper to tokenize with error tracking and return the error messages
fn tokenize_errors(input: &str) -> Vec<String> {
    let mut tokenizer = HTMLTokenizer::with_errors(input, ParseErrorList::tracking(100));
    loop {
        let token = tokenizer.read();
        tokenizer.acknowledge_self_closing_flag();
        if token.is_eof() {
            break;
        }
    }
    tokenizer
        .take_errors()
        .into_vec()
        .into_iter()
        .map(|error| error.message)
        .collect()
}

#[test]
fn test_plain_text_is_one_token() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], Token::character("Hello"));
    assert!(tokens[1].is_eof());
}

#[test]
fn test_empty_input() {
    let tokens = tokenize("");
    assert_eq!(tokens, vec![Token::EndOfFile]);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert!(name.is_none());
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag_with_attributes() {
    let tokens = tokenize(r#"<a href="x" id=y class='z' hidden>"#);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "a");
            assert!(!self_closing);
            assert_eq!(
                attributes,
                &vec![
                    Attribute::new("href".to_string(), "x".to_string()),
                    Attribute::new("id".to_string(), "y".to_string()),
                    Attribute::new("class".to_string(), "z".to_string()),
                    Attribute::new("hidden".to_string(), String::new()),
                ]
            );
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_names_are_lowercased_but_values_are_not() {
    let tokens = tokenize("<DIV CLASS=Main>");
    assert!(tokens[0].is_start_tag_named("div"));
    assert_eq!(tokens[0].attribute("class"), Some("Main"));
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokenize("<p id=a id=b>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].value, "a");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(tokenize_errors("<p id=a id=b>").contains(&"Duplicate attribute".to_string()));
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    assert!(tokens[0].is_end_tag_named("div"));
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert!(tokens[0].is_start_tag_named("br"));
    assert!(tokens[0].is_self_closing());
}

#[test]
fn test_text_between_tags() {
    let tokens = tokenize("<p>Hello <b>world</b></p>");
    let names: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(names.len(), 7);
    assert_eq!(tokens[1], Token::character("Hello "));
    assert_eq!(tokens[3], Token::character("world"));
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hi -->");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: " hi ".to_string(),
            bogus: false,
        }
    );
}

#[test]
fn test_question_mark_opens_bogus_comment() {
    let tokens = tokenize(r#"<?xml version="1.0"?>"#);
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: r#"?xml version="1.0"?"#.to_string(),
            bogus: true,
        }
    );
}

#[test]
fn test_cdata_in_html_content_is_bogus_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "[CDATA[x]]".to_string(),
            bogus: true,
        }
    );
}

#[test]
fn test_cdata_section_when_allowed() {
    let mut tokenizer = HTMLTokenizer::new("<![CDATA[<b>&amp;</b>]]>after");
    tokenizer.set_allow_cdata(true);
    let first = tokenizer.read();
    let second = tokenizer.read();
    let text = text_of(&[first, second]);
    assert!(text.starts_with("<b>&amp;</b>"));
}

#[test]
fn test_character_references_in_data() {
    assert_eq!(text_of(&tokenize("a &amp; b")), "a & b");
    assert_eq!(text_of(&tokenize("&lt;&gt;")), "<>");
    assert_eq!(text_of(&tokenize("&#65;&#x42;")), "AB");
    assert_eq!(text_of(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
}

#[test]
fn test_legacy_reference_prefix() {
    assert_eq!(text_of(&tokenize("&notit;")), "\u{00AC}it;");
    assert_eq!(text_of(&tokenize("&copy 2024")), "\u{00A9} 2024");
}

#[test]
fn test_unknown_reference_is_left_alone() {
    assert_eq!(text_of(&tokenize("&bogus; &")), "&bogus; &");
}

#[test]
fn test_character_references_in_attribute_values() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2&copy=3" title="&lt;x&gt;">"#);
    assert_eq!(tokens[0].attribute("href"), Some("?a=1&b=2&copy=3"));
    assert_eq!(tokens[0].attribute("title"), Some("<x>"));
}

#[test]
fn test_standalone_tokenizer_does_not_switch_to_rcdata() {
    let tokens = tokenize("<title><b></title>");
    assert!(tokens[1].is_start_tag_named("b"));
}

#[test]
fn test_rcdata_state_set_by_caller() {
    let mut tokenizer = HTMLTokenizer::new("<title><b>&amp;</title>");
    let title = tokenizer.read();
    assert!(title.is_start_tag_named("title"));
    tokenizer.transition(TokenizerState::RCDATA);

    assert_eq!(tokenizer.read(), Token::character("<b>&"));
    assert!(tokenizer.read().is_end_tag_named("title"));
}

#[test]
fn test_rawtext_ignores_references() {
    let mut tokenizer = HTMLTokenizer::new("<style>a &amp; b</style>");
    let _ = tokenizer.read();
    tokenizer.transition(TokenizerState::RAWTEXT);
    assert_eq!(tokenizer.read(), Token::character("a &amp; b"));
    assert!(tokenizer.read().is_end_tag_named("style"));
}

#[test]
fn test_script_data_escapes() {
    let mut tokenizer = HTMLTokenizer::new("<script><!-- </b> --></script>");
    let _ = tokenizer.read();
    tokenizer.transition(TokenizerState::ScriptData);
    assert_eq!(tokenizer.read(), Token::character("<!-- </b> -->"));
    assert!(tokenizer.read().is_end_tag_named("script"));
}

#[test]
fn test_plaintext_consumes_everything() {
    let mut tokenizer = HTMLTokenizer::new("<plaintext></plaintext><p>");
    let _ = tokenizer.read();
    tokenizer.transition(TokenizerState::PLAINTEXT);
    assert_eq!(tokenizer.read(), Token::character("</plaintext><p>"));
    assert!(tokenizer.read().is_eof());
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize(r#"<p id="foo"#);
    assert_eq!(tokens, vec![Token::EndOfFile]);
}

#[test]
fn test_no_errors_without_tracking() {
    let mut tokenizer = HTMLTokenizer::new("<p id=a id=b>&bogus;");
    while !tokenizer.read().is_eof() {
        tokenizer.acknowledge_self_closing_flag();
    }
    assert!(tokenizer.errors().is_empty());
}

#[test]
fn test_error_list_is_bounded() {
    let mut tokenizer = HTMLTokenizer::with_errors("<p id=a id=b id=c>&#0;&#0;", ParseErrorList::tracking(2));
    while !tokenizer.read().is_eof() {}
    assert_eq!(tokenizer.errors().len(), 2);
}

#[test]
fn test_error_positions_are_offsets() {
    let mut tokenizer = HTMLTokenizer::with_errors("abc&#0;", ParseErrorList::tracking(10));
    while !tokenizer.read().is_eof() {}
    let errors = tokenizer.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].position >= 3);
    assert!(errors[0].position <= 7);
}

// ========== tokenizing against a context element ==========

fn has_start_tag(tokens: &[Token]) -> bool {
    tokens.iter().any(|token| matches!(token, Token::StartTag { .. }))
}

#[test]
fn test_tokenize_without_context_starts_in_data() {
    let stream = lark_html::tokenize("a<b>c", None, &ParserSettings::default()).unwrap();
    assert!(has_start_tag(&stream.tokens));
    assert_eq!(stream.tokens.last(), Some(&Token::EndOfFile));
}

#[test]
fn test_tokenize_textarea_context_is_rcdata() {
    let stream =
        lark_html::tokenize("a<b>&amp;</TEXTAREA>c", Some("TextArea"), &ParserSettings::default())
            .unwrap();
    assert!(!has_start_tag(&stream.tokens));
    assert!(
        stream
            .tokens
            .iter()
            .any(|token| matches!(token, Token::EndTag { name, .. } if name == "textarea"))
    );
    assert_eq!(text_of(&stream.tokens), "a<b>&c");
}

#[test]
fn test_tokenize_script_context_is_script_data() {
    let stream =
        lark_html::tokenize("<p>&amp;</script>", Some("script"), &ParserSettings::default())
            .unwrap();
    assert!(!has_start_tag(&stream.tokens));
    assert_eq!(text_of(&stream.tokens), "<p>&amp;");
}

#[test]
fn test_tokenize_noscript_context_follows_scripting() {
    let scripted = ParserSettings::default().with_scripting(true);
    let stream = lark_html::tokenize("<b>", Some("noscript"), &scripted).unwrap();
    assert!(!has_start_tag(&stream.tokens));

    let stream = lark_html::tokenize("<b>", Some("noscript"), &ParserSettings::default()).unwrap();
    assert!(has_start_tag(&stream.tokens));
}

#[test]
fn test_tokenize_foreign_context_allows_cdata() {
    let stream =
        lark_html::tokenize("<![CDATA[x<y]]>", Some("svg"), &ParserSettings::default()).unwrap();
    assert_eq!(text_of(&stream.tokens), "x<y");
    assert!(!stream.tokens.iter().any(|token| matches!(token, Token::Comment { .. })));
}

#[test]
fn test_tokenize_honors_error_limit() {
    let stream = lark_html::tokenize("&#0;&#0;&#0;", None, &ParserSettings::default()).unwrap();
    assert!(stream.errors.is_empty());

    let settings = ParserSettings::default().with_max_errors(2);
    let stream = lark_html::tokenize("&#0;&#0;&#0;", None, &settings).unwrap();
    assert_eq!(stream.errors.len(), 2);
}

#[test]
fn test_tokenize_rejects_bad_context() {
    let settings = ParserSettings::default();
    assert!(matches!(
        lark_html::tokenize("x", Some(""), &settings),
        Err(HtmlError::EmptyContextElement)
    ));
    assert!(matches!(
        lark_html::tokenize("x", Some("1td"), &settings),
        Err(HtmlError::InvalidContextElement(_))
    ));
}
