//! Tolerant HTML5 tokenizer and tree builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA, RAWTEXT, script data and PLAINTEXT content
//!   - Tag, attribute, comment, DOCTYPE and CDATA states
//!   - Numeric and named character references
//!
//! - **HTML Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Every insertion mode except "in template"
//!   - Implied tags, foster parenting and the adoption agency algorithm
//!   - Quirks mode detection from the DOCTYPE
//!   - Fragment parsing against a context element
//!
//! Malformed markup never fails: recovery follows the standard and, when
//! [`ParserSettings::max_errors`] is positive, each parse error is recorded.
//!
//! # Not Implemented
//!
//! - Template contents and the "in template" insertion mode (`<template>` is
//!   parsed as an ordinary element)
//! - Namespaces and attribute adjustment for SVG and MathML
//! - Script execution and `document.write`
//!
//! ```
//! use lark_html::{ParserSettings, parse_document};
//!
//! let parsed = parse_document("<table><tr><td>cell", &ParserSettings::default())?;
//! let body = parsed.tree.body().expect("body is always synthesized");
//! assert_eq!(parsed.tree.text_content(body), "cell");
//! # Ok::<(), lark_html::HtmlError>(())
//! ```

/// Parse diagnostics and fatal errors.
pub mod error;
/// HTML tree construction.
pub mod parser;
/// Tag metadata queried by the tree builder.
pub mod schema;
/// Parser configuration.
pub mod settings;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::{HtmlError, ParseError, ParseErrorList};
pub use parser::{
    ActiveFormattingElement, HTMLTreeBuilder, InsertionMode, ParsedDocument, ParsedFragment,
    TokenStream, format_tree, parse_document, parse_fragment, print_tree, tokenize,
};
pub use schema::TagSchema;
pub use settings::ParserSettings;
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState};
