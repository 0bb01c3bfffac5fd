//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)

mod core;
/// Parsing entry points and tree printing.
mod document;
/// The list of active formatting elements and the adoption agency algorithm.
mod formatting;
mod modes;
/// Quirks mode selection.
mod quirks;
/// The stack of open elements.
mod stack;

pub use self::core::{HTMLTreeBuilder, InsertionMode};
pub use document::{
    ParsedDocument, ParsedFragment, TokenStream, format_tree, parse_document,
    parse_document_with_sink, parse_fragment, parse_fragment_with_sink, print_tree, tokenize,
};
pub use formatting::ActiveFormattingElement;
pub use quirks::quirks_mode_for_doctype;
