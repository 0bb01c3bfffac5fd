//! One-call parsing entry points and tree printing.
//!
//! [§ 13.2 Parsing HTML documents](https://html.spec.whatwg.org/multipage/parsing.html#parsing)
//! and [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)

use std::fmt;

use lark_dom::{DomTree, NodeId, NodeType, TreeSink};

use super::core::{HTMLTreeBuilder, fragment_tokenizer_state, validate_context_name};
use crate::error::{HtmlError, ParseError, ParseErrorList};
use crate::settings::ParserSettings;
use crate::tokenizer::{HTMLTokenizer, Token};

/// A parsed document and the diagnostics recorded while building it.
#[derive(Debug, Clone)]
pub struct ParsedDocument<S = DomTree> {
    /// The finished tree.
    pub tree: S,
    /// Parse errors, empty unless `max_errors` was positive.
    pub errors: Vec<ParseError>,
}

/// A parsed fragment: the tree holding it, its top-level nodes in order, and
/// the diagnostics recorded while building it.
#[derive(Debug, Clone)]
pub struct ParsedFragment<S = DomTree> {
    /// The tree holding the fragment under a synthetic `html` root.
    pub tree: S,
    /// "Return root's children, in tree order."
    pub nodes: Vec<NodeId>,
    /// Parse errors, empty unless `max_errors` was positive.
    pub errors: Vec<ParseError>,
}

/// Parse `input` as a complete HTML document.
///
/// ```
/// use lark_html::{ParserSettings, parse_document};
///
/// let parsed = parse_document("<title>Hi</title><p>text", &ParserSettings::default())?;
/// let head = parsed.tree.head().expect("head is always synthesized");
/// assert_eq!(parsed.tree.text_content(head), "Hi");
/// # Ok::<(), lark_html::HtmlError>(())
/// ```
///
/// # Errors
///
/// Returns [`HtmlError::EmptyBaseUri`] if `settings` carries an empty base URI.
/// Malformed markup is never an error.
pub fn parse_document(input: &str, settings: &ParserSettings) -> Result<ParsedDocument, HtmlError> {
    parse_document_with_sink(input, settings, DomTree::new())
}

/// Parse `input` as a complete HTML document into `sink`.
///
/// # Errors
///
/// Returns [`HtmlError::EmptyBaseUri`] if `settings` carries an empty base URI.
pub fn parse_document_with_sink<S: TreeSink>(
    input: &str,
    settings: &ParserSettings,
    sink: S,
) -> Result<ParsedDocument<S>, HtmlError> {
    let builder = HTMLTreeBuilder::with_sink(input, settings, sink)?;
    let (tree, errors) = builder.run_with_errors();
    Ok(ParsedDocument { tree, errors })
}

/// Parse `input` as the contents of a `context` element.
///
/// ```
/// use lark_html::{ParserSettings, parse_fragment};
///
/// let parsed = parse_fragment("<td>a<td>b", "tr", &ParserSettings::default())?;
/// assert_eq!(parsed.nodes.len(), 2);
/// # Ok::<(), lark_html::HtmlError>(())
/// ```
///
/// # Errors
///
/// Returns [`HtmlError::EmptyContextElement`] or
/// [`HtmlError::InvalidContextElement`] if `context` cannot name an element,
/// and [`HtmlError::EmptyBaseUri`] if `settings` carries an empty base URI.
pub fn parse_fragment(
    input: &str,
    context: &str,
    settings: &ParserSettings,
) -> Result<ParsedFragment, HtmlError> {
    parse_fragment_with_sink(input, context, settings, DomTree::new())
}

/// Parse `input` as the contents of a `context` element into `sink`.
///
/// # Errors
///
/// See [`parse_fragment`].
pub fn parse_fragment_with_sink<S: TreeSink>(
    input: &str,
    context: &str,
    settings: &ParserSettings,
    sink: S,
) -> Result<ParsedFragment<S>, HtmlError> {
    let mut builder = HTMLTreeBuilder::fragment_with_sink(input, context, settings, sink)?;
    while builder.step() {}
    let nodes = builder.fragment_nodes();
    let (tree, errors) = builder.into_parts();
    Ok(ParsedFragment {
        tree,
        nodes,
        errors,
    })
}

/// The tokens of an input and the diagnostics recorded while reading it.
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// Every token up to and including the end-of-file token.
    pub tokens: Vec<Token>,
    /// Parse errors, empty unless `max_errors` was positive.
    pub errors: Vec<ParseError>,
}

/// Tokenize `input` without building a tree.
///
/// With a `context`, the tokenizer starts in the state a fragment parse of
/// that element would use, so `tokenize("a<b>", Some("title"), ..)` yields
/// plain text. Without one it starts in the data state.
///
/// ```
/// use lark_html::{ParserSettings, Token, tokenize};
///
/// let stream = tokenize("a<b>", Some("textarea"), &ParserSettings::default())?;
/// assert!(stream.tokens.iter().all(|token| !matches!(token, Token::StartTag { .. })));
/// # Ok::<(), lark_html::HtmlError>(())
/// ```
///
/// # Errors
///
/// Returns [`HtmlError::EmptyContextElement`] or
/// [`HtmlError::InvalidContextElement`] if `context` cannot name an element.
pub fn tokenize(
    input: &str,
    context: Option<&str>,
    settings: &ParserSettings,
) -> Result<TokenStream, HtmlError> {
    let errors = if settings.tracks_errors() {
        ParseErrorList::tracking(settings.max_errors)
    } else {
        ParseErrorList::no_tracking()
    };
    let mut tokenizer = HTMLTokenizer::with_errors(input, errors);
    if let Some(context) = context {
        let context = validate_context_name(context)?;
        tokenizer.transition(fragment_tokenizer_state(&context, settings.scripting));
        tokenizer.set_last_start_tag_name(Some(&context));
        tokenizer.set_allow_cdata(matches!(context.as_str(), "svg" | "math"));
    }
    let (tokens, errors) = tokenizer.run_with_errors();
    Ok(TokenStream { tokens, errors })
}

/// Render the subtree rooted at `id` as an indented outline, one node per
/// line.
///
/// ```
/// use lark_dom::NodeId;
/// use lark_html::{ParserSettings, format_tree, parse_document};
///
/// let parsed = parse_document("<p>Hi", &ParserSettings::default())?;
/// let outline = format_tree(&parsed.tree, NodeId::ROOT);
/// assert!(outline.contains("      <p>\n        \"Hi\"\n"));
/// # Ok::<(), lark_html::HtmlError>(())
/// ```
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    Outline { tree, id }.to_string()
}

/// Print the subtree rooted at `id` to stdout. See [`format_tree`].
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", Outline { tree, id });
}

struct Outline<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.tree, self.id, 0)
    }
}

fn write_node(
    out: &mut fmt::Formatter<'_>,
    tree: &DomTree,
    id: NodeId,
    depth: usize,
) -> fmt::Result {
    let Some(node) = tree.get(id) else {
        return Ok(());
    };
    let prefix = "  ".repeat(depth);

    match &node.node_type {
        NodeType::Document(_) => writeln!(out, "{prefix}#document")?,
        NodeType::Doctype(doctype) => {
            if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
                writeln!(out, "{prefix}<!DOCTYPE {}>", doctype.name)?;
            } else {
                writeln!(
                    out,
                    "{prefix}<!DOCTYPE {} \"{}\" \"{}\">",
                    doctype.name, doctype.public_id, doctype.system_id
                )?;
            }
        }
        NodeType::Element(data) => {
            write!(out, "{prefix}<{}", data.tag_name)?;
            for (name, value) in data.attrs.iter() {
                write!(out, " {name}=\"{value}\"")?;
            }
            writeln!(out, ">")?;
        }
        NodeType::Text(text) | NodeType::Data(text) => {
            writeln!(out, "{prefix}\"{}\"", text.replace('\n', "\\n"))?;
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->")?,
        NodeType::ProcessingInstruction(data) => writeln!(out, "{prefix}<?{data}>")?,
    }

    for &child in tree.children(id) {
        write_node(out, tree, child, depth + 1)?;
    }
    Ok(())
}
