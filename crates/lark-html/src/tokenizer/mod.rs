//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference decoding per § 13.2.5.72.
pub mod character_reference;
/// HTML tokenizer state machine: data, tag and attribute states.
pub mod core;
/// Helper methods for tokenizer state transitions and token emission.
mod helpers;
/// Comment, DOCTYPE and CDATA states.
mod markup;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Input cursor over the preprocessed input stream.
pub mod reader;
/// Script data escape states.
mod script;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerState};
pub use reader::{CharacterReader, normalize_newlines};
pub use token::{Attribute, Token};
