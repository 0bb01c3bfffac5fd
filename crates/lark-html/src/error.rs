//! Parse diagnostics and fatal parser errors.
//!
//! Malformed markup is never fatal: the tokenizer and tree builder recover as
//! the standard prescribes and, when asked to, record a [`ParseError`]. The
//! only failures surfaced as `Err` are invalid arguments to the parser entry
//! points, described by [`HtmlError`].

use core::fmt;

use serde::Serialize;
use thiserror::Error;

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// "This specification defines the parsing rules for HTML documents, whether
/// they are syntactically correct or not. Certain points in the parsing
/// algorithm are said to be parse errors."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// Character offset into the newline-normalized input.
    pub position: usize,
    /// Human-readable description.
    pub message: String,
}

impl ParseError {
    /// Create a parse error at `position`.
    #[must_use]
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// A bounded collection of parse errors.
///
/// A capacity of zero disables tracking entirely: errors are dropped before
/// their message is formatted.
#[derive(Debug, Clone, Default)]
pub struct ParseErrorList {
    errors: Vec<ParseError>,
    max_size: usize,
}

impl ParseErrorList {
    /// A list that records nothing.
    #[must_use]
    pub const fn no_tracking() -> Self {
        Self {
            errors: Vec::new(),
            max_size: 0,
        }
    }

    /// A list that records up to `max_size` errors.
    #[must_use]
    pub const fn tracking(max_size: usize) -> Self {
        Self {
            errors: Vec::new(),
            max_size,
        }
    }

    /// True if another error would be recorded.
    #[must_use]
    pub fn can_add_error(&self) -> bool {
        self.errors.len() < self.max_size
    }

    /// Record an error at `position` if there is room.
    pub fn add(&mut self, position: usize, message: impl fmt::Display) {
        if !self.can_add_error() {
            return;
        }
        let error = ParseError::new(position, message.to_string());
        log::debug!(target: "lark_html::errors", "parse error at {error}");
        self.errors.push(error);
    }

    /// The recorded errors, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[ParseError] {
        &self.errors
    }

    /// Number of recorded errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the list, returning the recorded errors.
    #[must_use]
    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

/// Invalid arguments passed to a parser entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HtmlError {
    /// The fragment context element name was empty.
    #[error("fragment context element name must not be empty")]
    EmptyContextElement,

    /// The fragment context element name cannot be a tag name.
    #[error("invalid fragment context element name: {0:?}")]
    InvalidContextElement(String),

    /// A base URI was supplied but is empty.
    #[error("base URI must not be empty when supplied")]
    EmptyBaseUri,
}
