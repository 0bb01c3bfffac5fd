//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Options that control a single parse.
///
/// ```
/// use lark_html::ParserSettings;
///
/// let settings = ParserSettings::default()
///     .with_max_errors(50)
///     .with_base_uri("https://example.com/");
/// assert!(settings.tracks_errors());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Maximum number of parse errors to record. Zero disables tracking.
    pub max_errors: usize,
    /// The document's base URI, stored on the document node.
    pub base_uri: Option<String>,
    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for
    /// the Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    pub scripting: bool,
}

impl ParserSettings {
    /// Record up to `max_errors` parse errors.
    #[must_use]
    pub const fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Set the base URI stored on the document.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Enable or disable the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, scripting: bool) -> Self {
        self.scripting = scripting;
        self
    }

    /// True if parse errors will be recorded.
    #[must_use]
    pub const fn tracks_errors(&self) -> bool {
        self.max_errors > 0
    }
}
