use core::fmt;

/// An attribute on a start or end tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer emits tokens of these types to the tree construction stage.
/// Tokens are immutable values once emitted; the tokenizer builds them in the
/// pending builders below and hands each one over by move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag. When a DOCTYPE token is created, its name,
    /// public identifier, and system identifier must be marked as missing
    /// (which is a distinct state from the empty string)..."
    Doctype {
        /// "a name"
        name: Option<String>,
        /// "a public identifier"
        public_identifier: Option<String>,
        /// "a system identifier"
        system_identifier: Option<String>,
        /// "a force-quirks flag"
        force_quirks: bool,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes, each of which has a name and a value."
    StartTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
    },

    /// End tag token. Same shape as a start tag; a set self-closing flag or
    /// any attributes are parse errors.
    EndTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
        /// Set for comments produced by the bogus comment state, such as
        /// `<?xml ...?>`. The tree builder turns those starting with `?` into
        /// processing instructions.
        bogus: bool,
    },

    /// A run of adjacent characters, coalesced by the tokenizer.
    Character {
        /// "data"
        data: String,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// A start tag with no attributes, as synthesized by the tree builder.
    #[must_use]
    pub fn start_tag(name: &str) -> Self {
        Self::StartTag {
            name: name.to_string(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// An end tag, as synthesized by the tree builder.
    #[must_use]
    pub fn end_tag(name: &str) -> Self {
        Self::EndTag {
            name: name.to_string(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// A character token carrying `data`.
    #[must_use]
    pub fn character(data: impl Into<String>) -> Self {
        Self::Character { data: data.into() }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// The tag name of a start or end tag.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// True if this is a start tag named `tag`.
    #[must_use]
    pub fn is_start_tag_named(&self, tag: &str) -> bool {
        matches!(self, Self::StartTag { name, .. } if name == tag)
    }

    /// True if this is an end tag named `tag`.
    #[must_use]
    pub fn is_end_tag_named(&self, tag: &str) -> bool {
        matches!(self, Self::EndTag { name, .. } if name == tag)
    }

    /// The value of the named attribute on a start or end tag.
    #[must_use]
    pub fn attribute(&self, attr: &str) -> Option<&str> {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => attributes
                .iter()
                .find(|a| a.name == attr)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// True if this is a start tag with the self-closing flag set.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        matches!(
            self,
            Self::StartTag {
                self_closing: true,
                ..
            }
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                write!(f, "<!DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = public_identifier {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = system_identifier {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                write!(f, ">")
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data, .. } => write!(f, "<!--{data}-->"),
            Self::Character { data } => write!(f, "{data:?}"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// Which kind of tag the pending tag builder is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Start,
    End,
}

/// The tag token currently being built.
///
/// Reset (keeping its buffers) at the start of every tag, and turned into a
/// [`Token`] by [`TagBuilder::finish`].
#[derive(Debug)]
pub(crate) struct TagBuilder {
    kind: TagKind,
    name: String,
    self_closing: bool,
    attributes: Vec<Attribute>,
    attr_name: String,
    attr_value: String,
    /// An attribute has been started and not yet committed.
    attr_pending: bool,
}

impl TagBuilder {
    pub(crate) const fn new() -> Self {
        Self {
            kind: TagKind::Start,
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
            attr_name: String::new(),
            attr_value: String::new(),
            attr_pending: false,
        }
    }

    /// "Create a new start/end tag token, set its tag name to the empty string."
    pub(crate) fn reset(&mut self, kind: TagKind) {
        self.kind = kind;
        self.name.clear();
        self.self_closing = false;
        self.attributes.clear();
        self.attr_name.clear();
        self.attr_value.clear();
        self.attr_pending = false;
    }

    pub(crate) const fn kind(&self) -> TagKind {
        self.kind
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn append_tag_name(&mut self, s: &str) {
        self.name.push_str(s);
    }

    pub(crate) fn push_tag_name(&mut self, c: char) {
        self.name.push(c);
    }

    pub(crate) const fn set_self_closing(&mut self) {
        self.self_closing = true;
    }

    /// "Start a new attribute in the current tag token. Set that attribute
    /// name and value to the empty string."
    ///
    /// Commits any attribute in progress first. Returns true if that attribute
    /// was a duplicate and was dropped.
    pub(crate) fn new_attribute(&mut self) -> bool {
        let duplicate = self.commit_attribute();
        self.attr_pending = true;
        duplicate
    }

    pub(crate) fn append_attribute_name(&mut self, s: &str) {
        self.attr_pending = true;
        self.attr_name.push_str(s);
    }

    pub(crate) fn push_attribute_name(&mut self, c: char) {
        self.attr_pending = true;
        self.attr_name.push(c);
    }

    pub(crate) fn append_attribute_value(&mut self, s: &str) {
        self.attr_value.push_str(s);
    }

    pub(crate) fn push_attribute_value(&mut self, c: char) {
        self.attr_value.push(c);
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    ///
    /// Returns true if the pending attribute was a duplicate.
    fn commit_attribute(&mut self) -> bool {
        if !self.attr_pending {
            return false;
        }
        self.attr_pending = false;
        let name = std::mem::take(&mut self.attr_name);
        let value = std::mem::take(&mut self.attr_value);
        if self.attributes.iter().any(|a| a.name == name) {
            return true;
        }
        self.attributes.push(Attribute::new(name, value));
        false
    }

    /// Convert the pending tag into a token, committing any attribute in
    /// progress. Returns the token and whether a duplicate attribute was
    /// dropped during the final commit.
    pub(crate) fn finish(&mut self) -> (Token, bool) {
        let duplicate = self.commit_attribute();
        let name = std::mem::take(&mut self.name);
        let attributes = std::mem::take(&mut self.attributes);
        let token = match self.kind {
            TagKind::Start => Token::StartTag {
                name,
                self_closing: self.self_closing,
                attributes,
            },
            TagKind::End => Token::EndTag {
                name,
                self_closing: self.self_closing,
                attributes,
            },
        };
        self.self_closing = false;
        (token, duplicate)
    }
}

/// The comment token currently being built.
#[derive(Debug, Default)]
pub(crate) struct CommentBuilder {
    pub(crate) data: String,
    pub(crate) bogus: bool,
}

impl CommentBuilder {
    pub(crate) fn reset(&mut self) {
        self.data.clear();
        self.bogus = false;
    }

    pub(crate) fn finish(&mut self) -> Token {
        Token::Comment {
            data: std::mem::take(&mut self.data),
            bogus: std::mem::take(&mut self.bogus),
        }
    }
}

/// The DOCTYPE token currently being built.
#[derive(Debug, Default)]
pub(crate) struct DoctypeBuilder {
    pub(crate) name: Option<String>,
    pub(crate) public_identifier: Option<String>,
    pub(crate) system_identifier: Option<String>,
    pub(crate) force_quirks: bool,
}

impl DoctypeBuilder {
    pub(crate) fn reset(&mut self) {
        self.name = None;
        self.public_identifier = None;
        self.system_identifier = None;
        self.force_quirks = false;
    }

    pub(crate) fn push_name(&mut self, c: char) {
        self.name.get_or_insert_with(String::new).push(c);
    }

    pub(crate) fn finish(&mut self) -> Token {
        Token::Doctype {
            name: self.name.take(),
            public_identifier: self.public_identifier.take(),
            system_identifier: self.system_identifier.take(),
            force_quirks: std::mem::take(&mut self.force_quirks),
        }
    }
}
