use std::collections::HashSet;

use strum_macros::Display;

use lark_dom::{AttributesMap, DomTree, NodeId, QuirksMode, TreeSink};

use super::formatting::ActiveFormattingElement;
use crate::error::{HtmlError, ParseError, ParseErrorList};
use crate::schema::TagSchema;
use crate::settings::ParserSettings;
use crate::tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// `ForeignContent` is never stored as the current mode; the dispatcher picks
/// it per token when the adjusted current node is an `svg` or `math` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    ForeignContent,
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Pulls tokens from an [`HTMLTokenizer`] and builds a tree through a
/// [`TreeSink`]. The builder drives the tokenizer: it switches it into RCDATA,
/// RAWTEXT, script data and PLAINTEXT content, acknowledges self-closing flags
/// and enables CDATA sections inside foreign content.
///
/// ```
/// use lark_html::{HTMLTreeBuilder, ParserSettings};
///
/// let builder = HTMLTreeBuilder::new("<p>Hello", &ParserSettings::default())?;
/// let tree = builder.run();
/// let body = tree.body().expect("body is always synthesized");
/// assert_eq!(tree.text_content(body), "Hello");
/// # Ok::<(), lark_html::HtmlError>(())
/// ```
pub struct HTMLTreeBuilder<S: TreeSink = DomTree> {
    pub(crate) tokenizer: HTMLTokenizer,
    pub(crate) sink: S,
    pub(crate) schema: TagSchema,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(crate) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    /// "When the insertion mode is switched to "text" or "in table text", the
    /// original insertion mode is also set."
    pub(crate) original_insertion_mode: InsertionMode,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// "The stack grows downwards; the topmost node on the stack is the first
    /// one added to the stack, and the bottommost node of the stack is the most
    /// recently added node in the stack." Index 0 is the topmost node.
    pub(crate) open_elements: Vec<NodeId>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(crate) active_formatting_elements: Vec<ActiveFormattingElement>,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    /// "pending table character tokens"
    pub(crate) pending_table_character_tokens: Vec<String>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(crate) head_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.4](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    pub(crate) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    /// The fragment parsing context element. Never attached to the tree.
    pub(crate) context_element: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    /// "The frameset-ok flag is set to "ok" when the parser is created."
    pub(crate) frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    /// Set while in-table content is processed using the "in body" rules.
    pub(crate) foster_parenting: bool,

    /// Set after `<pre>`, `<listing>` and `<textarea>`: a newline directly
    /// after the start tag is dropped.
    pub(crate) ignore_next_line_feed: bool,

    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    pub(crate) scripting: bool,

    /// The quirks mode picked from the DOCTYPE.
    pub(crate) quirks_mode: QuirksMode,

    /// Elements inserted as SVG or MathML content.
    pub(crate) foreign_elements: HashSet<NodeId>,

    /// Set once the end-of-file token has been processed.
    pub(crate) stopped: bool,
}

impl HTMLTreeBuilder<DomTree> {
    /// Create a builder that parses `input` as a full document into a new
    /// [`DomTree`].
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::EmptyBaseUri`] if `settings` carries an empty base URI.
    pub fn new(input: &str, settings: &ParserSettings) -> Result<Self, HtmlError> {
        Self::with_sink(input, settings, DomTree::new())
    }

    /// Create a builder that parses `input` as the contents of a `context`
    /// element into a new [`DomTree`].
    ///
    /// # Errors
    ///
    /// Returns an error if `context` is not a usable tag name or `settings`
    /// carries an empty base URI.
    pub fn new_fragment(
        input: &str,
        context: &str,
        settings: &ParserSettings,
    ) -> Result<Self, HtmlError> {
        Self::fragment_with_sink(input, context, settings, DomTree::new())
    }
}

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// Create a document builder writing through `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::EmptyBaseUri`] if `settings` carries an empty base URI.
    pub fn with_sink(input: &str, settings: &ParserSettings, mut sink: S) -> Result<Self, HtmlError> {
        if let Some(base_uri) = &settings.base_uri {
            if base_uri.is_empty() {
                return Err(HtmlError::EmptyBaseUri);
            }
            sink.set_base_uri(base_uri);
        }

        let errors = if settings.tracks_errors() {
            ParseErrorList::tracking(settings.max_errors)
        } else {
            ParseErrorList::no_tracking()
        };

        Ok(Self {
            tokenizer: HTMLTokenizer::with_errors(input, errors),
            sink,
            schema: TagSchema::new(),
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: InsertionMode::Initial,
            open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            pending_table_character_tokens: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            context_element: None,
            frameset_ok: true,
            foster_parenting: false,
            ignore_next_line_feed: false,
            scripting: settings.scripting,
            quirks_mode: QuirksMode::NoQuirks,
            foreign_elements: HashSet::new(),
            stopped: false,
        })
    }

    /// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// Create a fragment builder writing through `sink`. The parsed nodes end
    /// up as children of a synthetic `html` root; see
    /// [`HTMLTreeBuilder::fragment_nodes`].
    ///
    /// # Errors
    ///
    /// Returns an error if `context` is not a usable tag name or `settings`
    /// carries an empty base URI.
    pub fn fragment_with_sink(
        input: &str,
        context: &str,
        settings: &ParserSettings,
        sink: S,
    ) -> Result<Self, HtmlError> {
        let context = validate_context_name(context)?;
        let mut builder = Self::with_sink(input, settings, sink)?;

        // STEP 4: "Let root be a new html element with no attributes."
        // STEP 5: "Append the element root to the Document node created above."
        // STEP 6: "Set up the parser's stack of open elements so that it
        //          contains just the single element root."
        let root = builder.sink.create_element("html", AttributesMap::new());
        let document = builder.sink.document();
        builder.sink.append(document, root);
        builder.push(root);

        // The context element is created for scope and mode decisions only.
        let context_element = builder.sink.create_element(&context, AttributesMap::new());
        if matches!(context.as_str(), "svg" | "math") {
            let _ = builder.foreign_elements.insert(context_element);
        }
        builder.context_element = Some(context_element);

        // STEP 3: "Set the state of the HTML parser's tokenization stage as follows,
        //          switching on the context element"
        builder
            .tokenizer
            .transition(fragment_tokenizer_state(&context, builder.scripting));
        builder.tokenizer.set_last_start_tag_name(Some(&context));

        // STEP 8: "Reset the parser's insertion mode appropriately."
        builder.reset_insertion_mode();

        // STEP 9: "Set the parser's form element pointer to the nearest node to
        //          the context element that is a form element (going straight up
        //          the ancestor chain, and including the element itself, if it
        //          is a form element), if any."
        if context == "form" {
            builder.form_element_pointer = Some(context_element);
        }

        Ok(builder)
    }

    /// Read one token and process it. Returns false once the end-of-file
    /// token has been processed.
    pub fn step(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        let token = self.tokenizer.read();
        let _ = self.process(&token);
        if token.is_eof() {
            self.stopped = true;
        }
        !self.stopped
    }

    /// Parse the whole input and return the sink.
    #[must_use]
    pub fn run(self) -> S {
        self.run_with_errors().0
    }

    /// Parse the whole input and return the sink along with the recorded
    /// parse errors.
    #[must_use]
    pub fn run_with_errors(mut self) -> (S, Vec<ParseError>) {
        while self.step() {}
        self.into_parts()
    }

    /// Give up the builder, returning the sink and the recorded parse errors.
    #[must_use]
    pub fn into_parts(mut self) -> (S, Vec<ParseError>) {
        let errors = self.tokenizer.take_errors().into_vec();
        (self.sink, errors)
    }

    /// The children of the fragment root, in order. Empty for document parses.
    #[must_use]
    pub fn fragment_nodes(&self) -> Vec<NodeId> {
        if self.context_element.is_none() {
            return Vec::new();
        }
        self.open_elements
            .first()
            .map(|&root| self.sink.child_nodes(root))
            .unwrap_or_default()
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
    ///
    /// Process a single token. Returns false if the token was ignored by the
    /// mode that handled it.
    pub fn process(&mut self, token: &Token) -> bool {
        // A newline right after <pre>, <listing> or <textarea> is dropped.
        let handled = if std::mem::take(&mut self.ignore_next_line_feed)
            && let Token::Character { data } = token
            && let Some(rest) = data.strip_prefix('\n')
        {
            rest.is_empty() || self.process_token(&Token::character(rest))
        } else {
            self.process_token(token)
        };

        // [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
        // "If there is an adjusted current node and it is not an element in the
        //  HTML namespace, then switch to the CDATA section start state."
        let foreign = self
            .adjusted_current_node()
            .is_some_and(|node| self.is_foreign(node));
        self.tokenizer.set_allow_cdata(foreign);
        handled
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// Also used to reprocess a token after a mode switch.
    pub(crate) fn process_token(&mut self, token: &Token) -> bool {
        let mode = if self.uses_foreign_content_rules(token) {
            InsertionMode::ForeignContent
        } else {
            self.insertion_mode
        };
        log::trace!(target: "lark_html::tree_builder", "[{mode}] {token}");
        self.process_in_mode(mode, token)
    }

    /// "Process the token using the rules for the `mode` insertion mode."
    pub(crate) fn process_in_mode(&mut self, mode: InsertionMode, token: &Token) -> bool {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
            InsertionMode::ForeignContent => self.handle_foreign_content(token),
        }
    }

    pub(crate) fn switch_mode(&mut self, mode: InsertionMode) {
        if self.insertion_mode != mode {
            log::trace!(
                target: "lark_html::tree_builder",
                "insertion mode {} -> {mode}",
                self.insertion_mode
            );
        }
        self.insertion_mode = mode;
    }

    /// Record a tree construction parse error at the tokenizer's position.
    pub(crate) fn error(&mut self, message: impl core::fmt::Display) {
        self.tokenizer.error(message);
    }

    /// Record the standard "unexpected token" parse error.
    pub(crate) fn unexpected(&mut self, token: &Token) {
        let mode = self.insertion_mode;
        self.error(format_args!("Unexpected token {token} in {mode} mode"));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The stack of open elements, topmost (the root) first.
    #[must_use]
    pub fn open_elements(&self) -> &[NodeId] {
        &self.open_elements
    }

    /// The list of active formatting elements, oldest first.
    #[must_use]
    pub fn active_formatting_elements(&self) -> &[ActiveFormattingElement] {
        &self.active_formatting_elements
    }

    /// The sink the tree is being written to.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The tag schema of this parse.
    #[must_use]
    pub const fn schema(&self) -> &TagSchema {
        &self.schema
    }

    /// The quirks mode chosen from the DOCTYPE.
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// Parse errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        self.tokenizer.errors()
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    /// "The current node is the bottommost node in this stack of open elements."
    pub(crate) fn current_node(&self) -> Option<NodeId> {
        self.open_elements.last().copied()
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it (fragment case); otherwise,
    /// the adjusted current node is the current node."
    pub(crate) fn adjusted_current_node(&self) -> Option<NodeId> {
        match self.context_element {
            Some(context) if self.open_elements.len() == 1 => Some(context),
            _ => self.current_node(),
        }
    }

    /// The tag name of `node`, or the empty string for non-elements.
    pub(crate) fn node_name(&self, node: NodeId) -> &str {
        self.sink.element_name(node).unwrap_or_default()
    }

    pub(crate) fn is_foreign(&self, node: NodeId) -> bool {
        self.foreign_elements.contains(&node)
    }

    /// True if `node` is an HTML element named `name`.
    pub(crate) fn is_html_named(&self, node: NodeId, name: &str) -> bool {
        !self.is_foreign(node) && self.node_name(node) == name
    }

    /// True if `node` is an HTML element named one of `names`.
    pub(crate) fn is_html_named_one_of(&self, node: NodeId, names: &[&str]) -> bool {
        !self.is_foreign(node) && names.contains(&self.node_name(node))
    }

    pub(crate) fn current_node_is(&self, name: &str) -> bool {
        self.current_node()
            .is_some_and(|node| self.is_html_named(node, name))
    }

    pub(crate) fn current_node_is_one_of(&self, names: &[&str]) -> bool {
        self.current_node()
            .is_some_and(|node| self.is_html_named_one_of(node, names))
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#special)
    pub(crate) fn is_special(&self, node: NodeId) -> bool {
        if self.is_foreign(node) {
            return matches!(
                self.node_name(node),
                "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml" | "foreignobject" | "desc" | "title"
            );
        }
        TagSchema::is_special(self.node_name(node))
    }

    // =========================================================================
    // Node insertion
    // =========================================================================

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target, is the position in an element returned by
    /// running the following steps"
    ///
    /// Returns the parent and the node to insert before, if any.
    pub(crate) fn appropriate_insertion_location(
        &self,
        override_target: Option<NodeId>,
    ) -> (NodeId, Option<NodeId>) {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the current node."
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or_else(|| self.sink.document());

        // STEP 2: "If foster parenting is enabled and target is a table, tbody,
        //          tfoot, thead, or tr element"
        if self.foster_parenting
            && self.is_html_named_one_of(target, &["table", "tbody", "tfoot", "thead", "tr"])
        {
            return self.foster_parent_location();
        }

        // "Otherwise: Let adjusted insertion location be inside target, after
        //  its last child (if any)."
        (target, None)
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(crate) fn foster_parent_location(&self) -> (NodeId, Option<NodeId>) {
        // STEP 2.1: "Let last table be the last table element in the stack of
        //            open elements, if any."
        let last_table = self
            .open_elements
            .iter()
            .rposition(|&node| self.is_html_named(node, "table"));

        // STEP 2.3: "If there is no last table, then let adjusted insertion
        //            location be inside the first element in the stack of open
        //            elements (the html element), after its last child (if any)"
        let Some(index) = last_table else {
            let root = self
                .open_elements
                .first()
                .copied()
                .unwrap_or_else(|| self.sink.document());
            return (root, None);
        };
        let table = self.open_elements[index];

        // STEP 2.4: "If last table has a parent node, then let adjusted insertion
        //            location be inside last table's parent node, immediately
        //            before last table"
        if let Some(parent) = self.sink.parent(table) {
            return (parent, Some(table));
        }

        // STEP 2.5-2.6: "Let previous element be the element immediately above
        //                last table in the stack of open elements." Insert
        //                "inside previous element, after its last child"
        let previous = index
            .checked_sub(1)
            .map_or_else(|| self.sink.document(), |i| self.open_elements[i]);
        (previous, None)
    }

    pub(crate) fn insert_node_at(&mut self, location: (NodeId, Option<NodeId>), node: NodeId) {
        match location {
            (parent, Some(reference)) => self.sink.insert_before(parent, node, reference),
            (parent, None) => self.sink.append(parent, node),
        }
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// Create a detached element for a start tag token.
    pub(crate) fn create_element_for_token(&mut self, token: &Token) -> NodeId {
        let (name, attributes) = tag_parts(token);
        let _ = self.schema.get_or_create(name);
        self.sink.create_element(name, attributes_to_map(attributes))
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "Insert a foreign element for the token, with the HTML namespace."
    /// The element is inserted at the appropriate place and pushed onto the
    /// stack of open elements.
    pub(crate) fn insert_element(&mut self, token: &Token) -> NodeId {
        let node = self.create_element_for_token(token);
        let location = self.appropriate_insertion_location(None);
        self.insert_node_at(location, node);
        self.push(node);
        node
    }

    /// Insert an element for a synthesized start tag with no attributes.
    pub(crate) fn insert_element_named(&mut self, name: &str) -> NodeId {
        self.insert_element(&Token::start_tag(name))
    }

    /// Insert an element that is immediately closed: void elements and
    /// self-closed unknown tags. The element is not pushed, and the token's
    /// self-closing flag is acknowledged.
    pub(crate) fn insert_empty(&mut self, token: &Token) -> NodeId {
        let node = self.create_element_for_token(token);
        let location = self.appropriate_insertion_location(None);
        self.insert_node_at(location, node);
        if token.is_self_closing() {
            let (name, _) = tag_parts(token);
            if !self.schema.is_known(name) {
                self.schema.mark_self_closing(name);
            }
            self.tokenizer.acknowledge_self_closing_flag();
        }
        node
    }

    /// An unknown tag written `<name/>`: insert it, remember the name as
    /// self-closing, and close it again with a synthesized end tag.
    pub(crate) fn insert_unknown_self_closing(&mut self, token: &Token) {
        let (name, _) = tag_parts(token);
        let name = name.to_string();
        self.schema.mark_self_closing(&name);
        self.tokenizer.acknowledge_self_closing_flag();
        let _ = self.insert_element(token);
        let _ = self.process_token(&Token::end_tag(&name));
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// Foreign elements keep their lowercased names and attributes; they are
    /// only tracked so the dispatcher can apply the foreign content rules.
    pub(crate) fn insert_foreign_element(&mut self, token: &Token) -> NodeId {
        let node = self.insert_element(token);
        let _ = self.foreign_elements.insert(node);
        if token.is_self_closing() {
            let _ = self.pop();
            self.tokenizer.acknowledge_self_closing_flag();
        }
        node
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// Insert character data at the appropriate place. Text inside `script`
    /// and `style` is inserted as raw data.
    pub(crate) fn insert_characters(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        let (parent, before) = self.appropriate_insertion_location(None);

        // STEP 3: "If the adjusted insertion location is in a Document node,
        //          then return."
        if parent == self.sink.document() {
            return;
        }

        let raw = self.current_node_is_one_of(&["script", "style"]);
        self.sink.append_text(parent, before, data, raw);
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    ///
    /// Insert a comment at the appropriate place, or as the last child of
    /// `parent` when one is given.
    pub(crate) fn insert_comment(&mut self, token: &Token, parent: Option<NodeId>) {
        let Token::Comment { data, bogus } = token else {
            debug_assert!(false, "insert_comment called with {token}");
            return;
        };

        // A bogus comment that started as `<?...` is kept as a processing
        // instruction.
        let node = match data.strip_prefix('?') {
            Some(instruction) if *bogus => {
                let instruction = instruction.strip_suffix('?').unwrap_or(instruction);
                self.sink.create_processing_instruction(instruction)
            }
            _ => self.sink.create_comment(data),
        };

        let location = parent.map_or_else(|| self.appropriate_insertion_location(None), |p| (p, None));
        self.insert_node_at(location, node);
    }

    // =========================================================================
    // Stack
    // =========================================================================

    /// Push `node` onto the stack of open elements. A node already on the
    /// stack is left where it is.
    pub(crate) fn push(&mut self, node: NodeId) {
        if self.open_elements.contains(&node) {
            log::debug!(
                target: "lark_html::tree_builder",
                "refusing to push {node:?} onto the stack of open elements twice"
            );
            return;
        }
        self.open_elements.push(node);
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        let node = self.open_elements.pop()?;
        if self.is_html_named(node, "td") && self.insertion_mode != InsertionMode::InCell {
            log::debug!(target: "lark_html::tree_builder", "popped td outside of the cell mode");
        }
        Some(node)
    }

    /// [§ 13.2.6.2 The generic RCDATA element parsing algorithm](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
    /// and [§ 13.2.6.3 The generic raw text element parsing algorithm](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    pub(crate) fn parse_text_element(&mut self, token: &Token, state: TokenizerState) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_element(token);

        // STEP 2: "If the algorithm that was invoked is the generic raw text
        //          element parsing algorithm, switch the tokenizer to the RAWTEXT
        //          state; otherwise the algorithm invoked was the generic RCDATA
        //          element parsing algorithm, switch the tokenizer to the RCDATA state."
        self.tokenizer.transition(state);

        // STEP 3: "Let the original insertion mode be the current insertion mode."
        self.original_insertion_mode = self.insertion_mode;

        // STEP 4: "Then, switch the insertion mode to "text"."
        self.switch_mode(InsertionMode::Text);
    }
}

/// The name and attributes of a start or end tag token.
pub(crate) fn tag_parts(token: &Token) -> (&str, &[Attribute]) {
    match token {
        Token::StartTag {
            name, attributes, ..
        }
        | Token::EndTag {
            name, attributes, ..
        } => (name, attributes),
        _ => {
            debug_assert!(false, "expected a tag token, got {token}");
            ("", &[])
        }
    }
}

/// Convert token attributes into a DOM attribute map. The tokenizer already
/// dropped duplicates, so the first occurrence wins.
pub(crate) fn attributes_to_map(attributes: &[Attribute]) -> AttributesMap {
    attributes
        .iter()
        .map(|attr| (attr.name.as_str(), attr.value.as_str()))
        .collect()
}

/// Check that `context` can name an element, returning it lowercased.
pub(crate) fn validate_context_name(context: &str) -> Result<String, HtmlError> {
    if context.is_empty() {
        return Err(HtmlError::EmptyContextElement);
    }
    let starts_with_letter = context.starts_with(|c: char| c.is_ascii_alphabetic());
    let has_delimiter = context
        .chars()
        .any(|c| matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ' | '/' | '>' | '<' | '\0'));
    if !starts_with_letter || has_delimiter {
        return Err(HtmlError::InvalidContextElement(context.to_string()));
    }
    Ok(context.to_ascii_lowercase())
}

/// The tokenizer state a fragment parse starts in for a lowercase `context`.
pub(crate) fn fragment_tokenizer_state(context: &str, scripting: bool) -> TokenizerState {
    match context {
        "title" | "textarea" => TokenizerState::RCDATA,
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => TokenizerState::RAWTEXT,
        "noscript" if scripting => TokenizerState::RAWTEXT,
        "script" => TokenizerState::ScriptData,
        "plaintext" => TokenizerState::PLAINTEXT,
        _ => TokenizerState::Data,
    }
}
