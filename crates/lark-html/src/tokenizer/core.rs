use strum_macros::Display;

use super::reader::CharacterReader;
use super::token::{CommentBuilder, DoctypeBuilder, TagBuilder, TagKind, Token};
use crate::error::{ParseError, ParseErrorList};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer states. Character reference states are folded into
/// [`HTMLTokenizer::consume_character_reference`], which the data, RCDATA and
/// attribute value states call directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    RCDATA,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RAWTEXT,
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ScriptData,
    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    PLAINTEXT,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    RCDATALessThanSign,
    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    RCDATAEndTagOpen,
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    RCDATAEndTagName,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RAWTEXTLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RAWTEXTEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RAWTEXTEndTagName,
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    ScriptDataLessThanSign,
    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    ScriptDataEndTagOpen,
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ScriptDataEndTagName,
    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    ScriptDataEscapeStart,
    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    ScriptDataEscapeStartDash,
    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    ScriptDataEscaped,
    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    ScriptDataEscapedDash,
    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    ScriptDataEscapedDashDash,
    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    ScriptDataEscapedLessThanSign,
    /// [§ 13.2.5.24 Script data escaped end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-open-state)
    ScriptDataEscapedEndTagOpen,
    /// [§ 13.2.5.25 Script data escaped end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-name-state)
    ScriptDataEscapedEndTagName,
    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    ScriptDataDoubleEscapeStart,
    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    ScriptDataDoubleEscaped,
    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    ScriptDataDoubleEscapedDash,
    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    ScriptDataDoubleEscapedDashDash,
    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    ScriptDataDoubleEscapedLessThanSign,
    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    ScriptDataDoubleEscapeEnd,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    CommentLessThanSign,
    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    CommentLessThanSignBang,
    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    CommentLessThanSignBangDash,
    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    CommentLessThanSignBangDashDash,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    CommentEndBang,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    DOCTYPE,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDOCTYPEName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DOCTYPEName,
    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    AfterDOCTYPEName,
    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    AfterDOCTYPEPublicKeyword,
    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    BeforeDOCTYPEPublicIdentifier,
    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    DOCTYPEPublicIdentifierDoubleQuoted,
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    DOCTYPEPublicIdentifierSingleQuoted,
    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    AfterDOCTYPEPublicIdentifier,
    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    BetweenDOCTYPEPublicAndSystemIdentifiers,
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    AfterDOCTYPESystemKeyword,
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    BeforeDOCTYPESystemIdentifier,
    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    DOCTYPESystemIdentifierDoubleQuoted,
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    DOCTYPESystemIdentifierSingleQuoted,
    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    AfterDOCTYPESystemIdentifier,
    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    BogusDOCTYPE,
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    CDATASection,
    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    CDATASectionBracket,
    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    CDATASectionEnd,
}

/// Characters that end a tag name.
const TAG_NAME_DELIMITERS: [char; 7] = ['\t', '\n', '\x0C', ' ', '/', '>', '\0'];

/// Characters that end an attribute name.
const ATTRIBUTE_NAME_DELIMITERS: [char; 11] =
    ['\t', '\n', '\x0C', ' ', '/', '=', '>', '\0', '"', '\'', '<'];

/// Characters that end an unquoted attribute value.
const UNQUOTED_VALUE_DELIMITERS: [char; 12] =
    ['\t', '\n', '\x0C', ' ', '&', '>', '\0', '"', '\'', '<', '=', '`'];

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to tokenize HTML."
///
/// A pull tokenizer: every call to [`HTMLTokenizer::read`] runs the state
/// machine until one token is ready. Adjacent characters are coalesced into
/// a single [`Token::Character`]. The tree builder switches the state for
/// RCDATA, RAWTEXT, script data and PLAINTEXT content with
/// [`HTMLTokenizer::transition`].
#[derive(Debug)]
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) reader: CharacterReader,

    /// A completed non-character token waiting to be returned.
    pub(super) emit_pending: Option<Token>,
    /// Character run waiting to be returned ahead of `emit_pending`.
    pub(super) char_buffer: String,

    pub(super) tag: TagBuilder,
    pub(super) comment: CommentBuilder,
    pub(super) doctype: DoctypeBuilder,

    /// "The last start tag token emitted is used as part of the tree construction stage
    /// and in the RCDATA, RAWTEXT, and script data states."
    pub(super) last_start_tag_name: Option<String>,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    pub(super) temporary_buffer: String,

    /// [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    /// "When a start tag token is emitted with its self-closing flag set, if the
    /// flag is not acknowledged when it is processed by the tree construction
    /// stage, that is a non-void-html-element-start-tag-with-trailing-solidus
    /// parse error."
    pub(super) self_closing_flag_acknowledged: bool,

    /// Set by the tree builder when the adjusted current node is foreign
    /// content, so `<![CDATA[` opens a CDATA section.
    pub(super) allow_cdata: bool,

    pub(super) errors: ParseErrorList,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input, not tracking errors.
    ///
    /// "The tokenizer state machine consists of the states defined in the
    /// following subsections. The initial state is the data state."
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_errors(input, ParseErrorList::no_tracking())
    }

    /// Create a new tokenizer that records errors into `errors`.
    #[must_use]
    pub fn with_errors(input: &str, errors: ParseErrorList) -> Self {
        Self {
            state: TokenizerState::Data,
            reader: CharacterReader::new(input),
            emit_pending: None,
            char_buffer: String::new(),
            tag: TagBuilder::new(),
            comment: CommentBuilder::default(),
            doctype: DoctypeBuilder::default(),
            last_start_tag_name: None,
            temporary_buffer: String::new(),
            self_closing_flag_acknowledged: true,
            allow_cdata: false,
            errors,
        }
    }

    /// Tokenize the whole input, returning every token up to and including
    /// the end-of-file token.
    ///
    /// Without a tree builder nothing switches the tokenizer into RCDATA or
    /// RAWTEXT, so `<title>` contents are tokenized as markup.
    #[must_use]
    pub fn run(self) -> Vec<Token> {
        self.run_with_errors().0
    }

    /// Tokenize the whole input, returning the tokens along with the
    /// recorded parse errors.
    #[must_use]
    pub fn run_with_errors(mut self) -> (Vec<Token>, Vec<ParseError>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.read();
            // Standalone tokenization has nobody to acknowledge the flag.
            self.acknowledge_self_closing_flag();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return (tokens, self.take_errors().into_vec());
            }
        }
    }

    /// Read the next token.
    ///
    /// Runs the state machine until a token is ready. Buffered characters are
    /// returned first as a single character token; the completed token that
    /// ended the run is returned by the following call.
    pub fn read(&mut self) -> Token {
        if !self.self_closing_flag_acknowledged {
            self.error("Self closing flag not acknowledged");
            self.self_closing_flag_acknowledged = true;
        }

        while self.emit_pending.is_none() {
            self.step();
        }

        if !self.char_buffer.is_empty() {
            return Token::Character {
                data: std::mem::take(&mut self.char_buffer),
            };
        }

        let token = self.emit_pending.take().unwrap_or(Token::EndOfFile);
        if token.is_self_closing() {
            self.self_closing_flag_acknowledged = false;
        }
        log::trace!(target: "lark_html::tokenizer", "emit token: {token}");
        token
    }

    /// Run the handler for the current state once.
    fn step(&mut self) {
        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::RCDATA => self.handle_rcdata_state(),
            TokenizerState::RAWTEXT => self.handle_rawtext_state(),
            TokenizerState::ScriptData => self.handle_script_data_state(),
            TokenizerState::PLAINTEXT => self.handle_plaintext_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::RCDATALessThanSign => {
                self.handle_text_less_than_sign_state(TokenizerState::RCDATA, TokenizerState::RCDATAEndTagOpen);
            }
            TokenizerState::RCDATAEndTagOpen => {
                self.handle_text_end_tag_open_state(TokenizerState::RCDATA, TokenizerState::RCDATAEndTagName);
            }
            TokenizerState::RCDATAEndTagName => self.handle_text_end_tag_name_state(TokenizerState::RCDATA),
            TokenizerState::RAWTEXTLessThanSign => {
                self.handle_text_less_than_sign_state(TokenizerState::RAWTEXT, TokenizerState::RAWTEXTEndTagOpen);
            }
            TokenizerState::RAWTEXTEndTagOpen => {
                self.handle_text_end_tag_open_state(TokenizerState::RAWTEXT, TokenizerState::RAWTEXTEndTagName);
            }
            TokenizerState::RAWTEXTEndTagName => self.handle_text_end_tag_name_state(TokenizerState::RAWTEXT),
            TokenizerState::ScriptDataLessThanSign => self.handle_script_data_less_than_sign_state(),
            TokenizerState::ScriptDataEndTagOpen => self.handle_text_end_tag_open_state(
                TokenizerState::ScriptData,
                TokenizerState::ScriptDataEndTagName,
            ),
            TokenizerState::ScriptDataEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::ScriptData);
            }
            TokenizerState::ScriptDataEscapeStart => self.handle_script_data_escape_start_state(),
            TokenizerState::ScriptDataEscapeStartDash => self.handle_script_data_escape_start_dash_state(),
            TokenizerState::ScriptDataEscaped => self.handle_script_data_escaped_state(),
            TokenizerState::ScriptDataEscapedDash => self.handle_script_data_escaped_dash_state(),
            TokenizerState::ScriptDataEscapedDashDash => self.handle_script_data_escaped_dash_dash_state(),
            TokenizerState::ScriptDataEscapedLessThanSign => {
                self.handle_script_data_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataEscapedEndTagOpen => self.handle_text_end_tag_open_state(
                TokenizerState::ScriptDataEscaped,
                TokenizerState::ScriptDataEscapedEndTagName,
            ),
            TokenizerState::ScriptDataEscapedEndTagName => {
                self.handle_text_end_tag_name_state(TokenizerState::ScriptDataEscaped);
            }
            TokenizerState::ScriptDataDoubleEscapeStart => self.handle_script_data_double_escape_start_state(),
            TokenizerState::ScriptDataDoubleEscaped => self.handle_script_data_double_escaped_state(),
            TokenizerState::ScriptDataDoubleEscapedDash => self.handle_script_data_double_escaped_dash_state(),
            TokenizerState::ScriptDataDoubleEscapedDashDash => {
                self.handle_script_data_double_escaped_dash_dash_state();
            }
            TokenizerState::ScriptDataDoubleEscapedLessThanSign => {
                self.handle_script_data_double_escaped_less_than_sign_state();
            }
            TokenizerState::ScriptDataDoubleEscapeEnd => self.handle_script_data_double_escape_end_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => self.handle_attribute_value_quoted_state('"'),
            TokenizerState::AttributeValueSingleQuoted => self.handle_attribute_value_quoted_state('\''),
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => self.handle_after_attribute_value_quoted_state(),
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::CommentStart => self.handle_comment_start_state(),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::CommentLessThanSign => self.handle_comment_less_than_sign_state(),
            TokenizerState::CommentLessThanSignBang => self.handle_comment_less_than_sign_bang_state(),
            TokenizerState::CommentLessThanSignBangDash => {
                self.handle_comment_less_than_sign_bang_dash_state();
            }
            TokenizerState::CommentLessThanSignBangDashDash => {
                self.handle_comment_less_than_sign_bang_dash_dash_state();
            }
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
            TokenizerState::CommentEnd => self.handle_comment_end_state(),
            TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(),
            TokenizerState::DOCTYPE => self.handle_doctype_state(),
            TokenizerState::BeforeDOCTYPEName => self.handle_before_doctype_name_state(),
            TokenizerState::DOCTYPEName => self.handle_doctype_name_state(),
            TokenizerState::AfterDOCTYPEName => self.handle_after_doctype_name_state(),
            TokenizerState::AfterDOCTYPEPublicKeyword => self.handle_after_doctype_keyword_state(true),
            TokenizerState::AfterDOCTYPESystemKeyword => self.handle_after_doctype_keyword_state(false),
            TokenizerState::BeforeDOCTYPEPublicIdentifier => {
                self.handle_before_doctype_identifier_state(true);
            }
            TokenizerState::BeforeDOCTYPESystemIdentifier => {
                self.handle_before_doctype_identifier_state(false);
            }
            TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted => {
                self.handle_doctype_identifier_quoted_state(true, '"');
            }
            TokenizerState::DOCTYPEPublicIdentifierSingleQuoted => {
                self.handle_doctype_identifier_quoted_state(true, '\'');
            }
            TokenizerState::DOCTYPESystemIdentifierDoubleQuoted => {
                self.handle_doctype_identifier_quoted_state(false, '"');
            }
            TokenizerState::DOCTYPESystemIdentifierSingleQuoted => {
                self.handle_doctype_identifier_quoted_state(false, '\'');
            }
            TokenizerState::AfterDOCTYPEPublicIdentifier => self.handle_after_doctype_public_identifier_state(),
            TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers => {
                self.handle_between_doctype_identifiers_state();
            }
            TokenizerState::AfterDOCTYPESystemIdentifier => self.handle_after_doctype_system_identifier_state(),
            TokenizerState::BogusDOCTYPE => self.handle_bogus_doctype_state(),
            TokenizerState::CDATASection => self.handle_cdata_section_state(),
            TokenizerState::CDATASectionBracket => self.handle_cdata_section_bracket_state(),
            TokenizerState::CDATASectionEnd => self.handle_cdata_section_end_state(),
        }
    }

    /// The current tokenizer state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Switch state on behalf of the tree builder, e.g. into RCDATA after a
    /// `<title>` start tag.
    pub fn transition(&mut self, state: TokenizerState) {
        self.switch_to(state);
    }

    /// [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    ///
    /// "When a start tag token is emitted with its self-closing flag set, if
    /// the flag is not acknowledged when it is processed by the tree
    /// construction stage, that is a parse error."
    pub const fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_flag_acknowledged = true;
    }

    /// Allow or forbid CDATA sections, per the adjusted current node.
    pub const fn set_allow_cdata(&mut self, allow: bool) {
        self.allow_cdata = allow;
    }

    /// Seed the last start tag name, as fragment parsing does with the
    /// context element so `</title>` can close an RCDATA fragment.
    pub fn set_last_start_tag_name(&mut self, name: Option<&str>) {
        self.last_start_tag_name = name.map(str::to_string);
    }

    /// Current position in the normalized input, in characters.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.reader.pos()
    }

    /// Parse errors recorded so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        self.errors.as_slice()
    }

    /// Take the recorded errors. Tracking is off afterwards.
    pub fn take_errors(&mut self) -> ParseErrorList {
        std::mem::take(&mut self.errors)
    }

    /// Record a parse error at the current position.
    pub(crate) fn error(&mut self, message: impl core::fmt::Display) {
        if self.errors.can_add_error() {
            let position = self.reader.pos();
            self.errors.add(position, message);
        }
    }

    // =========================================================================
    // Text states
    // =========================================================================

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.reader.current() {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => {
                self.reader.advance();
                self.emit_character_reference();
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => self.advance_transition(TokenizerState::TagOpen),
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            Some('\0') => {
                self.error("Unexpected null character in data");
                self.reader.advance();
                self.emit_char('\0');
            }
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof(),
            // "Anything else - Emit the current input character as a character token."
            Some(_) => {
                let run = self.reader.consume_to_any(&['&', '<', '\0']);
                self.emit_str(&run);
            }
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    fn handle_rcdata_state(&mut self) {
        match self.reader.current() {
            Some('&') => {
                self.reader.advance();
                self.emit_character_reference();
            }
            Some('<') => self.advance_transition(TokenizerState::RCDATALessThanSign),
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit a U+FFFD REPLACEMENT CHARACTER character token."
            Some('\0') => {
                self.error("Unexpected null character in RCDATA");
                self.reader.advance();
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(_) => {
                let run = self.reader.consume_to_any(&['&', '<', '\0']);
                self.emit_str(&run);
            }
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    fn handle_rawtext_state(&mut self) {
        self.handle_raw_text_state(TokenizerState::RAWTEXTLessThanSign);
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    fn handle_script_data_state(&mut self) {
        self.handle_raw_text_state(TokenizerState::ScriptDataLessThanSign);
    }

    /// RAWTEXT and script data differ only in where `<` leads.
    fn handle_raw_text_state(&mut self, less_than_state: TokenizerState) {
        match self.reader.current() {
            Some('<') => self.advance_transition(less_than_state),
            Some('\0') => {
                self.error("Unexpected null character in raw text");
                self.reader.advance();
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(_) => {
                let run = self.reader.consume_to_any(&['<', '\0']);
                self.emit_str(&run);
            }
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    fn handle_plaintext_state(&mut self) {
        match self.reader.current() {
            Some('\0') => {
                self.error("Unexpected null character in PLAINTEXT");
                self.reader.advance();
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(_) => {
                let run = self.reader.consume_to('\0');
                self.emit_str(&run);
            }
        }
    }

    /// Data and RCDATA: "Flush code points consumed as a character reference",
    /// or emit the `&` itself when nothing matched.
    fn emit_character_reference(&mut self) {
        match self.consume_character_reference(None, false) {
            Some(decoded) => self.emit_str(&decoded),
            None => self.emit_char('&'),
        }
    }

    // =========================================================================
    // Tag states
    // =========================================================================

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.reader.current() {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration open state."
            Some('!') => self.advance_transition(TokenizerState::MarkupDeclarationOpen),
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => self.advance_transition(TokenizerState::EndTagOpen),
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the
            // bogus comment state."
            Some('?') => {
                self.error("Unexpected '?' instead of tag name");
                self.create_bogus_comment();
            }
            // "ASCII alpha - Create a new start tag token, set its tag name to the
            // empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.tag.reset(TagKind::Start);
                self.switch_to(TokenizerState::TagName);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token and an end-of-file token."
            None => {
                self.error("EOF before tag name");
                self.emit_char('<');
                self.switch_to(TokenizerState::Data);
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the data state."
            Some(_) => {
                self.error("Invalid first character of tag name");
                self.emit_char('<');
                self.switch_to(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.reader.current() {
            // "ASCII alpha - Create a new end tag token... Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.tag.reset(TagKind::End);
                self.switch_to(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name parse
            // error. Switch to the data state."
            Some('>') => {
                self.error("Missing end tag name");
                self.advance_transition(TokenizerState::Data);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token, a U+002F SOLIDUS character token
            // and an end-of-file token."
            None => {
                self.error("EOF before end tag name");
                self.emit_str("</");
                self.switch_to(TokenizerState::Data);
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Create a comment token whose data is the empty string.
            // Reconsume in the bogus comment state."
            Some(_) => {
                self.error("Invalid first character of end tag name");
                self.create_bogus_comment();
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        // "ASCII upper alpha - Append the lowercase version of the current input
        // character to the current tag token's tag name."
        let name = self.reader.consume_to_any(&TAG_NAME_DELIMITERS);
        self.tag.append_tag_name(&name.to_ascii_lowercase());

        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => self.switch_to(TokenizerState::BeforeAttributeName),
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            Some('\0') => {
                self.error("Unexpected null character in tag name");
                self.tag.push_tag_name('\u{FFFD}');
            }
            // "EOF - This is an eof-in-tag parse error. Emit an end-of-file token."
            None => self.eof_in_tag(),
            Some(c) => self.tag.push_tag_name(c),
        }
    }

    /// RCDATA, RAWTEXT, script data and escaped script data less-than sign:
    /// a `/` may start an end tag, anything else is literal text.
    fn handle_text_less_than_sign_state(&mut self, text_state: TokenizerState, end_tag_open: TokenizerState) {
        if self.reader.matches('/') {
            self.temporary_buffer.clear();
            self.advance_transition(end_tag_open);
        } else {
            self.emit_char('<');
            self.switch_to(text_state);
        }
    }

    /// "ASCII alpha - Create a new end tag token, set its tag name to the empty
    /// string. Reconsume in the ... end tag name state."
    /// "Anything else - Emit a U+003C LESS-THAN SIGN character token and a
    /// U+002F SOLIDUS character token. Reconsume in the ... state."
    fn handle_text_end_tag_open_state(&mut self, text_state: TokenizerState, end_tag_name: TokenizerState) {
        if self.reader.matches_letter() {
            self.tag.reset(TagKind::End);
            self.switch_to(end_tag_name);
        } else {
            self.emit_str("</");
            self.switch_to(text_state);
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// Shared by the RAWTEXT, script data and escaped script data end tag name
    /// states, which differ only in the state "anything else" returns to.
    fn handle_text_end_tag_name_state(&mut self, text_state: TokenizerState) {
        if self.reader.matches_letter() {
            let letters = self.reader.consume_letter_sequence();
            self.tag.append_tag_name(&letters.to_ascii_lowercase());
            self.temporary_buffer.push_str(&letters);
            return;
        }

        let appropriate = self.is_appropriate_end_tag_token();
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') if appropriate => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') if appropriate => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') if appropriate => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token, a
            // U+002F SOLIDUS character token, and a character token for each of
            // the characters in the temporary buffer. Reconsume in the state."
            _ => {
                self.reader.unconsume();
                self.emit_char('<');
                self.emit_char('/');
                let buffered = std::mem::take(&mut self.temporary_buffer);
                self.emit_str(&buffered);
                self.switch_to(text_state);
            }
        }
    }

    // =========================================================================
    // Attribute states
    // =========================================================================

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.reader.consume() {
            // "U+0009 ..., U+0020 SPACE - Ignore the character."
            Some('\t' | '\n' | '\x0C' | ' ') => {}
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF - Reconsume
            // in the after attribute name state."
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error. Start a
            // new attribute in the current tag token. Set that attribute's name
            // to the current input character, and its value to the empty string."
            Some('=') => {
                self.error("Unexpected '=' before attribute name");
                self.start_attribute();
                self.tag.push_attribute_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            // "Anything else - Start a new attribute in the current tag token.
            // Reconsume in the attribute name state."
            Some(_) => {
                self.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        let name = self.reader.consume_to_any(&ATTRIBUTE_NAME_DELIMITERS);
        self.tag.append_attribute_name(&name.to_ascii_lowercase());

        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ' | '/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('\0') => {
                self.error("Unexpected null character in attribute name");
                self.tag.push_attribute_name('\u{FFFD}');
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C
            // LESS-THAN SIGN (<) - This is an
            // unexpected-character-in-attribute-name parse error. Treat it as
            // per the "anything else" entry below."
            Some(c) => {
                self.error(format_args!("Unexpected character {c:?} in attribute name"));
                self.tag.push_attribute_name(c);
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => self.eof_in_tag(),
            Some(_) => {
                self.start_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-attribute-value
            // parse error. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.error("Missing attribute value");
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        let value = self.reader.consume_to_any(&[quote, '&', '\0']);
        self.tag.append_attribute_value(&value);

        match self.reader.consume() {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            Some('&') => self.append_attribute_character_reference(Some(quote)),
            Some('\0') => {
                self.error("Unexpected null character in attribute value");
                self.tag.push_attribute_value('\u{FFFD}');
            }
            None => self.eof_in_tag(),
            Some(c) => self.tag.push_attribute_value(c),
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        let value = self.reader.consume_to_any(&UNQUOTED_VALUE_DELIMITERS);
        self.tag.append_attribute_value(&value);

        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => self.switch_to(TokenizerState::BeforeAttributeName),
            Some('&') => self.append_attribute_character_reference(Some('>')),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            Some('\0') => {
                self.error("Unexpected null character in attribute value");
                self.tag.push_attribute_value('\u{FFFD}');
            }
            None => self.eof_in_tag(),
            // "U+0022 ("), U+0027 ('), U+003C (<), U+003D (=), U+0060 (`) - This
            // is an unexpected-character-in-unquoted-attribute-value parse error.
            // Treat it as per the "anything else" entry below."
            Some(c) => {
                self.error(format_args!("Unexpected character {c:?} in unquoted attribute value"));
                self.tag.push_attribute_value(c);
            }
        }
    }

    /// Attribute values: decode a character reference into the value, or keep
    /// the `&` literally when nothing matched.
    fn append_attribute_character_reference(&mut self, additional_allowed: Option<char>) {
        match self.consume_character_reference(additional_allowed, true) {
            Some(decoded) => self.tag.append_attribute_value(&decoded),
            None => self.tag.push_attribute_value('&'),
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.reader.consume() {
            Some('\t' | '\n' | '\x0C' | ' ') => self.switch_to(TokenizerState::BeforeAttributeName),
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => self.eof_in_tag(),
            // "Anything else - This is a missing-whitespace-between-attributes
            // parse error. Reconsume in the before attribute name state."
            Some(_) => {
                self.error("Missing whitespace between attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.reader.consume() {
            // "U+003E GREATER-THAN SIGN (>) - Set the self-closing flag of the
            // current tag token. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.tag.set_self_closing();
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => self.eof_in_tag(),
            // "Anything else - This is an unexpected-solidus-in-tag parse error.
            // Reconsume in the before attribute name state."
            Some(_) => {
                self.error("Unexpected solidus in tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// "EOF - This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The tag in progress is dropped.
    fn eof_in_tag(&mut self) {
        self.error("EOF in tag");
        self.switch_to(TokenizerState::Data);
        self.emit_eof();
    }
}
