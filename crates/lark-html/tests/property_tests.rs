//! Property tests: arbitrary input never panics and always yields a
//! well-formed document.

use std::collections::HashSet;

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use lark_html::tokenizer::{CharacterReader, normalize_newlines};
use lark_html::{
    HTMLTokenizer, HTMLTreeBuilder, ParserSettings, Token, parse_document, parse_fragment,
};

/// Markup assembled from pieces that exercise many insertion modes.
#[derive(Debug, Clone)]
struct Markup(String);

const PIECES: &[&str] = &[
    // Document structure
    "<!DOCTYPE html>", "<html>", "</html>", "<head>", "</head>", "<body>", "</body>",
    "<frameset>", "<frame>", "</frameset>", "<noframes>", "</noframes>",
    // Head content
    "<title>", "</title>", "<meta>", "<link>", "<base>", "<style>", "</style>", "<script>",
    "</script>", "<noscript>", "</noscript>", "<template>", "</template>",
    // Blocks and lists
    "<p>", "</p>", "<div>", "</div>", "<pre>", "<listing>", "<li>", "</li>", "<ul>", "</ul>",
    "<dd>", "<dt>", "<h1>", "</h2>", "<form>", "</form>", "<button>", "</button>", "<hr>",
    "<plaintext>", "<textarea>", "</textarea>", "<xmp>", "<iframe>", "<image>", "<isindex>",
    // Formatting and markers
    "<b>", "</b>", "<i>", "</i>", "<a href=x>", "</a>", "<nobr>", "<b class=x>", "<applet>",
    "</applet>", "<object>", "</object>", "<marquee>",
    // Tables
    "<table>", "</table>", "<caption>", "</caption>", "<colgroup>", "</colgroup>", "<col>",
    "<tbody>", "</tbody>", "<thead>", "<tfoot>", "<tr>", "</tr>", "<td>", "</td>", "<th>",
    "</th>",
    // Select
    "<select>", "</select>", "<option>", "</option>", "<optgroup>", "</optgroup>", "<input>",
    "<keygen>",
    // Foreign content
    "<svg>", "</svg>", "<math>", "</math>", "<mi>", "<mtext>", "<annotation-xml>", "<circle/>",
    "<foreignObject>", "</foreignObject>", "<desc>", "<font color=red>", "<![CDATA[x]]>",
    // Text and markup fragments
    "<!-- c -->", "<?pi?>", "&amp;", "&notin", "&#0;", "text", " ", "\n", "\r\n", "\0", "<",
    "</", "&", "\"", "'", "=", "/>",
];

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 40;
        let mut out = String::new();
        for _ in 0..len {
            if u8::arbitrary(g) % 4 == 0 {
                out.push(char::arbitrary(g));
            } else {
                out.push_str(g.choose(PIECES).copied().unwrap_or_default());
            }
        }
        Self(out)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// Contexts covering every reset-insertion-mode branch and tokenizer state.
const CONTEXTS: &[&str] = &[
    "div", "body", "html", "head", "table", "tbody", "tr", "td", "caption", "colgroup",
    "select", "frameset", "template", "title", "textarea", "style", "script", "noscript",
    "plaintext", "svg", "math", "form",
];

#[quickcheck]
fn prop_normalize_newlines_removes_carriage_returns(input: String) -> bool {
    !normalize_newlines(&input).contains('\r')
}

#[quickcheck]
fn prop_normalize_newlines_is_idempotent(input: String) -> bool {
    let once = normalize_newlines(&input).into_owned();
    normalize_newlines(&once) == once
}

#[quickcheck]
fn prop_reader_position_stays_in_bounds(input: String, ops: Vec<u8>) -> bool {
    let mut reader = CharacterReader::new(&input);
    let len = reader.len();
    for op in ops {
        match op % 4 {
            0 => {
                let _ = reader.consume();
            }
            1 => reader.unconsume(),
            2 => {
                let _ = reader.consume_to('<');
            }
            _ => reader.advance(),
        }
        if reader.pos() > len {
            return false;
        }
    }
    true
}

#[quickcheck]
fn prop_tokenizer_ends_with_single_eof(markup: Markup) -> bool {
    let tokens = HTMLTokenizer::new(&markup.0).run();
    tokens.last() == Some(&Token::EndOfFile)
        && tokens.iter().filter(|token| token.is_eof()).count() == 1
}

#[quickcheck]
fn prop_document_always_has_skeleton(markup: Markup) -> bool {
    let Ok(parsed) = parse_document(&markup.0, &ParserSettings::default()) else {
        return false;
    };
    let tree = parsed.tree;
    tree.document_element().is_some() && tree.head().is_some() && tree.body().is_some()
}

#[quickcheck]
fn prop_error_list_respects_limit(markup: Markup, limit: u8) -> bool {
    let max_errors = usize::from(limit % 16);
    let settings = ParserSettings::default().with_max_errors(max_errors);
    parse_document(&markup.0, &settings).is_ok_and(|parsed| parsed.errors.len() <= max_errors)
}

#[quickcheck]
fn prop_fragment_parsing_never_fails(markup: Markup) -> bool {
    CONTEXTS
        .iter()
        .all(|context| parse_fragment(&markup.0, context, &ParserSettings::default()).is_ok())
}

#[quickcheck]
fn prop_scripting_flag_never_changes_the_skeleton(markup: Markup) -> bool {
    let settings = ParserSettings::default().with_scripting(true).with_max_errors(8);
    parse_document(&markup.0, &settings).is_ok_and(|parsed| {
        parsed.tree.head().is_some() && parsed.tree.body().is_some()
    })
}

#[quickcheck]
fn prop_open_elements_are_unique(markup: Markup) -> bool {
    let Ok(mut builder) = HTMLTreeBuilder::new(&markup.0, &ParserSettings::default()) else {
        return false;
    };
    loop {
        let open = builder.open_elements();
        let unique: HashSet<_> = open.iter().collect();
        if unique.len() != open.len() {
            return false;
        }
        if !builder.step() {
            return true;
        }
    }
}
