//! Insertion mode handlers.
//!
//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)
//!
//! Every handler takes the token by reference and returns false when the
//! token was ignored. Character tokens carry whole runs of text, so rules that
//! treat whitespace and other characters differently split the run first.

/// After body, frameset and after after modes.
mod after;
/// The "in body" mode.
mod body;
/// Foreign content rules and dispatch.
mod foreign;
/// Initial through after head, plus the "text" mode.
mod head;
/// "in select" and "in select in table".
mod select;
/// The table family of modes.
mod table;

/// "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF),
/// U+000D CARRIAGE RETURN (CR), or U+0020 SPACE"
pub(crate) const fn is_html_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

/// True if `data` consists only of HTML whitespace.
pub(crate) fn is_all_whitespace(data: &str) -> bool {
    data.chars().all(is_html_whitespace)
}

/// Split a character run into its leading whitespace and the rest.
pub(crate) fn split_leading_whitespace(data: &str) -> (&str, &str) {
    let end = data
        .find(|c: char| !is_html_whitespace(c))
        .unwrap_or(data.len());
    data.split_at(end)
}
