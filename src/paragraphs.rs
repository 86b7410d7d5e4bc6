use std::sync::LazyLock;

use regex::Regex;

/// One or more blank lines between two paragraphs.
static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:\s*\n)+").expect("paragraph break pattern is valid"));

/// Splits text into paragraphs separated by one or more blank lines.
///
/// The separators are dropped; trailing newlines of the last paragraph are
/// kept, so `"A\nB\n\nC\n"` gives `["A\nB", "C\n"]`.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK_RE.split(text).collect()
}

/// A piece of text produced by [`paragraph_pieces`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Paragraph(&'a str),
    Separator(&'a str),
}

/// Like [`split_paragraphs`], but keeps the separators so the pieces
/// concatenate back to the input.
pub fn paragraph_pieces(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for found in PARAGRAPH_BREAK_RE.find_iter(text) {
        pieces.push(Piece::Paragraph(&text[last..found.start()]));
        pieces.push(Piece::Separator(found.as_str()));
        last = found.end();
    }
    pieces.push(Piece::Paragraph(&text[last..]));
    pieces
}

/// Strips carriage returns and line feeds (only) from both ends.
pub fn strip_newlines(text: &str) -> &str {
    text.trim_matches(|c| c == '\r' || c == '\n')
}
