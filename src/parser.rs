use std::sync::LazyLock;

use regex::Regex;

use crate::span::{Span, SpanList, merge_spans};

/// `#### name ####` style block tags; more hashes than the minimum are allowed.
static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^###(#+)\s*([^#]*?)\s*###(#+)\s*$").expect("block tag pattern is valid")
});

/// `key: value` header on the first line of a block.
static KEY_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9._-]+)(\s*):(\s*)(.*)$").expect("key/value pattern is valid")
});

/// Returns true when `stripped` is a block delimiter (3+ dashes).
///
/// A dash line is the same thing as a markdown level 2 heading underline, so
/// it only counts as a delimiter when the previous line held a `key:` pair.
fn starts_new_block(stripped: &str, previous_line: Option<&str>) -> bool {
    match previous_line {
        Some(previous) if previous.contains(':') => {
            stripped.len() >= 3 && stripped.chars().all(|c| c == '-')
        }
        _ => false,
    }
}

/// Splits a block header line into raw key, separator, value and line ending.
///
/// Returns `None` when the line is not a `key: value` pair.
fn split_key_value(line: &str) -> Option<Vec<Span>> {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let content = body.trim_end();
    let ending = &body[content.len()..];

    let caps = KEY_VALUE_RE.captures(content)?;
    let separator = caps.get(3)?;
    let value = caps.get(4).map_or("", |m| m.as_str());

    let mut spans = vec![Span::raw(format!(
        "{}{}",
        indent,
        &content[..separator.start()]
    ))];
    if !value.is_empty() {
        spans.push(Span::raw(separator.as_str()));
        spans.push(Span::translatable(value));
    }
    if !ending.is_empty() {
        spans.push(Span::raw(ending));
    }
    Some(spans)
}

/// Line classifier for content documents.
///
/// The first line of every block may be a `key: value` header; as soon as a
/// block turns out to be free-form content, every following line up to the
/// next block boundary is translatable verbatim.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier<'a> {
    lines_in_block: usize,
    in_content: bool,
    previous_line: Option<&'a str>,
}

impl<'a> LineClassifier<'a> {
    pub fn new() -> Self {
        LineClassifier::default()
    }

    pub fn lines_in_block(&self) -> usize {
        self.lines_in_block
    }

    pub fn in_content(&self) -> bool {
        self.in_content
    }

    /// Classifies one raw line (including its line terminator) and advances
    /// the state. The returned spans are not merged.
    pub fn process_line(&mut self, line: &'a str) -> Vec<Span> {
        let stripped = line.trim();
        if stripped.is_empty() {
            // blank lines leave the block state and the previous line untouched
            return vec![Span::raw(line)];
        }

        let mut spans = Vec::new();
        if starts_new_block(stripped, self.previous_line) || BLOCK_TAG_RE.is_match(stripped) {
            self.lines_in_block = 0;
            self.in_content = false;
            spans.push(Span::raw(line));
        } else {
            self.lines_in_block += 1;
            let header = if self.lines_in_block == 1 && !self.in_content {
                split_key_value(line)
            } else {
                None
            };
            match header {
                Some(parts) => spans.extend(parts),
                None => self.in_content = true,
            }
        }

        if self.in_content {
            spans.push(Span::translatable(line));
        }
        self.previous_line = Some(line);
        spans
    }
}

/// Classifies an ordered sequence of raw lines and merges the result.
pub fn parse_lines<'a, I>(lines: I) -> SpanList
where
    I: IntoIterator<Item = &'a str>,
{
    let mut classifier = LineClassifier::new();
    let spans: Vec<Span> = lines
        .into_iter()
        .flat_map(|line| classifier.process_line(line))
        .collect();
    merge_spans(spans)
}

/// A parser splitting a content document into raw and translatable spans.
///
/// Concatenating the spans always gives back the input byte for byte.
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser { input }
    }

    /// Raw lines of the input, each keeping its own line terminator
    pub fn lines(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.input.split_inclusive('\n')
    }

    /// Spans as emitted line by line, before merging
    pub fn classify(&self) -> Vec<Span> {
        let mut classifier = LineClassifier::new();
        self.lines()
            .flat_map(|line| classifier.process_line(line))
            .collect()
    }

    pub fn parse(&self) -> SpanList {
        parse_lines(self.lines())
    }
}
