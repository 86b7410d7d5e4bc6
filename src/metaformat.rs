//! Key/value block format of content documents (`contents.lr`).
//!
//! ```text
//! title: Hello
//! ---
//! body:
//!
//! Some *markdown* text.
//! ```
//!
//! A document is a sequence of sections separated by `---` lines. The first
//! line of a section is `key: value`; when the value is empty the section
//! body starts on the following line. Literal dash lines inside a value are
//! escaped with an extra dash.
//!
//! Flow fields embed further documents as blocks started by `#### name ####`
//! marker lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{I18nError, I18nResult};

static FLOW_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^####\s*([^#]*?)\s*####\s*$").expect("flow block pattern is valid")
});

static FLOW_UNESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#####(.*?)#####(\s*)$").expect("flow unescape pattern is valid")
});

/// One `key: value` section of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: String,
    /// Value lines; every line but the last keeps its `\n`
    pub lines: Vec<String>,
}

/// Ordered sections of a tokenized document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        tokenize(text.lines())
    }

    /// Lines of the section named `key`; the last one wins on duplicates
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .rev()
            .find(|section| section.key == key)
            .map(|section| section.lines.as_slice())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn is_dash_line(line: &str) -> bool {
    let stripped = line.trim();
    stripped.len() >= 3 && stripped.chars().all(|c| c == '-')
}

fn finish_value(buf: &mut Vec<String>) -> Vec<String> {
    let mut lines: Vec<String> = buf
        .drain(..)
        .map(|line| {
            if is_dash_line(&line) {
                line.chars().skip(1).collect()
            } else {
                line
            }
        })
        .collect();
    if let Some(last) = lines.last_mut() {
        if last.ends_with('\n') {
            last.pop();
        }
    }
    lines
}

/// Tokenizes document lines into sections.
///
/// Line terminators in the input are normalised to `\n`.
pub fn tokenize<I, S>(lines: I) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sections = Vec::new();
    let mut key: Option<String> = None;
    let mut buf: Vec<String> = Vec::new();
    let mut want_newline = false;

    for raw in lines {
        let line = format!("{}\n", raw.as_ref().trim_end_matches(['\r', '\n']));
        if line.trim_end() == "---" {
            want_newline = false;
            if let Some(key) = key.take() {
                sections.push(Section {
                    key,
                    lines: finish_value(&mut buf),
                });
            }
        } else if key.is_some() {
            if want_newline {
                want_newline = false;
                if line.trim().is_empty() {
                    continue;
                }
            }
            buf.push(line);
        } else if let Some((name, rest)) = line.split_once(':') {
            key = Some(name.trim().to_string());
            let first = rest.trim_matches([' ', '\t']);
            buf.clear();
            if first.trim().is_empty() {
                want_newline = true;
            } else {
                buf.push(first.to_string());
            }
        }
    }

    if let Some(key) = key {
        sections.push(Section {
            key,
            lines: finish_value(&mut buf),
        });
    }
    Document { sections }
}

/// A named block of a flow field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowBlock {
    pub name: String,
    /// Body lines with their line terminators
    pub lines: Vec<String>,
}

impl FlowBlock {
    pub fn document(&self) -> Document {
        tokenize(&self.lines)
    }
}

/// Splits the raw value of a flow field into its blocks.
///
/// Blank lines before the first block marker are ignored; any other text
/// there is an error.
pub fn parse_flow_blocks(raw: &str) -> I18nResult<Vec<FlowBlock>> {
    let mut blocks = Vec::new();
    let mut current: Option<FlowBlock> = None;

    for line in raw.split_inclusive('\n') {
        if current.is_none() && line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = FLOW_BLOCK_RE.captures(line) {
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            current = Some(FlowBlock {
                name: caps[1].to_string(),
                lines: Vec::new(),
            });
            continue;
        }
        match current.as_mut() {
            Some(block) => block
                .lines
                .push(FLOW_UNESCAPE_RE.replace(line, "####$1####$2").into_owned()),
            None => {
                return Err(I18nError::BadFlowBlock(format!(
                    "did not find beginning of flow block before '{}'",
                    line.trim()
                )));
            }
        }
    }

    if let Some(done) = current {
        blocks.push(done);
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple_fields() {
        let doc = Document::parse("title: Hello World\n---\nauthor:  Jane \n");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("title"), Some(&["Hello World".to_string()][..]));
        assert_eq!(doc.get("author"), Some(&["Jane ".to_string()][..]));
    }

    #[test]
    fn test_tokenize_multiline_body() {
        let doc = Document::parse("body:\n\nFirst line\n\nSecond line\n---\n_model: page\n");
        assert_eq!(
            doc.get("body"),
            Some(
                &[
                    "First line\n".to_string(),
                    "\n".to_string(),
                    "Second line".to_string(),
                ][..]
            )
        );
        assert_eq!(doc.get("_model"), Some(&["page".to_string()][..]));
    }

    #[test]
    fn test_tokenize_unescapes_dash_lines() {
        let doc = Document::parse("body:\n\nHeading\n----\ntext\n");
        assert_eq!(doc.get("body").unwrap()[1], "---\n");
    }

    #[test]
    fn test_tokenize_normalises_crlf() {
        let doc = tokenize(["title: Hi\r\n", "---\r\n", "body: Text\r\n"]);
        assert_eq!(doc.get("title"), Some(&["Hi".to_string()][..]));
        assert_eq!(doc.get("body"), Some(&["Text".to_string()][..]));
    }

    #[test]
    fn test_last_duplicate_key_wins() {
        let doc = Document::parse("title: One\n---\ntitle: Two\n");
        assert_eq!(doc.get("title"), Some(&["Two".to_string()][..]));
    }

    #[test]
    fn test_parse_flow_blocks() {
        let raw = "\n#### text ####\ntext: Hello\n---\nclass: wide\n#### image ####\nalt: A cat\n";
        let blocks = parse_flow_blocks(raw).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].name, "text");
        assert_eq!(
            blocks[0].lines,
            vec!["text: Hello\n", "---\n", "class: wide\n"]
        );
        let doc = blocks[0].document();
        assert_eq!(doc.get("text"), Some(&["Hello".to_string()][..]));
        assert_eq!(doc.get("class"), Some(&["wide".to_string()][..]));
        assert_eq!(blocks[1].name, "image");
    }

    #[test]
    fn test_flow_block_marker_unescape() {
        let blocks = parse_flow_blocks("#### text ####\n##### nested #####\n").unwrap();
        assert_eq!(blocks[0].lines, vec!["#### nested ####\n"]);
    }

    #[test]
    fn test_flow_text_before_first_block() {
        let err = parse_flow_blocks("stray text\n#### text ####\n").unwrap_err();
        assert!(matches!(err, I18nError::BadFlowBlock(_)));
    }
}
