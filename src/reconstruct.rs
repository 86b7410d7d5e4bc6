//! Reconstruction of translated content documents
//!
//! A document is split into raw and translatable spans by the structure
//! parser. Raw spans are copied verbatim; translatable spans go through the
//! translation lookup, either one physical line at a time or one paragraph
//! at a time. Whitespace around the looked-up text is kept exactly as in the
//! source, so an untranslated document comes out byte-identical.

use crate::error::{I18nError, I18nResult};
use crate::paragraphs::{Piece, paragraph_pieces, strip_newlines};
use crate::parser::Parser;
use crate::span::{Span, SpanKind, SpanList};
use crate::translator::Translate;

/// Smallest unit handed to the translation lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// Every non-blank physical line, stripped of surrounding whitespace
    #[default]
    Line,
    /// Every paragraph, stripped of surrounding line breaks
    Paragraph,
}

impl Granularity {
    pub fn from_paragraphwise(paragraphwise: bool) -> Self {
        if paragraphwise {
            Granularity::Paragraph
        } else {
            Granularity::Line
        }
    }
}

/// Replaces `inner` (a subslice of `outer`) with `replacement`.
fn splice(outer: &str, start: usize, inner: &str, replacement: &str) -> String {
    let end = start + inner.len();
    format!("{}{}{}", &outer[..start], replacement, &outer[end..])
}

/// Translates each physical line, keeping its own leading and trailing whitespace.
pub fn translate_linewise<T: Translate + ?Sized>(content: &str, translator: &T) -> String {
    content
        .split('\n')
        .map(|line| {
            let stripped = line.trim();
            if stripped.is_empty() {
                return line.to_string();
            }
            let start = line.len() - line.trim_start().len();
            splice(line, start, stripped, &translator.gettext(stripped))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Translates one paragraph. Lookup keys use `\n` line breaks, as extracted
/// texts do; a CRLF paragraph gets its translation back with CRLF breaks.
fn translate_paragraph<T: Translate + ?Sized>(paragraph: &str, translator: &T) -> Option<String> {
    if !paragraph.contains("\r\n") {
        return Some(translator.gettext(paragraph).into_owned());
    }
    let key = paragraph.replace("\r\n", "\n");
    let translated = translator.gettext(&key);
    if translated == key {
        return None;
    }
    Some(translated.replace("\r\n", "\n").replace('\n', "\r\n"))
}

/// Translates each paragraph, keeping the separators between paragraphs and
/// the line breaks around each of them.
pub fn translate_paragraphwise<T: Translate + ?Sized>(content: &str, translator: &T) -> String {
    let mut result = String::with_capacity(content.len());
    for piece in paragraph_pieces(content) {
        match piece {
            Piece::Separator(separator) => result.push_str(separator),
            Piece::Paragraph(paragraph) => {
                let stripped = strip_newlines(paragraph);
                if stripped.is_empty() {
                    result.push_str(paragraph);
                    continue;
                }
                let Some(translated) = translate_paragraph(stripped, translator) else {
                    result.push_str(paragraph);
                    continue;
                };
                let start = paragraph.len() - paragraph.trim_start_matches(['\r', '\n']).len();
                result.push_str(&splice(paragraph, start, stripped, &translated));
            }
        }
    }
    result
}

/// Rebuilds documents from their spans with a translation lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconstructor {
    granularity: Granularity,
}

impl Reconstructor {
    pub fn new(granularity: Granularity) -> Self {
        Reconstructor { granularity }
    }

    /// Produces the translated version of `source`.
    ///
    /// # Errors
    ///
    /// `StructuralInconsistency` if the parsed spans do not add up to the
    /// source document; nothing is produced for the document in that case.
    pub fn reconstruct<T: Translate + ?Sized>(
        &self,
        source: &str,
        translator: &T,
    ) -> I18nResult<String> {
        let spans = Parser::new(source).parse();
        check_spans(source, &spans)?;
        Ok(self.render(&spans, translator))
    }

    /// Writes out `spans`, translating the translatable ones
    pub fn render<T: Translate + ?Sized>(&self, spans: &SpanList, translator: &T) -> String {
        let mut output = String::new();
        for Span { kind, text } in spans {
            match kind {
                SpanKind::Raw => output.push_str(text),
                SpanKind::Translatable => output.push_str(&match self.granularity {
                    Granularity::Line => translate_linewise(text, translator),
                    Granularity::Paragraph => translate_paragraphwise(text, translator),
                }),
            }
        }
        output
    }
}

fn check_spans(source: &str, spans: &SpanList) -> I18nResult<()> {
    let mut offset = 0;
    for (index, span) in spans.iter().enumerate() {
        if index > 0 && spans.get(index - 1).map(|prev| prev.kind) == Some(span.kind) {
            return Err(I18nError::StructuralInconsistency(format!(
                "spans {} and {} share kind {:?}",
                index - 1,
                index,
                span.kind
            )));
        }
        if !source[offset..].starts_with(span.text.as_str()) {
            return Err(I18nError::StructuralInconsistency(format!(
                "span {} does not match the document at byte {}",
                index, offset
            )));
        }
        offset += span.text.len();
    }
    if offset != source.len() {
        return Err(I18nError::StructuralInconsistency(format!(
            "spans cover {} of {} bytes",
            offset,
            source.len()
        )));
    }
    Ok(())
}
