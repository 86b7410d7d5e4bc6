/// Whether a run of document text is structure or user-facing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Keys, block delimiters, blank lines and other structure copied verbatim
    Raw,
    /// Text handed to the translation lookup
    Translatable,
}

/// A contiguous run of a content document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Span {
            kind,
            text: text.into(),
        }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Span::new(SpanKind::Raw, text)
    }

    pub fn translatable(text: impl Into<String>) -> Self {
        Span::new(SpanKind::Translatable, text)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// An ordered span sequence in which no two neighbours share a kind.
///
/// Pushing a span whose kind matches the last span appends its text to that
/// span instead of starting a new one, so the list is always minimal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanList(Vec<Span>);

impl SpanList {
    pub fn new() -> Self {
        SpanList(Vec::new())
    }

    pub fn push(&mut self, span: Span) {
        match self.0.last_mut() {
            Some(last) if last.kind == span.kind => last.text.push_str(&span.text),
            _ => self.0.push(span),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Span> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Span] {
        &self.0
    }

    /// Concatenation of every span's text, i.e. the document the spans describe
    pub fn concat(&self) -> String {
        self.0.iter().map(|span| span.text.as_str()).collect()
    }
}

impl FromIterator<Span> for SpanList {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        let mut list = SpanList::new();
        for span in iter {
            list.push(span);
        }
        list
    }
}

impl IntoIterator for SpanList {
    type Item = Span;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpanList {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Folds adjacent spans of the same kind into one.
///
/// Merging is driven purely by adjacency; running it on an already merged
/// sequence returns the same sequence.
pub fn merge_spans<I>(spans: I) -> SpanList
where
    I: IntoIterator<Item = Span>,
{
    spans.into_iter().collect()
}
