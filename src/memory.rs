//! Translation memory
//!
//! Ordered mapping from every translatable text found in the content tree to
//! the places (provenances) it was found at. One memory is built per run by
//! the orchestrating code and handed by reference to the field walker and to
//! the template formatter.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

/// One translatable text and every location it was seen at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryEntry {
    pub text: String,
    /// Provenance strings in first-seen order, without duplicates
    pub sources: Vec<String>,
}

/// Insertion-ordered, deduplicating store of translatable texts
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct TranslationMemory {
    entries: Vec<MemoryEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl TranslationMemory {
    pub fn new() -> Self {
        TranslationMemory::default()
    }

    /// Records `text` as found at `source`.
    ///
    /// A new text is appended at the end; a known text only gains `source` if
    /// that provenance is not already listed.
    pub fn add(&mut self, text: &str, source: &str) {
        let position = match self.index.get(text) {
            Some(&position) => position,
            None => {
                debug!("Added to translation memory: {}", preview(text));
                self.entries.push(MemoryEntry {
                    text: text.to_string(),
                    sources: Vec::new(),
                });
                self.index.insert(text.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let sources = &mut self.entries[position].sources;
        if !sources.iter().any(|known| known == source) {
            sources.push(source.to_string());
        }
    }

    pub fn get(&self, text: &str) -> Option<&MemoryEntry> {
        self.index.get(text).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, MemoryEntry> {
        self.entries.iter()
    }

    /// Pretty JSON dump of the memory in insertion order, for debugging
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a TranslationMemory {
    type Item = &'a MemoryEntry;
    type IntoIter = std::slice::Iter<'a, MemoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// First 32 characters of `text`, with an ellipsis when truncated
fn preview(text: &str) -> String {
    match text.char_indices().nth(32) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_text_and_sources() {
        let mut memory = TranslationMemory::new();
        memory.add("Hello", "http://localhost/ (content/contents.lr:page.title)");
        memory.add("Hello", "http://localhost/about/ (content/about/contents.lr:page.title)");
        memory.add("Hello", "http://localhost/ (content/contents.lr:page.title)");

        assert_eq!(memory.len(), 1);
        let entry = memory.get("Hello").unwrap();
        assert_eq!(
            entry.sources,
            vec![
                "http://localhost/ (content/contents.lr:page.title)".to_string(),
                "http://localhost/about/ (content/about/contents.lr:page.title)".to_string(),
            ]
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut memory = TranslationMemory::new();
        memory.add("zebra", "a");
        memory.add("apple", "b");
        memory.add("mango", "c");
        let texts: Vec<&str> = memory.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_identity_is_exact_string() {
        let mut memory = TranslationMemory::new();
        memory.add("Hello", "a");
        memory.add("Hello ", "a");
        assert_eq!(memory.len(), 2);
        assert!(!memory.contains("hello"));
    }

    #[test]
    fn test_json_dump() {
        let mut memory = TranslationMemory::new();
        memory.add("Hi", "src");
        let json: serde_json::Value = serde_json::from_str(&memory.to_json().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!([{ "text": "Hi", "sources": ["src"] }]));
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "x".repeat(40);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(32)));
        assert_eq!(preview("short"), "short");
    }
}
