//! Mock translation lookup for testing
//!
//! Deterministic, catalog-free lookups for exercising reconstruction without
//! any `.po` files on disk.
//!
//! # Example
//!
//! ```ignore
//! use contents_i18n::mock::{MockMode, MockTranslator};
//! use contents_i18n::translator::Translate;
//!
//! let mock = MockTranslator::new(MockMode::Suffix("de".to_string()));
//! assert_eq!(mock.gettext("hello"), "hello_de");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use crate::translator::Translate;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append a language suffix: "hello" → "hello_de"
    Suffix(String),

    /// Use predefined mappings; unknown texts fall back to the source text
    Mappings(HashMap<String, String>),

    /// Uppercase everything, which keeps lengths stable for offset checks
    Uppercase,

    /// No-op: return input unchanged
    NoOp,
}

/// Mock lookup that simulates a catalog
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self { mode }
    }

    /// Build a `Mappings` mock from `(source, translation)` pairs
    pub fn with_mappings<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(MockMode::Mappings(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

impl Translate for MockTranslator {
    fn gettext<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        match &self.mode {
            MockMode::Suffix(language) => Cow::Owned(format!("{}_{}", text, language)),
            MockMode::Mappings(map) => map
                .get(text)
                .map_or(Cow::Borrowed(text), |translated| {
                    Cow::Borrowed(translated.as_str())
                }),
            MockMode::Uppercase => Cow::Owned(text.to_uppercase()),
            MockMode::NoOp => Cow::Borrowed(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_mode() {
        let mock = MockTranslator::new(MockMode::Suffix("fr".to_string()));
        assert_eq!(mock.gettext("hello"), "hello_fr");
    }

    #[test]
    fn test_mappings_mode() {
        let mock = MockTranslator::with_mappings([("Hello", "Hallo")]);
        assert_eq!(mock.gettext("Hello"), "Hallo");
        assert_eq!(mock.gettext("Unknown"), "Unknown");
    }

    #[test]
    fn test_uppercase_mode() {
        let mock = MockTranslator::new(MockMode::Uppercase);
        assert_eq!(mock.gettext("hello world"), "HELLO WORLD");
    }

    #[test]
    fn test_noop_mode() {
        let mock = MockTranslator::new(MockMode::NoOp);
        assert_eq!(mock.gettext("hello"), "hello");
    }
}
