//! Translation lookup trait and language utilities
//!
//! The reconstructor never talks to catalogs directly. It receives something
//! implementing [`Translate`], which answers "what is the translation of this
//! text?" and falls back to the text itself when it has no answer.
//!
//! # Example
//!
//! ```ignore
//! use contents_i18n::translator::{Translate, Untranslated};
//!
//! assert_eq!(Untranslated.gettext("Hello"), "Hello");
//!
//! let shout = |text: &str| text.to_uppercase();
//! assert_eq!(shout.gettext("Hello"), "HELLO");
//! ```

use std::borrow::Cow;

use icu_locale::Locale;

use crate::error::{I18nError, I18nResult};

/// Lookup capability for one target language
pub trait Translate {
    /// Translation of `text`, or `text` itself when none is known
    ///
    /// # Arguments
    ///
    /// * `text` - Source text, already stripped of surrounding whitespace
    ///
    /// # Returns
    ///
    /// The translated text. A missing translation is not an error; the
    /// implementation returns the source text unchanged.
    fn gettext<'a>(&'a self, text: &'a str) -> Cow<'a, str>;
}

/// Lookup that never translates anything
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn gettext<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn gettext<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        Cow::Owned(self(text))
    }
}

/// Validate that a language code is a well-formed locale identifier
///
/// Gettext style codes (`pt_BR`) and private-use codes (`x-klingon`) are
/// accepted too. The code itself is not rewritten; catalogs and documents
/// keep using it as configured.
///
/// # Example
///
/// ```ignore
/// validate_language("de")?; // OK
/// validate_language("pt_BR")?; // OK
/// validate_language("not a language").unwrap_err(); // Error
/// ```
pub fn validate_language(language: &str) -> I18nResult<()> {
    if language.is_empty() {
        return Err(I18nError::InvalidLanguage {
            language: language.to_string(),
            reason: "language code is empty".to_string(),
        });
    }

    let mut normalized = language.replace('_', "-");
    if normalized.to_ascii_lowercase().starts_with("x-") {
        normalized.insert_str(0, "und-");
    }
    let _: Locale = normalized.parse().map_err(|e| I18nError::InvalidLanguage {
        language: language.to_string(),
        reason: format!("{:?}", e),
    })?;
    Ok(())
}
