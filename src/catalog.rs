use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{I18nError, I18nResult};
use crate::translator::Translate;

/// File name of the catalog for `language` inside the i18n directory
pub fn catalog_filename(language: &str) -> String {
    format!("contents+{}.po", language)
}

/// Translations of one language, keyed by source text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn with_message(&mut self, source: &str, translation: &str) -> &mut Self {
        self.messages
            .insert(source.to_owned(), translation.to_owned());
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Parses `.po` text.
    ///
    /// The header entry and untranslated entries are skipped, so lookups for
    /// them fall back to the source text.
    pub fn parse(content: &str) -> Self {
        let mut catalog = Catalog::new();
        let mut field: Option<Field> = None;
        let mut msgid = String::new();
        let mut msgstr = String::new();

        let mut flush = |msgid: &mut String, msgstr: &mut String| {
            if !msgid.is_empty() && !msgstr.is_empty() {
                catalog
                    .messages
                    .insert(std::mem::take(msgid), std::mem::take(msgstr));
            }
            msgid.clear();
            msgstr.clear();
        };

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() {
                flush(&mut msgid, &mut msgstr);
                field = None;
                continue;
            }

            if let Some(rest) = line.strip_prefix("msgid ") {
                if matches!(field, Some(Field::Msgstr | Field::Other)) {
                    // entries not separated by a blank line
                    flush(&mut msgid, &mut msgstr);
                }
                msgid = unquote(rest);
                field = Some(Field::Msgid);
            } else if let Some(rest) = line.strip_prefix("msgstr[0] ") {
                msgstr = unquote(rest);
                field = Some(Field::Msgstr);
            } else if let Some(rest) = line.strip_prefix("msgstr ") {
                msgstr = unquote(rest);
                field = Some(Field::Msgstr);
            } else if line.starts_with("msgstr[")
                || line.starts_with("msgid_plural ")
                || line.starts_with("msgctxt ")
            {
                field = Some(Field::Other);
            } else if line.starts_with('"') {
                match field {
                    Some(Field::Msgid) => msgid.push_str(&unquote(line)),
                    Some(Field::Msgstr) => msgstr.push_str(&unquote(line)),
                    _ => {}
                }
            }
        }
        flush(&mut msgid, &mut msgstr);
        catalog
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Msgid,
    Msgstr,
    Other,
}

/// Remove surrounding quotes and reverse the template escapes.
fn unquote(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

impl Translate for Catalog {
    fn gettext<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        match self.messages.get(text) {
            Some(translation) => Cow::Borrowed(translation.as_str()),
            None => Cow::Borrowed(text),
        }
    }
}

/// Load a catalog from a `.po` file
///
/// # Errors
/// - File read errors, including a missing file
pub fn load_catalog_from_file(path: &Path) -> I18nResult<Catalog> {
    let content = fs::read_to_string(path).map_err(|e| I18nError::io(path, e))?;
    Ok(Catalog::parse(&content))
}

/// Catalogs of all target languages
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    catalogs: HashMap<String, Catalog>,
    empty: Catalog,
}

impl Catalogs {
    pub fn new() -> Self {
        Catalogs::default()
    }

    pub fn with_catalog(&mut self, language: &str, catalog: Catalog) -> &mut Self {
        self.catalogs.insert(language.to_string(), catalog);
        self
    }

    /// Loads `contents+<language>.po` from `i18n_dir` for each language.
    ///
    /// A missing catalog is the normal state of a language nobody has
    /// translated yet and yields an empty catalog; an unreadable one is
    /// reported and treated the same way.
    pub fn load(i18n_dir: &Path, languages: &[String]) -> Self {
        let mut catalogs = Catalogs::new();
        for language in languages {
            let path: PathBuf = i18n_dir.join(catalog_filename(language));
            let catalog = match load_catalog_from_file(&path) {
                Ok(catalog) => {
                    debug!("Loaded {} messages for '{}'", catalog.len(), language);
                    catalog
                }
                Err(I18nError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    debug!("No catalog for '{}' at {}", language, path.display());
                    Catalog::new()
                }
                Err(e) => {
                    warn!("Ignoring catalog for '{}': {}", language, e);
                    Catalog::new()
                }
            };
            catalogs.with_catalog(language, catalog);
        }
        catalogs
    }

    /// Lookup for `language`; unknown languages get an empty catalog
    pub fn for_language(&self, language: &str) -> &Catalog {
        self.catalogs.get(language).unwrap_or(&self.empty)
    }

    /// Translation of `text` into `language`, or `text` itself
    pub fn translate<'a>(&'a self, text: &'a str, language: &str) -> Cow<'a, str> {
        self.for_language(language).gettext(text)
    }
}
