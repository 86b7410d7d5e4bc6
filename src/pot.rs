//! Gettext template (`.pot`) formatting for the translation memory.
//!
//! The output is stable for a given memory: entries are ordered by their
//! sorted provenance list and then by text, so re-running the extraction on an
//! unchanged content tree only changes the creation date.

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::{I18nError, I18nResult};
use crate::memory::TranslationMemory;

/// Creation date in the format gettext tools write, e.g. `2024-05-01 13:37+0200`
pub fn creation_date() -> String {
    Local::now().format("%Y-%m-%d %H:%M%z").to_string()
}

/// Fixed template header block, terminated by a blank line
pub fn header(content_language: &str, created: &str) -> String {
    format!(
        concat!(
            "msgid \"\"\n",
            "msgstr \"\"\n",
            "\"Project-Id-Version: PACKAGE VERSION\\n\"\n",
            "\"Report-Msgid-Bugs-To: \\n\"\n",
            "\"POT-Creation-Date: {created}\\n\"\n",
            "\"PO-Revision-Date: YEAR-MO-DA HO:MI+ZONE\\n\"\n",
            "\"Last-Translator: FULL NAME <EMAIL@ADDRESS>\\n\"\n",
            "\"Language-Team: {language} <LL@li.org>\\n\"\n",
            "\"Language: {language}\\n\"\n",
            "\"MIME-Version: 1.0\\n\"\n",
            "\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
            "\"Content-Transfer-Encoding: 8bit\\n\"\n",
            "\n",
        ),
        created = created,
        language = content_language,
    )
}

/// Escapes backslash, newline, tab and double quote for a quoted PO string.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '"' => escaped.push_str("\\\""),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders the whole memory as template text.
///
/// Entries with an empty text are left out. Each entry is a reference comment
/// listing all provenances, the escaped `msgid`, an empty `msgstr` and a
/// blank separator line.
pub fn render(memory: &TranslationMemory, content_language: &str, created: &str) -> String {
    let mut entries: Vec<(Vec<&str>, &str)> = memory
        .iter()
        .filter(|entry| !entry.text.is_empty())
        .map(|entry| {
            let mut sources: Vec<&str> = entry.sources.iter().map(String::as_str).collect();
            sources.sort_unstable();
            (sources, entry.text.as_str())
        })
        .collect();
    entries.sort();

    let mut pot = header(content_language, created);
    for (sources, text) in entries {
        pot.push_str(&format!(
            "#: {}\nmsgid \"{}\"\nmsgstr \"\"\n\n",
            sources.join(" "),
            escape(text)
        ));
    }
    pot
}

/// Writes the template to `path`, creating its directory when needed.
pub fn write(memory: &TranslationMemory, path: &Path, content_language: &str) -> I18nResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| I18nError::io(parent, e))?;
    }
    let pot = render(memory, content_language, &creation_date());
    fs::write(path, pot).map_err(|e| I18nError::io(path, e))
}
