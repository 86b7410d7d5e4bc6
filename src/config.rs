//! Project configuration from `configs/i18n.ini`
//!
//! ```ini
//! content = en
//! translations = de, fr
//! url_prefix = https://example.com/
//! translate_paragraphwise = false
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{I18nError, I18nResult};
use crate::ini::{Ini, is_truthy};
use crate::reconstruct::Granularity;
use crate::translator::validate_language;

/// Location of the configuration file inside a project
pub const CONFIG_FILE: &str = "configs/i18n.ini";

pub const DEFAULT_I18N_PATH: &str = "i18n";
pub const DEFAULT_URL_PREFIX: &str = "http://localhost/";
pub const DEFAULT_CONTENT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub enabled: bool,
    /// Directory of the template and catalogs, relative to the project root
    pub i18n_path: PathBuf,
    pub url_prefix: String,
    pub paragraphwise: bool,
    pub content_language: String,
    /// Target languages; always includes the content language
    pub languages: Vec<String>,
}

impl Config {
    /// Builds the configuration from parsed INI options.
    ///
    /// `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// - `ConfigurationMissing` if `translations` is not set
    /// - `InvalidLanguage` for a malformed language code
    pub fn from_ini(ini: &Ini, path: &Path) -> I18nResult<Self> {
        let enabled = ini.get("enable").is_none_or(is_truthy);
        let content_language = ini
            .get("content")
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CONTENT_LANGUAGE)
            .to_string();

        let translations = ini
            .get("translations")
            .ok_or_else(|| I18nError::ConfigurationMissing {
                option: "translations".to_string(),
                path: path.to_path_buf(),
            })?;
        let mut languages: Vec<String> = translations
            .replace(' ', "")
            .split(',')
            .filter(|language| !language.is_empty())
            .map(str::to_string)
            .collect();
        if !languages.contains(&content_language) {
            languages.push(content_language.clone());
        }

        validate_language(&content_language)?;
        for language in &languages {
            validate_language(language)?;
        }

        Ok(Config {
            enabled,
            i18n_path: PathBuf::from(ini.get("i18npath").unwrap_or(DEFAULT_I18N_PATH)),
            url_prefix: ini
                .get("url_prefix")
                .unwrap_or(DEFAULT_URL_PREFIX)
                .to_string(),
            paragraphwise: ini.get("translate_paragraphwise").is_some_and(is_truthy),
            content_language,
            languages,
        })
    }

    /// Reads `configs/i18n.ini` below `project_root`; a missing file counts
    /// as an empty configuration.
    pub fn load(project_root: &Path) -> I18nResult<Self> {
        let path = project_root.join(CONFIG_FILE);
        let ini = match fs::read_to_string(&path) {
            Ok(content) => Ini::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No configuration at {}", path.display());
                Ini::default()
            }
            Err(e) => return Err(I18nError::io(&path, e)),
        };
        Config::from_ini(&ini, &path)
    }

    pub fn granularity(&self) -> Granularity {
        Granularity::from_paragraphwise(self.paragraphwise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(content: &str) -> I18nResult<Config> {
        Config::from_ini(&Ini::parse(content), Path::new(CONFIG_FILE))
    }

    #[test]
    fn test_defaults() {
        let config = config("translations = de").unwrap();
        assert!(config.enabled);
        assert_eq!(config.i18n_path, PathBuf::from("i18n"));
        assert_eq!(config.url_prefix, "http://localhost/");
        assert_eq!(config.granularity(), Granularity::Line);
        assert_eq!(config.content_language, "en");
        assert_eq!(config.languages, vec!["de", "en"]);
    }

    #[test]
    fn test_all_options() {
        let config = config(
            "enable = False\ni18npath = locale\nurl_prefix = https://example.com/\ntranslate_paragraphwise = True\ncontent = de\ntranslations = en, fr , de\n",
        )
        .unwrap();
        assert!(!config.enabled);
        assert_eq!(config.i18n_path, PathBuf::from("locale"));
        assert_eq!(config.url_prefix, "https://example.com/");
        assert_eq!(config.granularity(), Granularity::Paragraph);
        assert_eq!(config.content_language, "de");
        assert_eq!(config.languages, vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_missing_translations() {
        let err = config("content = en").unwrap_err();
        assert!(matches!(
            err,
            I18nError::ConfigurationMissing { ref option, .. } if option == "translations"
        ));
        assert_eq!(
            err.to_string(),
            "Please specify the 'translations' configuration option in configs/i18n.ini"
        );
    }

    #[test]
    fn test_gettext_language_codes_kept_as_configured() {
        let config = config("translations = pt_BR, de").unwrap();
        assert_eq!(config.languages, vec!["pt_BR", "de", "en"]);
    }

    #[test]
    fn test_invalid_language() {
        assert!(matches!(
            config("translations = de, not_a language!"),
            Err(I18nError::InvalidLanguage { .. })
        ));
    }

    #[test]
    fn test_missing_file_reports_missing_translations() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(I18nError::ConfigurationMissing { .. })
        ));
    }
}
