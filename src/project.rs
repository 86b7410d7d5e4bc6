//! A site project on disk and the extraction/translation phases run on it
//!
//! ```text
//! project/
//!   configs/i18n.ini
//!   models/*.ini
//!   flowblocks/*.ini
//!   content/**/contents.lr
//!   i18n/contents.pot, contents+<language>.po
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::catalog::Catalogs;
use crate::config::Config;
use crate::error::{I18nError, I18nResult};
use crate::memory::TranslationMemory;
use crate::metaformat::Document;
use crate::model::{DEFAULT_MODEL, ModelRegistry, Models};
use crate::pot;
use crate::reconstruct::Reconstructor;
use crate::walker::{FieldWalker, Source};

pub const CONTENT_DIR: &str = "content";
pub const TEMPLATE_FILE: &str = "contents.pot";

const PRIMARY_DOCUMENT: &str = "contents.lr";

/// File name of the translated document for `language`
pub fn document_filename(language: &str) -> String {
    format!("contents+{}.lr", language)
}

/// A `contents.lr` or `contents+<alt>.lr` file in the content tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDocument {
    pub path: PathBuf,
    /// URL path of the page, `/` for the root page
    pub url_path: String,
    pub alt: Option<String>,
}

impl ContentDocument {
    pub fn is_primary(&self) -> bool {
        self.alt.is_none()
    }

    /// Recognizes content document file names; `None` for any other file.
    fn from_path(path: &Path, content_dir: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let alt = if name == PRIMARY_DOCUMENT {
            None
        } else {
            let alt = name.strip_prefix("contents+")?.strip_suffix(".lr")?;
            if alt.is_empty() {
                return None;
            }
            Some(alt.to_string())
        };

        let dir = path.parent()?.strip_prefix(content_dir).ok()?;
        let segments: Vec<_> = dir
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect();
        let url_path = if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", segments.join("/"))
        };

        Some(ContentDocument {
            path: path.to_path_buf(),
            url_path,
            alt,
        })
    }
}

/// Counts of one phase run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Documents processed
    pub documents: usize,
    /// Documents skipped because of a recoverable error
    pub skipped: usize,
}

#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    config: Config,
    models: Models,
}

impl Project {
    /// Opens the project at `root`, loading its configuration and models.
    ///
    /// # Errors
    ///
    /// Configuration errors (a missing `translations` option, invalid
    /// language codes) and unreadable model files.
    pub fn open(root: impl Into<PathBuf>) -> I18nResult<Self> {
        let root = root.into();
        let config = Config::load(&root)?;
        let models = Models::load(&root)?;
        Ok(Project {
            root,
            config,
            models,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn i18n_dir(&self) -> PathBuf {
        self.root.join(&self.config.i18n_path)
    }

    pub fn template_path(&self) -> PathBuf {
        self.i18n_dir().join(TEMPLATE_FILE)
    }

    /// All content documents in sorted path order
    pub fn documents(&self) -> Vec<ContentDocument> {
        let content_dir = self.root.join(CONTENT_DIR);
        if !content_dir.is_dir() {
            debug!("No content directory at {}", content_dir.display());
            return Vec::new();
        }

        WalkDir::new(&content_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable content entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| ContentDocument::from_path(entry.path(), &content_dir))
            .collect()
    }

    /// Records the translatable texts of every content document in `memory`.
    pub fn collect(&self, memory: &mut TranslationMemory) -> I18nResult<Summary> {
        let mut summary = Summary::default();
        if !self.config.enabled {
            info!("Translation is disabled, skipping extraction");
            return Ok(summary);
        }

        let mut walker = FieldWalker::new(
            &self.models,
            memory,
            &self.config.content_language,
            &self.config.url_prefix,
            self.config.granularity(),
        );
        for document in self.documents() {
            let text = match fs::read_to_string(&document.path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping document: {}", I18nError::io(&document.path, e));
                    summary.skipped += 1;
                    continue;
                }
            };

            let sections = Document::parse(&text);
            let model_id = sections
                .get("_model")
                .map(|lines| lines.concat().trim().to_string())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string());
            let Some(model) = self.models.page_model(&model_id) else {
                warn!(
                    "Skipping {}: unknown model '{}'",
                    document.path.display(),
                    model_id
                );
                summary.skipped += 1;
                continue;
            };

            let source = Source::new(&document.url_path, &document.path, document.alt.as_deref());
            walker.walk(&model.fields, &sections, &source, &model.id, &self.root);
            summary.documents += 1;
        }

        info!(
            "Collected translatable texts from {} documents ({} skipped)",
            summary.documents, summary.skipped
        );
        Ok(summary)
    }

    /// Writes the memory as `contents.pot` into the i18n directory.
    pub fn write_template(&self, memory: &TranslationMemory) -> I18nResult<()> {
        if !self.config.enabled {
            info!("Translation is disabled, not writing a template");
            return Ok(());
        }
        let path = self.template_path();
        pot::write(memory, &path, &self.config.content_language)?;
        info!("Wrote {} messages to {}", memory.len(), path.display());
        Ok(())
    }

    /// Writes `contents+<language>.lr` next to every primary document for
    /// each target language.
    ///
    /// # Errors
    ///
    /// Only failures to write a translated document are returned; documents
    /// that cannot be read or reconstructed are skipped.
    pub fn translate_contents(&self) -> I18nResult<Summary> {
        let mut summary = Summary::default();
        if !self.config.enabled {
            info!("Translation is disabled, not writing translated documents");
            return Ok(summary);
        }

        let catalogs = Catalogs::load(&self.i18n_dir(), &self.config.languages);
        let reconstructor = Reconstructor::new(self.config.granularity());

        for document in self.documents().into_iter().filter(ContentDocument::is_primary) {
            let text = match fs::read_to_string(&document.path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping document: {}", I18nError::io(&document.path, e));
                    summary.skipped += 1;
                    continue;
                }
            };

            for language in &self.config.languages {
                let translated =
                    match reconstructor.reconstruct(&text, catalogs.for_language(language)) {
                        Ok(translated) => translated,
                        Err(e) => {
                            warn!(
                                "Not translating {} into '{}': {}",
                                document.path.display(),
                                language,
                                e
                            );
                            continue;
                        }
                    };
                let target = document.path.with_file_name(document_filename(language));
                fs::write(&target, translated).map_err(|e| I18nError::io(&target, e))?;
                debug!("Wrote {}", target.display());
            }
            summary.documents += 1;
        }

        info!(
            "Translated {} documents into {} languages",
            summary.documents,
            self.config.languages.len()
        );
        Ok(summary)
    }
}
