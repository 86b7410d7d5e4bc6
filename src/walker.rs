//! Field walker: feeds the translation memory from declared fields.
//!
//! For every field of a page model marked `translate`, the walker splits the
//! field's section into translatable units (lines or paragraphs) and records
//! each of them together with a provenance string:
//!
//! ```text
//! http://localhost/blog/first-post/ (content/blog/first-post/contents.lr:page.title)
//! ```
//!
//! Flow fields are descended into: each block is looked up in the model
//! registry by its name and walked with the block name as zone.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::memory::TranslationMemory;
use crate::metaformat::{Document, parse_flow_blocks};
use crate::model::{FieldDecl, FieldKind, ModelRegistry};
use crate::paragraphs::{split_paragraphs, strip_newlines};
use crate::reconstruct::Granularity;

/// The page a document belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Public URL path of the page, e.g. `/blog/first-post/`
    pub url_path: String,
    /// Path of the document on disk
    pub source_path: PathBuf,
    /// Alternative (language variant) of the document; `None` for the primary one
    pub alt: Option<String>,
}

impl Source {
    pub fn new(url_path: &str, source_path: impl Into<PathBuf>, alt: Option<&str>) -> Self {
        Source {
            url_path: url_path.to_string(),
            source_path: source_path.into(),
            alt: alt.map(str::to_string),
        }
    }
}

/// Resolves `path` against `base` the way a browser resolves a link.
pub fn join_url(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.to_string();
    }
    if path.contains("://") {
        return path.to_string();
    }
    let scheme_end = base.find("://").map(|i| i + 3);
    if let Some(rest) = path.strip_prefix("//") {
        let scheme = scheme_end.map_or("", |end| &base[..end]);
        return format!("{}{}", scheme, rest);
    }
    if path.starts_with('/') {
        let origin = match scheme_end {
            Some(end) => match base[end..].find('/') {
                Some(slash) => &base[..end + slash],
                None => base,
            },
            None => "",
        };
        return format!("{}{}", origin, path);
    }
    match base.rfind('/') {
        Some(slash) if scheme_end.is_none_or(|end| slash >= end) => {
            format!("{}{}", &base[..=slash], path)
        }
        _ => format!("{}/{}", base, path),
    }
}

/// `path` relative to `root`, `/`-separated
pub fn relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Splits a section into translation units
pub fn translation_units(lines: &[String], granularity: Granularity) -> Vec<String> {
    match granularity {
        Granularity::Line => lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Granularity::Paragraph => split_paragraphs(&lines.concat())
            .into_iter()
            .map(strip_newlines)
            .filter(|paragraph| !paragraph.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Walks declared fields of documents and fills a translation memory
pub struct FieldWalker<'a, R: ModelRegistry + ?Sized> {
    registry: &'a R,
    memory: &'a mut TranslationMemory,
    content_language: &'a str,
    url_prefix: &'a str,
    granularity: Granularity,
}

impl<'a, R: ModelRegistry + ?Sized> FieldWalker<'a, R> {
    pub fn new(
        registry: &'a R,
        memory: &'a mut TranslationMemory,
        content_language: &'a str,
        url_prefix: &'a str,
        granularity: Granularity,
    ) -> Self {
        FieldWalker {
            registry,
            memory,
            content_language,
            url_prefix,
            granularity,
        }
    }

    /// Whether texts of `source` belong in the memory: only the primary
    /// document and the one written in the content language do.
    fn wants(&self, source: &Source) -> bool {
        match source.alt.as_deref() {
            None => true,
            Some(alt) => alt == self.content_language,
        }
    }

    /// Records the translatable fields of one document (or flow block).
    ///
    /// # Arguments
    ///
    /// * `fields` - Field declarations of the document's model
    /// * `sections` - The tokenized document
    /// * `source` - Page the document belongs to
    /// * `zone` - Model id or flow block name, used in provenances
    /// * `root` - Project root; provenance paths are relative to it
    pub fn walk(
        &mut self,
        fields: &[FieldDecl],
        sections: &Document,
        source: &Source,
        zone: &str,
        root: &Path,
    ) {
        for field in fields {
            let Some(lines) = sections.get(&field.name) else {
                continue;
            };

            if field.translate && self.wants(source) {
                let provenance = format!(
                    "{} ({}:{}.{})",
                    join_url(self.url_prefix, &source.url_path),
                    relative_path(&source.source_path, root),
                    zone,
                    field.name
                );
                for unit in translation_units(lines, self.granularity) {
                    self.memory.add(&unit, &provenance);
                }
            }

            if field.kind == FieldKind::Flow {
                self.walk_flow(lines, source, root);
            }
        }
    }

    fn walk_flow(&mut self, lines: &[String], source: &Source, root: &Path) {
        let blocks = match parse_flow_blocks(&lines.concat()) {
            Ok(blocks) => blocks,
            Err(e) => {
                warn!("Skipping flow field in {}: {}", source.source_path.display(), e);
                return;
            }
        };

        let registry = self.registry;
        for block in blocks {
            let Some(model) = registry.flow_block(&block.name) else {
                warn!(
                    "Unknown flow block '{}' in {}",
                    block.name,
                    source.source_path.display()
                );
                continue;
            };
            self.walk(&model.fields, &block.document(), source, &block.name, root);
        }
    }
}
