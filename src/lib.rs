//! Translation support for Lektor-style content trees
//!
//! Translatable texts are extracted from `contents.lr` documents into a
//! gettext template (`contents.pot`). Once translators have produced
//! `contents+<language>.po` catalogs, every document is rebuilt per language
//! with only its translatable parts replaced.
//!
//! # Workflow Example
//!
//! ```ignore
//! use contents_i18n::{Project, TranslationMemory};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let project = Project::open("my-site")?;
//!
//!     // 1. Write contents+<language>.lr from the existing catalogs
//!     project.translate_contents()?;
//!
//!     // 2. Collect translatable texts and their provenance
//!     let mut memory = TranslationMemory::new();
//!     project.collect(&mut memory)?;
//!
//!     // 3. Write i18n/contents.pot for translators
//!     project.write_template(&memory)?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod ini;
pub mod memory;
pub mod metaformat;
pub mod mock;
pub mod model;
pub mod paragraphs;
pub mod parser;
pub mod pot;
pub mod project;
pub mod reconstruct;
pub mod span;
pub mod translator;
pub mod walker;

// Re-export the main types for convenient access
pub use catalog::{Catalog, Catalogs};
pub use config::Config;
pub use error::{I18nError, I18nResult};
pub use memory::{MemoryEntry, TranslationMemory};
pub use metaformat::{Document, FlowBlock};
pub use model::{DataModel, FieldDecl, FieldKind, ModelRegistry, Models};
pub use parser::Parser;
pub use project::{ContentDocument, Project, Summary};
pub use reconstruct::{Granularity, Reconstructor};
pub use span::{Span, SpanKind, SpanList, merge_spans};
pub use translator::{Translate, Untranslated};
pub use walker::{FieldWalker, Source};
