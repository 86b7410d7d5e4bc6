//! Data models describing the fields of pages and flow blocks.
//!
//! Models are declared in INI files inside the project:
//!
//! ```ini
//! ; models/page.ini
//! [model]
//! name = Page
//!
//! [fields.title]
//! type = string
//! translate = True
//!
//! [fields.blocks]
//! type = flow
//! ```
//!
//! Page models live in `models/`, flow block models in `flowblocks/`; the
//! file stem is the model id.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{I18nError, I18nResult};
use crate::ini::{Ini, is_truthy};

/// Model id used for pages that do not name one in a `_model` field
pub const DEFAULT_MODEL: &str = "page";

/// How a field's value is structured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text value
    Scalar,
    /// A sequence of named blocks, each with fields of its own block model
    Flow,
}

impl FieldKind {
    pub fn from_type_name(type_name: &str) -> Self {
        if type_name.trim() == "flow" {
            FieldKind::Flow
        } else {
            FieldKind::Scalar
        }
    }
}

/// A declared field of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub translate: bool,
    pub kind: FieldKind,
}

impl FieldDecl {
    pub fn new(name: &str, translate: bool, kind: FieldKind) -> Self {
        FieldDecl {
            name: name.to_string(),
            translate,
            kind,
        }
    }
}

/// A page or flow block model with its fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataModel {
    pub id: String,
    pub fields: Vec<FieldDecl>,
}

impl DataModel {
    pub fn from_ini(id: &str, ini: &Ini) -> Self {
        let fields = ini
            .subsections("fields")
            .into_iter()
            .map(|name| {
                let option = |key: &str| ini.get(&format!("fields.{}.{}", name, key));
                FieldDecl {
                    translate: option("translate").is_some_and(is_truthy),
                    kind: FieldKind::from_type_name(option("type").unwrap_or("string")),
                    name,
                }
            })
            .collect();
        DataModel {
            id: id.to_string(),
            fields,
        }
    }
}

/// Lookup of page models and flow block models by id
pub trait ModelRegistry {
    fn page_model(&self, id: &str) -> Option<&DataModel>;

    fn flow_block(&self, name: &str) -> Option<&DataModel>;
}

/// Models loaded from a project directory
#[derive(Debug, Clone, Default)]
pub struct Models {
    pages: HashMap<String, DataModel>,
    flow_blocks: HashMap<String, DataModel>,
}

impl Models {
    pub fn new() -> Self {
        Models::default()
    }

    pub fn with_page_model(&mut self, model: DataModel) -> &mut Self {
        self.pages.insert(model.id.clone(), model);
        self
    }

    pub fn with_flow_block(&mut self, model: DataModel) -> &mut Self {
        self.flow_blocks.insert(model.id.clone(), model);
        self
    }

    /// Loads `models/*.ini` and `flowblocks/*.ini` below `project_root`.
    ///
    /// Missing directories are treated as empty.
    pub fn load(project_root: &Path) -> I18nResult<Self> {
        let mut models = Models::new();
        for model in load_models_from_dir(&project_root.join("models"))? {
            models.with_page_model(model);
        }
        for model in load_models_from_dir(&project_root.join("flowblocks"))? {
            models.with_flow_block(model);
        }
        debug!(
            "Loaded {} page models and {} flow block models",
            models.pages.len(),
            models.flow_blocks.len()
        );
        Ok(models)
    }
}

impl ModelRegistry for Models {
    fn page_model(&self, id: &str) -> Option<&DataModel> {
        self.pages.get(id)
    }

    fn flow_block(&self, name: &str) -> Option<&DataModel> {
        self.flow_blocks.get(name)
    }
}

fn load_models_from_dir(dir: &Path) -> I18nResult<Vec<DataModel>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| I18nError::io(dir, e))?;
    let mut models = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| I18nError::io(dir, e))?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("ini") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let content = fs::read_to_string(&path).map_err(|e| I18nError::io(&path, e))?;
        models.push(DataModel::from_ini(id, &Ini::parse(&content)));
    }
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_from_ini() {
        let ini = Ini::parse(
            "[model]\nname = Page\n\n[fields.title]\ntype = string\ntranslate = True\n\n[fields.blocks]\ntype = flow\n\n[fields.slug]\ntranslate = no\n",
        );
        let model = DataModel::from_ini("page", &ini);
        assert_eq!(model.id, "page");
        assert_eq!(
            model.fields,
            vec![
                FieldDecl::new("title", true, FieldKind::Scalar),
                FieldDecl::new("blocks", false, FieldKind::Flow),
                FieldDecl::new("slug", false, FieldKind::Scalar),
            ]
        );
    }

    #[test]
    fn test_load_from_project() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("models")).unwrap();
        fs::create_dir_all(dir.path().join("flowblocks")).unwrap();
        fs::write(
            dir.path().join("models/page.ini"),
            "[fields.title]\ntype = string\ntranslate = true\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("flowblocks/text.ini"),
            "[block]\nname = Text\n[fields.text]\ntype = markdown\ntranslate = 1\n",
        )
        .unwrap();
        fs::write(dir.path().join("models/README.txt"), "not a model").unwrap();

        let models = Models::load(dir.path()).unwrap();
        assert!(models.page_model("page").is_some());
        assert!(models.page_model("README").is_none());
        let text = models.flow_block("text").unwrap();
        assert_eq!(text.fields, vec![FieldDecl::new("text", true, FieldKind::Scalar)]);
    }

    #[test]
    fn test_load_without_model_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let models = Models::load(dir.path()).unwrap();
        assert!(models.page_model(DEFAULT_MODEL).is_none());
    }
}
