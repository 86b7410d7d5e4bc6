use std::path::PathBuf;

/// Error types for extraction, catalog lookup and document reconstruction
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// A required configuration option is absent
    #[error("Please specify the '{option}' configuration option in {}", path.display())]
    ConfigurationMissing { option: String, path: PathBuf },

    /// A configured language code is not a valid locale identifier
    #[error("Invalid language code '{language}': {reason}")]
    InvalidLanguage { language: String, reason: String },

    /// The span sequence of a document no longer describes the document
    #[error("Structural inconsistency: {0}")]
    StructuralInconsistency(String),

    /// Flow block data that does not start with a block marker
    #[error("Bad flow block: {0}")]
    BadFlowBlock(String),

    /// File system error with the offending path
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl I18nError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        I18nError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_missing_names_option() {
        let err = I18nError::ConfigurationMissing {
            option: "translations".to_string(),
            path: PathBuf::from("configs/i18n.ini"),
        };
        assert_eq!(
            err.to_string(),
            "Please specify the 'translations' configuration option in configs/i18n.ini"
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = I18nError::io(
            "content/contents.lr",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("content/contents.lr"));
    }
}
