use crate::catalog::CatalogError;
use thiserror::Error;

/// Core error types for kgdash
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input validation failed
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// Catalog lookup or persistence failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// User-facing message with hints on how to recover
    pub fn translate(&self) -> ErrorTranslation {
        match self {
            Error::Catalog(CatalogError::NotFound { kind, id }) => {
                ErrorTranslation::new(format!("{kind} '{id}' is not in the catalog"))
                    .with_suggestion("List known ids with: kgdash list tables --json")
            }
            Error::Catalog(CatalogError::Serialization(e)) | Error::Serialization(e) => {
                ErrorTranslation::new(format!("The catalog file is not valid JSON: {e}"))
                    .with_suggestion("Check the file for trailing commas or unquoted keys")
                    .with_suggestion("Field names are camelCase, e.g. kgStatus, alternateNames")
            }
            Error::Catalog(CatalogError::DataDirUnavailable) => {
                ErrorTranslation::new("Could not determine a data directory for the catalog")
                    .with_suggestion("Pass --catalog PATH or set KGDASH_CATALOG")
            }
            Error::Catalog(CatalogError::Io(e)) | Error::Io(e) => {
                let translation = ErrorTranslation::new(format!("File access failed: {e}"));
                match e.kind() {
                    std::io::ErrorKind::PermissionDenied => translation
                        .with_suggestion("Check ownership and permissions of the catalog file"),
                    std::io::ErrorKind::StorageFull => {
                        translation.with_suggestion("Free up disk space and try again")
                    }
                    _ => translation,
                }
            }
            Error::Validation { field, message } => {
                ErrorTranslation::new(format!("Invalid {field}: {message}"))
            }
        }
    }
}

/// Represents a translated error with helpful context
#[derive(Debug, Clone)]
pub struct ErrorTranslation {
    pub user_message: String,
    pub suggestions: Vec<String>,
}

impl ErrorTranslation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            user_message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_translation() {
        let err = Error::from(CatalogError::NotFound {
            kind: "Table",
            id: "t9".into(),
        });
        assert_eq!(err.to_string(), "Catalog error: Table not found: t9");
        let translation = err.translate();
        assert!(translation.user_message.contains("'t9'"));
        assert!(translation.suggestions.iter().any(|s| s.contains("list tables")));
    }

    #[test]
    fn test_bad_json_translation() {
        let json_err = serde_json::from_str::<serde_json::Value>("{,}").unwrap_err();
        let translation = Error::from(CatalogError::from(json_err)).translate();
        assert!(translation.user_message.contains("not valid JSON"));
        assert_eq!(translation.suggestions.len(), 2);
    }

    #[test]
    fn test_validation_message() {
        let err = Error::validation("page", "must be at least 1");
        assert_eq!(err.to_string(), "Validation error in page: must be at least 1");
        assert_eq!(err.translate().user_message, "Invalid page: must be at least 1");
    }

    #[test]
    fn test_every_variant_has_user_message() {
        let errors = [
            Error::from(std::io::Error::other("boom")),
            Error::from(serde_json::from_str::<u8>("x").unwrap_err()),
            Error::validation("page", "must be at least 1"),
            Error::from(CatalogError::DataDirUnavailable),
        ];
        for err in &errors {
            // Exhaustive so a variant cannot be added without a constructor here
            match err {
                Error::Io(_)
                | Error::Serialization(_)
                | Error::Validation { .. }
                | Error::Catalog(_) => {}
            }
            assert!(!err.translate().user_message.is_empty(), "{err:?}");
        }
    }

    #[test]
    fn test_storage_full_hint() {
        let io = std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full");
        let translation = Error::from(io).translate();
        assert!(translation.suggestions[0].contains("disk space"));
    }
}
