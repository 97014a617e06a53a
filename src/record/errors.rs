use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed record: {reason}")]
    Malformed { reason: String },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Record already exists: {file}")]
    DuplicateRecord { file: String },

    #[error("Record not found: {file}")]
    NotFound { file: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RecordError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RecordError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        RecordError::Malformed {
            reason: reason.into(),
        }
    }
}
