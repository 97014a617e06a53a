use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PhotoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PhotoError::Io {
            path: path.into(),
            source,
        }
    }
}
