use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to read record {file}: {source}")]
    Record {
        file: String,
        #[source]
        source: RecordError,
    },

    #[error("Failed to list records: {0}")]
    Listing(#[source] RecordError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
