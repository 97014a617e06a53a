use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordError;

#[derive(Debug, Error)]
pub enum StatsError {
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

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
