use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },

    #[error("No {action} command available on {os}")]
    Unsupported { action: &'static str, os: String },
}
