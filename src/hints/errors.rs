use thiserror::Error;

#[derive(Debug, Error)]
pub enum HintsError {
    #[error("Invalid scorer pattern: {0}")]
    Pattern(#[from] regex::Error),
}
