use std::path::PathBuf;

use thiserror::Error;

use crate::hints::HintsError;
use crate::photos::PhotoError;
use crate::platform::PlatformError;
use crate::record::RecordError;
use crate::render::RenderError;
use crate::session::{SessionError, DEFAULT_FOOTER};
use crate::stats::StatsError;

pub const DEFAULT_CLUB_NAME: &str = "知己足球俱乐部";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Store root holding `matches/`, `photos/` and `stats/`
    pub root: PathBuf,
    pub club_name: String,
    /// Closing line for reports drafted interactively
    pub footer: String,
    /// Record skeleton; the built-in one is used when unset
    pub template: Option<PathBuf>,
    /// Where rendered pages go, relative to `root` unless absolute
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            club_name: DEFAULT_CLUB_NAME.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
            template: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl AppConfig {
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Photo(#[from] PhotoError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Hints(#[from] HintsError),

    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
