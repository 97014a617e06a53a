use strum_macros::{Display, EnumIter};

use crate::photos::PhotoAsset;
use crate::record::InfoPatch;

/// Closing line appended to every report drafted through a session
pub const DEFAULT_FOOTER: &str = "**莫愁前路无知己，长风破浪会有时！**";

/// Body text used when nothing was drafted
pub const BODY_PLACEHOLDER: &str = "比赛详情待补充...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SessionState {
    Idle,
    Drafting,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SessionAction {
    Start,
    AppendText,
    AddPhoto,
    UpdateInfo,
    Cancel,
    Finish,
}

/// Everything gathered for a report that has not been saved yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub date: String,
    pub opponent: String,
    pub paragraphs: Vec<String>,
    pub photos: Vec<PhotoAsset>,
    pub captions: Vec<String>,
    pub info: InfoPatch,
}

impl Draft {
    pub fn new(date: impl Into<String>, opponent: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            opponent: opponent.into(),
            ..Self::default()
        }
    }

    /// Drafted text, or the placeholder when nothing was written
    pub fn text(&self) -> String {
        if self.paragraphs.is_empty() {
            BODY_PLACEHOLDER.to_string()
        } else {
            self.paragraphs.join("\n")
        }
    }
}
