use serde::{Deserialize, Serialize};

use super::RecordError;

/// Extension used for every record file in the store
pub const RECORD_EXTENSION: &str = "md";

/// Structured metadata block at the top of a record file.
///
/// Every field is optional so that a decoded record reports exactly what
/// the file contains; defaulting is left to the caller. Keys this type
/// does not know about are kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mvp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scorers: Option<Vec<Scorer>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<Photo>>,
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorer {
    pub name: String,
    #[serde(default)]
    pub minute: Option<u32>,
}

/// A photo attached to a record. Always written as `{path, caption}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PhotoEntry")]
pub struct Photo {
    pub path: String,
    pub caption: String,
}

impl Photo {
    pub fn new(path: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            caption: caption.into(),
        }
    }
}

/// On-disk shapes a photo entry may take. Older records list bare paths.
#[derive(Deserialize)]
#[serde(untagged)]
enum PhotoEntry {
    Path(String),
    Full {
        path: String,
        #[serde(default)]
        caption: Option<String>,
    },
}

impl From<PhotoEntry> for Photo {
    fn from(entry: PhotoEntry) -> Self {
        match entry {
            PhotoEntry::Path(path) => Photo::new(path, ""),
            PhotoEntry::Full { path, caption } => Photo::new(path, caption.unwrap_or_default()),
        }
    }
}

/// One match: frontmatter plus free-form narrative text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl MatchRecord {
    pub fn new(frontmatter: Frontmatter, body: impl Into<String>) -> Self {
        Self {
            frontmatter,
            body: body.into(),
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.frontmatter.date.as_deref()
    }

    pub fn opponent(&self) -> Option<&str> {
        self.frontmatter.opponent.as_deref()
    }

    /// MVP name, treating an empty string the same as no MVP
    pub fn mvp(&self) -> Option<&str> {
        self.frontmatter.mvp.as_deref().filter(|name| !name.is_empty())
    }

    pub fn attendance(&self) -> &[String] {
        self.frontmatter.attendance.as_deref().unwrap_or_default()
    }

    pub fn photos(&self) -> &[Photo] {
        self.frontmatter.photos.as_deref().unwrap_or_default()
    }

    pub fn scorers(&self) -> &[Scorer] {
        self.frontmatter.scorers.as_deref().unwrap_or_default()
    }

    pub fn has_photo(&self, path: &str) -> bool {
        self.photos().iter().any(|photo| photo.path == path)
    }

    /// Store filename derived from the record's identity
    pub fn file_name(&self) -> Result<String, RecordError> {
        let date = self.date().ok_or(RecordError::InvalidField {
            field: "date",
            reason: "missing".to_string(),
        })?;
        let opponent = self.opponent().ok_or(RecordError::InvalidField {
            field: "opponent",
            reason: "missing".to_string(),
        })?;
        Ok(record_file_name(date, opponent))
    }
}

pub fn record_file_name(date: &str, opponent: &str) -> String {
    format!("{}-{}.{}", date, opponent, RECORD_EXTENSION)
}

/// Leading `YYYY-MM-DD` of a record filename, if it has one
pub fn date_from_file_name(file: &str) -> Option<&str> {
    let date = file.get(..10)?;
    let valid = date.char_indices().all(|(idx, ch)| match idx {
        4 | 7 => ch == '-',
        _ => ch.is_ascii_digit(),
    });
    valid.then_some(date)
}

/// Store-relative photo path, always with forward slashes
pub fn photo_path(date: &str, filename: &str) -> String {
    format!("photos/{}/{}", date, filename)
}
