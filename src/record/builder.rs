use chrono::NaiveDate;
use tracing::debug;

use super::{
    codec,
    models::photo_path,
    template::{BuiltinTemplate, TemplateProvider, DATE_PLACEHOLDER},
    MatchRecord, Photo, RecordError,
};
use crate::photos::PhotoAsset;

/// Fields collected from the operator when a new match is reported
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub date: String,
    pub opponent: String,
    pub score: String,
    pub location: String,
    pub attendance: Vec<String>,
    pub title: Option<String>,
}

/// Partial update of the match info fields. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPatch {
    pub location: Option<String>,
    pub score: Option<String>,
    pub mvp: Option<String>,
}

impl InfoPatch {
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.score.is_none() && self.mvp.is_none()
    }
}

/// Outcome of attaching photos, so callers can tell the cases apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachReport {
    /// No candidate photos were supplied (e.g. the date has no photo directory)
    NoCandidates,
    /// Every candidate was already attached
    AlreadyAttached,
    Added(usize),
}

/// Builds new records from a template
pub struct RecordBuilder {
    template: Box<dyn TemplateProvider>,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(Box::new(BuiltinTemplate))
    }
}

impl RecordBuilder {
    pub fn new(template: Box<dyn TemplateProvider>) -> Self {
        Self { template }
    }

    /// Creates a fully formed record. Nothing is written to the store.
    pub fn create_record(&self, new: NewRecord) -> Result<MatchRecord, RecordError> {
        validate_date(&new.date)?;
        validate_opponent(&new.opponent)?;

        let skeleton = codec::decode(&self.template.skeleton()?)?;
        let mut frontmatter = skeleton.frontmatter;

        let title = new
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| format!("{} {}", new.date, new.opponent));

        frontmatter.title = Some(title);
        frontmatter.score = Some(new.score);
        frontmatter.location = Some(new.location);
        frontmatter.mvp = None;
        frontmatter.scorers = Some(Vec::new());
        frontmatter.attendance = Some(new.attendance);
        frontmatter.photos = Some(Vec::new());

        let body = skeleton.body.replace(DATE_PLACEHOLDER, &new.date);
        frontmatter.date = Some(new.date);
        frontmatter.opponent = Some(new.opponent);

        Ok(MatchRecord::new(frontmatter, body))
    }
}

/// Appends photos whose path is not yet attached. Body is left untouched.
///
/// `captions` is index-aligned with `assets`; missing entries become empty
/// captions. When the same path appears twice, the first caption wins.
pub fn attach_photos(
    record: &MatchRecord,
    assets: &[PhotoAsset],
    captions: Option<&[String]>,
) -> (MatchRecord, AttachReport) {
    if assets.is_empty() {
        return (record.clone(), AttachReport::NoCandidates);
    }

    let mut updated = record.clone();
    let photos = updated.frontmatter.photos.get_or_insert_with(Vec::new);
    let mut added = 0;

    for (index, asset) in assets.iter().enumerate() {
        if photos.iter().any(|photo| photo.path == asset.path) {
            continue;
        }
        let caption = captions
            .and_then(|captions| captions.get(index))
            .cloned()
            .unwrap_or_default();
        photos.push(Photo::new(asset.path.clone(), caption));
        added += 1;
    }

    debug!(candidates = assets.len(), added, "Attached photos");

    let report = if added == 0 {
        AttachReport::AlreadyAttached
    } else {
        AttachReport::Added(added)
    };
    (updated, report)
}

/// Overwrites only the fields present in the patch
pub fn update_info(record: &MatchRecord, patch: InfoPatch) -> MatchRecord {
    let mut updated = record.clone();
    if let Some(location) = patch.location {
        updated.frontmatter.location = Some(location);
    }
    if let Some(score) = patch.score {
        updated.frontmatter.score = Some(score);
    }
    if let Some(mvp) = patch.mvp {
        updated.frontmatter.mvp = Some(mvp);
    }
    updated
}

/// Checks `YYYY-MM-DD` shape and that the day exists on the calendar
pub fn validate_date(date: &str) -> Result<NaiveDate, RecordError> {
    let shape_ok = date.len() == 10
        && date.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(RecordError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| RecordError::InvalidDate(date.to_string()))
}

/// Splits an operator-typed roster on commas (ASCII or full-width) and whitespace
pub fn parse_roster(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c == '，' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_opponent(opponent: &str) -> Result<(), RecordError> {
    if opponent.trim().is_empty() {
        return Err(RecordError::InvalidField {
            field: "opponent",
            reason: "must not be empty".to_string(),
        });
    }
    if opponent.contains(['/', '\\']) {
        return Err(RecordError::InvalidField {
            field: "opponent",
            reason: "must not contain path separators".to_string(),
        });
    }
    Ok(())
}

/// Photo asset for a file already known to live under `photos/{date}/`
pub(crate) fn asset_for(date: &str, filename: &str) -> PhotoAsset {
    PhotoAsset::new(filename.to_string(), photo_path(date, filename))
}
