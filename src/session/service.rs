use tracing::{info, instrument, warn};

use super::{Draft, SessionAction, SessionError, SessionState, DEFAULT_FOOTER};
use crate::record::{
    attach_photos, builder::asset_for, update_info, validate_date, InfoPatch, MatchRecord,
    NewRecord, RecordBuilder, RecordStore,
};

/// Interactive drafting of a single match report.
///
/// `Idle -> Drafting -> Finalized`; `cancel` returns to `Idle` without
/// persisting anything. `Finalized` is terminal, so a new report needs a
/// new session.
pub struct MatchSession {
    state: SessionState,
    draft: Option<Draft>,
    footer: String,
    saved_file: Option<String>,
    builder: RecordBuilder,
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new(DEFAULT_FOOTER, RecordBuilder::default())
    }
}

impl MatchSession {
    /// `builder` supplies the template the finished record starts from
    pub fn new(footer: impl Into<String>, builder: RecordBuilder) -> Self {
        Self {
            state: SessionState::Idle,
            draft: None,
            footer: footer.into(),
            saved_file: None,
            builder,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Store filename written by `finish`
    pub fn saved_file(&self) -> Option<&str> {
        self.saved_file.as_deref()
    }

    #[instrument(skip(self))]
    pub fn start(&mut self, date: &str, opponent: &str) -> Result<(), SessionError> {
        self.expect_state(SessionState::Idle, SessionAction::Start)?;
        validate_date(date)?;

        self.draft = Some(Draft::new(date, opponent));
        self.state = SessionState::Drafting;
        info!(date, opponent, "Drafting started");
        Ok(())
    }

    pub fn append_text(&mut self, text: &str) -> Result<(), SessionError> {
        let draft = self.drafting(SessionAction::AppendText)?;
        draft.paragraphs.push(text.to_string());
        Ok(())
    }

    /// Adds a photo from `photos/{date}/`. Returns false if that path is
    /// already part of the draft.
    pub fn add_photo(&mut self, filename: &str, caption: &str) -> Result<bool, SessionError> {
        let draft = self.drafting(SessionAction::AddPhoto)?;
        let asset = asset_for(&draft.date, filename);
        if draft.photos.iter().any(|photo| photo.path == asset.path) {
            return Ok(false);
        }
        draft.photos.push(asset);
        draft.captions.push(caption.to_string());
        Ok(true)
    }

    pub fn update_info(&mut self, patch: InfoPatch) -> Result<(), SessionError> {
        let draft = self.drafting(SessionAction::UpdateInfo)?;
        if let Some(location) = patch.location {
            draft.info.location = Some(location);
        }
        if let Some(score) = patch.score {
            draft.info.score = Some(score);
        }
        if let Some(mvp) = patch.mvp {
            draft.info.mvp = Some(mvp);
        }
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.expect_state(SessionState::Drafting, SessionAction::Cancel)?;
        self.draft = None;
        self.state = SessionState::Idle;
        info!("Draft cancelled");
        Ok(())
    }

    /// Persists the draft and finalizes the session. If the store rejects
    /// the record the session stays in `Drafting` so the caller can retry.
    #[instrument(skip(self, store))]
    pub fn finish(
        &mut self,
        store: &mut dyn RecordStore,
        overwrite: bool,
    ) -> Result<String, SessionError> {
        self.expect_state(SessionState::Drafting, SessionAction::Finish)?;
        let Some(draft) = self.draft.as_ref() else {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                action: SessionAction::Finish,
            });
        };

        let record = self.build_record(draft)?;
        let file = match store.save(&record, overwrite) {
            Ok(file) => file,
            Err(err) => {
                warn!(error = %err, "Saving draft failed");
                return Err(err.into());
            }
        };

        self.state = SessionState::Finalized;
        self.saved_file = Some(file.clone());
        info!(file = %file, "Draft finalized");
        Ok(file)
    }

    /// Record that `finish` would save, without touching any store
    pub fn preview(&self) -> Result<MatchRecord, SessionError> {
        match self.draft.as_ref() {
            Some(draft) if self.state == SessionState::Drafting => self.build_record(draft),
            _ => Err(SessionError::InvalidTransition {
                from: self.state,
                action: SessionAction::Finish,
            }),
        }
    }

    fn build_record(&self, draft: &Draft) -> Result<MatchRecord, SessionError> {
        let new = NewRecord {
            date: draft.date.clone(),
            opponent: draft.opponent.clone(),
            score: draft.info.score.clone().unwrap_or_default(),
            location: draft.info.location.clone().unwrap_or_default(),
            attendance: Vec::new(),
            title: None,
        };
        let mut record = self.builder.create_record(new)?;

        if let Some(mvp) = draft.info.mvp.clone() {
            record = update_info(
                &record,
                InfoPatch {
                    mvp: Some(mvp),
                    ..InfoPatch::default()
                },
            );
        }
        let captions = draft.captions.as_slice();
        let (mut record, _) = attach_photos(&record, &draft.photos, Some(captions));
        record.body = format!("\n{}\n\n---\n\n{}\n", draft.text(), self.footer);
        Ok(record)
    }

    fn drafting(&mut self, action: SessionAction) -> Result<&mut Draft, SessionError> {
        let from = self.state;
        match self.draft.as_mut() {
            Some(draft) if from == SessionState::Drafting => Ok(draft),
            _ => Err(SessionError::InvalidTransition { from, action }),
        }
    }

    fn expect_state(&self, expected: SessionState, action: SessionAction) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }
}
