use thiserror::Error;

use super::{SessionAction, SessionState};
use crate::record::RecordError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot {action} while session is {from}")]
    InvalidTransition {
        from: SessionState,
        action: SessionAction,
    },

    #[error(transparent)]
    Record(#[from] RecordError),
}
