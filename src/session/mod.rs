pub mod commands;
pub mod models;
pub mod service;

mod errors;

pub use commands::DraftCommand;
pub use errors::SessionError;
pub use models::{Draft, SessionAction, SessionState, BODY_PLACEHOLDER, DEFAULT_FOOTER};
pub use service::MatchSession;
