// Library crate for the match record store
// This file exposes the public API for the binary and integration tests

pub mod cli;
pub mod hints;
pub mod photos;
pub mod platform;
pub mod record;
pub mod render;
pub mod session;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use photos::{discover_photos, import_photos, PhotoAsset};
pub use record::{
    attach_photos, codec, update_info, FsRecordStore, InMemoryRecordStore, InfoPatch, MatchRecord,
    NewRecord, RecordBuilder, RecordError, RecordStore,
};
pub use session::{MatchSession, SessionState};
pub use shared::{AppConfig, AppError};
pub use stats::{Aggregator, FsStatsRepository, ScanPolicy, StatsSnapshot};
