pub mod collectors;
pub mod report;
pub mod service;

mod errors;
pub mod models;
pub mod repository;

pub use errors::StatsError;
pub use models::*;
pub use report::render_markdown;
pub use repository::{FsStatsRepository, InMemoryStatsRepository, StatsRepository};
pub use service::{Aggregator, AggregatorBuilder, ScanPolicy};

use crate::record::MatchRecord;

pub type CollectedDataBatch = Vec<CollectedData>;

/// Extracts per-player observations from a single match record.
///
/// Collectors are pure: the aggregator owns every tally and folds the
/// batches in store order.
pub trait StatCollector {
    fn collect(&self, record: &MatchRecord) -> Result<CollectedDataBatch, StatsError>;
}
