use crate::record::MatchRecord;

use super::super::{CollectedData, CollectedDataBatch, StatCollector, StatsError};

pub struct MvpCollector;

impl Default for MvpCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MvpCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for MvpCollector {
    fn collect(&self, record: &MatchRecord) -> Result<CollectedDataBatch, StatsError> {
        Ok(record
            .mvp()
            .map(|player| CollectedData::Mvp {
                player: player.to_string(),
            })
            .into_iter()
            .collect())
    }
}
