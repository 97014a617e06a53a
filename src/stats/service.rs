use tracing::{debug, info, instrument, warn};

use super::{
    collectors::{AttendanceCollector, MvpCollector},
    report::render_markdown,
    repository::StatsRepository,
    AggregateStats, CollectedData, MatchSummary, StatCollector, StatsError, StatsSnapshot,
};
use crate::record::{MatchRecord, RecordStore};

/// What to do when a record in the store cannot be decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Stop at the first bad record
    #[default]
    FailFast,
    /// Log the bad record, leave it out of the stats, and keep going
    SkipAndWarn,
}

/// Folds a whole record store into club stats. Never writes to the store.
pub struct Aggregator {
    collectors: Vec<Box<dyn StatCollector>>,
    policy: ScanPolicy,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Aggregator {
    pub fn builder() -> AggregatorBuilder {
        AggregatorBuilder::new()
    }

    pub fn policy(&self) -> ScanPolicy {
        self.policy
    }

    /// Recomputes stats from scratch over every record in store order
    #[instrument(skip(self, store))]
    pub fn aggregate(&self, store: &dyn RecordStore) -> Result<StatsSnapshot, StatsError> {
        let files = store.list().map_err(StatsError::Listing)?;
        debug!(count = files.len(), "Scanning records");

        let mut stats = AggregateStats::default();
        let mut skipped = Vec::new();

        for file in files {
            let record = match store.load_file(&file) {
                Ok(record) => record,
                Err(source) => match self.policy {
                    ScanPolicy::FailFast => return Err(StatsError::Record { file, source }),
                    ScanPolicy::SkipAndWarn => {
                        warn!(file = %file, error = %source, "Skipping unreadable record");
                        skipped.push(file);
                        continue;
                    }
                },
            };

            self.fold_record(&mut stats, &record)?;
            stats.matches.push(summarize(file, &record));
            stats.total_matches += 1;
        }

        info!(
            total_matches = stats.total_matches,
            players = stats.attendance.len(),
            skipped = skipped.len(),
            "Stats aggregated"
        );

        Ok(StatsSnapshot::from_stats(stats, skipped))
    }

    /// Aggregates, renders the markdown report, and hands both to `repository`
    pub fn refresh(
        &self,
        store: &dyn RecordStore,
        repository: &mut dyn StatsRepository,
        club_name: &str,
    ) -> Result<StatsSnapshot, StatsError> {
        let snapshot = self.aggregate(store)?;
        let markdown = render_markdown(&snapshot, club_name);
        repository.store(&snapshot, &markdown)?;
        Ok(snapshot)
    }

    fn fold_record(&self, stats: &mut AggregateStats, record: &MatchRecord) -> Result<(), StatsError> {
        for collector in &self.collectors {
            for data in collector.collect(record)? {
                match data {
                    CollectedData::Attended { player } => stats.attendance.increment(&player),
                    CollectedData::Mvp { player } => stats.mvp.increment(&player),
                }
            }
        }
        Ok(())
    }
}

fn summarize(file: String, record: &MatchRecord) -> MatchSummary {
    let fm = &record.frontmatter;
    MatchSummary {
        file,
        date: fm.date.clone(),
        opponent: fm.opponent.clone(),
        score: fm.score.clone(),
        location: fm.location.clone(),
        mvp: record.mvp().map(str::to_string),
    }
}

pub struct AggregatorBuilder {
    collectors: Vec<Box<dyn StatCollector>>,
    policy: ScanPolicy,
}

impl AggregatorBuilder {
    fn new() -> Self {
        Self {
            collectors: vec![
                Box::new(AttendanceCollector::new()),
                Box::new(MvpCollector::new()),
            ],
            policy: ScanPolicy::default(),
        }
    }

    pub fn with_collector(mut self, collector: Box<dyn StatCollector>) -> Self {
        self.collectors.push(collector);
        self
    }

    pub fn with_policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Aggregator {
        Aggregator {
            collectors: self.collectors,
            policy: self.policy,
        }
    }
}
