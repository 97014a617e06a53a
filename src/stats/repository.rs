use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use super::{StatsError, StatsSnapshot};

/// Directory under the store root holding the stats cache
pub const STATS_DIR: &str = "stats";
pub const STATS_JSON: &str = "stats.json";
pub const STATS_MARKDOWN: &str = "stats.md";

/// Destination for computed stats. Whatever it holds is a disposable
/// cache: it is overwritten on every run and never read back as input.
pub trait StatsRepository {
    fn store(&mut self, snapshot: &StatsSnapshot, markdown: &str) -> Result<(), StatsError>;
}

/// Writes `stats/stats.json` and `stats/stats.md` under the store root
#[derive(Debug, Clone)]
pub struct FsStatsRepository {
    dir: PathBuf,
}

impl FsStatsRepository {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(STATS_DIR),
        }
    }

    pub fn json_path(&self) -> PathBuf {
        self.dir.join(STATS_JSON)
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.dir.join(STATS_MARKDOWN)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StatsError> {
        fs::write(path, contents).map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl StatsRepository for FsStatsRepository {
    #[instrument(skip(self, snapshot, markdown))]
    fn store(&mut self, snapshot: &StatsSnapshot, markdown: &str) -> Result<(), StatsError> {
        fs::create_dir_all(&self.dir).map_err(|source| StatsError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(snapshot)?;
        self.write(&self.json_path(), &json)?;
        self.write(&self.markdown_path(), markdown)?;

        info!(dir = %self.dir.display(), "Stats written");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStatsRepository {
    json: Option<String>,
    markdown: Option<String>,
}

impl InMemoryStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(&self) -> Option<&str> {
        self.json.as_deref()
    }

    pub fn markdown(&self) -> Option<&str> {
        self.markdown.as_deref()
    }
}

impl StatsRepository for InMemoryStatsRepository {
    fn store(&mut self, snapshot: &StatsSnapshot, markdown: &str) -> Result<(), StatsError> {
        self.json = Some(serde_json::to_string_pretty(snapshot)?);
        self.markdown = Some(markdown.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{AggregateStats, StatsSnapshot};
    use tempfile::tempdir;

    #[test]
    fn writes_both_files() {
        let root = tempdir().unwrap();
        let mut repo = FsStatsRepository::new(root.path());
        let snapshot = StatsSnapshot::from_stats(AggregateStats::default(), vec![]);

        repo.store(&snapshot, "# stats\n").unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.json_path()).unwrap()).unwrap();
        assert_eq!(json["stats"]["totalMatches"], 0);
        assert_eq!(fs::read_to_string(repo.markdown_path()).unwrap(), "# stats\n");
    }

    #[test]
    fn overwrites_previous_cache() {
        let mut repo = InMemoryStatsRepository::new();
        let snapshot = StatsSnapshot::default();

        repo.store(&snapshot, "first").unwrap();
        repo.store(&snapshot, "second").unwrap();

        assert_eq!(repo.markdown(), Some("second"));
        assert!(repo.json().unwrap().contains("totalMatches"));
    }
}
