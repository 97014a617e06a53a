use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Per-player counter that remembers the order names were first seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, player: &str) {
        match self.index.get(player) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(player.to_string(), self.entries.len());
                self.entries.push((player.to_string(), 1));
            }
        }
    }

    pub fn get(&self, player: &str) -> u32 {
        self.index
            .get(player)
            .map(|&position| self.entries[position].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .iter()
            .map(|(player, count)| (player.as_str(), *count))
    }

    /// Descending by count; ties keep first-seen order
    pub fn ranking(&self) -> Vec<RankEntry> {
        let mut ranking: Vec<RankEntry> = self
            .iter()
            .map(|(player, count)| RankEntry {
                player: player.to_string(),
                count,
            })
            .collect();
        ranking.sort_by(|a, b| b.count.cmp(&a.count));
        ranking
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (player, count) in &self.entries {
            map.serialize_entry(player, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub player: String,
    pub count: u32,
}

/// One line of the chronological match list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    #[serde(skip)]
    pub file: String,
    pub date: Option<String>,
    pub opponent: Option<String>,
    pub score: Option<String>,
    pub location: Option<String>,
    pub mvp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub attendance: Tally,
    pub mvp: Tally,
    pub total_matches: usize,
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rankings {
    pub attendance: Vec<RankEntry>,
    pub mvp: Vec<RankEntry>,
}

/// Everything written to `stats/stats.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub stats: AggregateStats,
    pub rankings: Rankings,
    /// Files left out under the skip-and-warn policy
    #[serde(skip)]
    pub skipped: Vec<String>,
}

impl StatsSnapshot {
    pub fn from_stats(stats: AggregateStats, skipped: Vec<String>) -> Self {
        let rankings = Rankings {
            attendance: stats.attendance.ranking(),
            mvp: stats.mvp.ranking(),
        };
        Self {
            stats,
            rankings,
            skipped,
        }
    }
}

/// Single observation produced by a collector for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectedData {
    Attended { player: String },
    Mvp { player: String },
}
