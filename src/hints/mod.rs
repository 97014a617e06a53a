mod errors;
pub mod patterns;
pub mod roster;

pub use errors::HintsError;
pub use patterns::RegexScorerHints;
pub use roster::RegexRosterHints;

use serde::Serialize;

use crate::record::{MatchRecord, Scorer};

/// A possible goal scorer spotted in free text. Never written to a record
/// unless the caller applies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorerSuggestion {
    pub name: String,
    pub minute: u32,
}

impl From<ScorerSuggestion> for Scorer {
    fn from(suggestion: ScorerSuggestion) -> Self {
        Scorer {
            name: suggestion.name,
            minute: Some(suggestion.minute),
        }
    }
}

pub trait ScorerHints {
    fn suggest(&self, text: &str) -> Vec<ScorerSuggestion>;
}

/// Possible attendees named in free text, first mention first. Shown to
/// the operator only.
pub trait RosterHints {
    fn suggest_roster(&self, text: &str) -> Vec<String>;
}

/// Appends suggestions not already listed as scorers. Body is untouched.
pub fn apply_suggestions(record: &MatchRecord, suggestions: &[ScorerSuggestion]) -> MatchRecord {
    let mut updated = record.clone();
    let scorers = updated.frontmatter.scorers.get_or_insert_with(Vec::new);
    for suggestion in suggestions {
        let scorer = Scorer::from(suggestion.clone());
        if !scorers.contains(&scorer) {
            scorers.push(scorer);
        }
    }
    updated
}
