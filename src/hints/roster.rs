use regex::Regex;
use tracing::debug;

use super::{HintsError, RosterHints};

/// Two to four characters followed by a list separator: "东哥、小王、"
const LISTED_NAME: &str = r"([^，,、。：:；;\d\s]{2,4})[、，,]";

/// Words that look like list items but are never players
const NOT_NAMES: [&str; 4] = ["首发", "比赛", "对阵", "双方"];

/// Picks out names written as a separated list in a write-up.
///
/// Best effort: the last name of a list has no trailing separator and is
/// not seen.
pub struct RegexRosterHints {
    listed_name: Regex,
}

impl RegexRosterHints {
    pub fn new() -> Result<Self, HintsError> {
        Ok(Self {
            listed_name: Regex::new(LISTED_NAME)?,
        })
    }
}

impl RosterHints for RegexRosterHints {
    fn suggest_roster(&self, text: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in self.listed_name.captures_iter(text) {
            let Some(name) = caps.get(1).map(|m| m.as_str().trim()) else {
                continue;
            };
            if NOT_NAMES.contains(&name) || names.iter().any(|known| known == name) {
                continue;
            }
            names.push(name.to_string());
        }
        debug!(count = names.len(), "Roster suggestions");
        names
    }
}
