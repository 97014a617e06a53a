use regex::Regex;
use tracing::debug;

use super::{HintsError, ScorerHints, ScorerSuggestion};

/// "23分钟 东哥 破门", "23' 小王推射破门"
const MINUTE_FIRST: &str = r"(\d+)\s*((?:分钟|分|')+)\s*[,，]?\s*([^\s,，。、0-9]+?)\s*(?:推射破门|头球破门|破门得分|破门|进球|得分|捅射)";

/// "东哥 第23分钟 进球", "小王在第5分进球"
const NAME_FIRST: &str = r"([^\s,，。、0-9]+?)\s*在?\s*第?\s*(\d+)\s*(?:分钟|分|')+\s*(?:破门|进球|得分)";

/// Match-phase words that run straight into a name, as in "下半场小王"
const LEAD_INS: [&str; 8] = ["上半场", "下半场", "伤停补时", "补时", "开场", "随后", "最后", "之后"];

/// Recognises the two goal phrasings used in match write-ups
pub struct RegexScorerHints {
    minute_first: Regex,
    name_first: Regex,
}

impl RegexScorerHints {
    pub fn new() -> Result<Self, HintsError> {
        Ok(Self {
            minute_first: Regex::new(MINUTE_FIRST)?,
            name_first: Regex::new(NAME_FIRST)?,
        })
    }
}

impl ScorerHints for RegexScorerHints {
    fn suggest(&self, text: &str) -> Vec<ScorerSuggestion> {
        let mut found: Vec<(usize, ScorerSuggestion)> = Vec::new();

        for caps in self.minute_first.captures_iter(text) {
            if let (Some(minute), Some(unit), Some(name)) = (caps.get(1), caps.get(2), caps.get(3)) {
                // "分钟" split into unit "分" and name "钟"
                if unit.as_str().ends_with('分')
                    && unit.end() == name.start()
                    && name.as_str().starts_with('钟')
                {
                    continue;
                }
                push_unique(&mut found, minute.start(), name.as_str(), minute.as_str());
            }
        }
        for caps in self.name_first.captures_iter(text) {
            if let (Some(name), Some(minute)) = (caps.get(1), caps.get(2)) {
                push_unique(&mut found, name.start(), name.as_str(), minute.as_str());
            }
        }

        found.sort_by_key(|(offset, _)| *offset);
        debug!(count = found.len(), "Scorer suggestions");
        found.into_iter().map(|(_, suggestion)| suggestion).collect()
    }
}

fn push_unique(found: &mut Vec<(usize, ScorerSuggestion)>, offset: usize, name: &str, minute: &str) {
    let Ok(minute) = minute.parse::<u32>() else {
        return;
    };
    let name = strip_lead_ins(name.trim()).to_string();
    if name.is_empty() {
        return;
    }
    let suggestion = ScorerSuggestion { name, minute };
    if !found.iter().any(|(_, existing)| *existing == suggestion) {
        found.push((offset, suggestion));
    }
}

fn strip_lead_ins(mut name: &str) -> &str {
    while let Some(rest) = LEAD_INS
        .iter()
        .find_map(|lead| name.strip_prefix(lead))
        .filter(|rest| !rest.is_empty())
    {
        name = rest.trim_start();
    }
    name
}
