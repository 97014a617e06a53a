use crate::record::MatchRecord;

use super::super::{CollectedData, CollectedDataBatch, StatCollector, StatsError};

/// Emits one observation per name on the attendance roster.
///
/// Names are taken verbatim: no trimming or case folding, and a name
/// listed twice in one record is counted twice.
pub struct AttendanceCollector;

impl Default for AttendanceCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for AttendanceCollector {
    fn collect(&self, record: &MatchRecord) -> Result<CollectedDataBatch, StatsError> {
        let data = record
            .attendance()
            .iter()
            .map(|player| CollectedData::Attended {
                player: player.clone(),
            })
            .collect();

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::codec;

    #[test]
    fn collects_every_roster_entry() {
        let collector = AttendanceCollector::new();
        let record = codec::decode("---\nattendance:\n- 东哥\n- 小王\n- 东哥\n---\n").unwrap();

        let data = collector.collect(&record).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(
            data[0],
            CollectedData::Attended {
                player: "东哥".to_string()
            }
        );
    }

    #[test]
    fn names_are_not_normalized() {
        let collector = AttendanceCollector::new();
        let record = codec::decode("---\nattendance:\n- ' 小王'\n---\n").unwrap();

        let data = collector.collect(&record).unwrap();
        assert_eq!(
            data,
            vec![CollectedData::Attended {
                player: " 小王".to_string()
            }]
        );
    }

    #[test]
    fn missing_roster_collects_nothing() {
        let collector = AttendanceCollector::new();
        let record = codec::decode("---\ntitle: x\n---\n").unwrap();
        assert!(collector.collect(&record).unwrap().is_empty());
    }
}
