//! Round records and the history of a run.

use crate::geometry::Position;
use crate::prey::PreyId;
use serde::{Deserialize, Serialize};

/// Outcome of one completed round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number
    pub round: u32,
    /// Predator position after it acted
    pub predator: Position,
    /// One entry per population slot, `None` for captured prey
    pub prey: Vec<Option<Position>>,
    /// Live prey after the round
    pub alive: usize,
    /// Prey the predator targeted this round
    pub target: PreyId,
    /// Whether the target was captured
    pub captured: bool,
}

impl RoundRecord {
    /// Multi-line status block printed after each round
    pub fn summary(&self) -> String {
        let action = if self.captured {
            "ate a prey at index"
        } else {
            "is chasing a prey at index"
        };
        format!(
            "Round number: {}\nPosition of the predator: [{:.3}, {:.3}]\nNumber of alive prey: {}\nThe predator {} {}",
            self.round, self.predator.x, self.predator.y, self.alive, action, self.target
        )
    }
}

/// Every round recorded during a run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundHistory {
    pub records: Vec<RoundRecord>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: RoundRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    /// Alive count per round
    pub fn alive_series(&self) -> Vec<(u32, usize)> {
        self.records.iter().map(|r| (r.round, r.alive)).collect()
    }

    /// Captures as `(round, prey id)`, in the order they happened
    pub fn captures(&self) -> Vec<(u32, PreyId)> {
        self.records
            .iter()
            .filter(|r| r.captured)
            .map(|r| (r.round, r.target))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: u32, alive: usize, captured: bool) -> RoundRecord {
        RoundRecord {
            round,
            predator: Position::new(1.23456, -0.5),
            prey: vec![None, Some(Position::ORIGIN)],
            alive,
            target: 1,
            captured,
        }
    }

    #[test]
    fn test_summary_format() {
        let text = record(3, 1, false).summary();
        assert!(text.contains("Round number: 3"));
        assert!(text.contains("[1.235, -0.500]"));
        assert!(text.contains("Number of alive prey: 1"));
        assert!(text.contains("chasing a prey at index 1"));

        assert!(record(4, 0, true).summary().contains("ate a prey at index 1"));
    }

    #[test]
    fn test_history_series() {
        let mut history = RoundHistory::new();
        history.record(record(1, 2, false));
        history.record(record(2, 1, true));
        history.record(record(3, 1, false));

        assert_eq!(history.len(), 3);
        assert_eq!(history.alive_series(), vec![(1, 2), (2, 1), (3, 1)]);
        assert_eq!(history.captures(), vec![(2, 1)]);
        assert_eq!(history.latest().unwrap().round, 3);
    }
}
