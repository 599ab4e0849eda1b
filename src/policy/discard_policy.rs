use std::path::Path;

use crate::game::hand::Hand;
use crate::game::tile::Tile;
use crate::game::wall::Wall;
use crate::Result;

/// Predicate deciding whether a hand ends the episode with a win.
pub type TerminalPredicate = dyn Fn(&[Tile]) -> bool;

/// Value-range statistics of a policy's table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TableSummary {
    pub entries: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl TableSummary {
    /// All fields stay zero for an empty iterator.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut summary = TableSummary {
            entries: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
        };
        let mut sum = 0.0;
        for value in values {
            summary.entries += 1;
            summary.min = summary.min.min(value);
            summary.max = summary.max.max(value);
            sum += value;
        }
        if summary.entries == 0 {
            return TableSummary::default();
        }
        summary.mean = sum / summary.entries as f64;
        summary
    }
}

/// Everything the trainer needs from a discard policy.
///
/// The table layout stays private to the implementation, so a different
/// state encoding or representation can be swapped in behind this trait.
pub trait DiscardPolicy {
    /// Runs `n_episodes` learning episodes from `hand` over shuffled copies of `wall`.
    fn train(
        &mut self,
        hand: &Hand,
        wall: &Wall,
        n_episodes: usize,
        is_terminal: &TerminalPredicate,
    ) -> Result<()>;

    /// Best known discard for `hand`, `None` when nothing can be discarded.
    fn act_greedy(&self, hand: &Hand) -> Option<Tile>;

    fn load(&mut self, path: &Path) -> Result<()>;

    fn save(&self, path: &Path) -> Result<()>;

    /// Probability of a random discard during training; 0 means purely greedy.
    fn set_exploration(&mut self, epsilon: f64);

    fn table_summary(&self) -> TableSummary;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_values() {
        let summary = TableSummary::from_values(vec![-1.0, 0.5, 2.0]);
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.min, -1.0);
        assert_eq!(summary.max, 2.0);
        assert!((summary.mean - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_nothing_is_zeroed() {
        let summary = TableSummary::from_values(Vec::new());
        assert_eq!(summary, TableSummary::default());
    }
}
