use std::fmt;

use crate::game::tile::{format_tiles, Tile};
use crate::policy::discard_policy::TableSummary;
use crate::policy::q_learning::QEntry;
use crate::training::statistics::EvaluationSummary;

/// Inputs of the console summary block.
pub struct RunReport<'a> {
    pub timestamp: &'a str,
    pub hand: &'a [Tile],
    pub wall_size: usize,
    pub episodes: usize,
    pub eval_trials: usize,
    pub summary: &'a EvaluationSummary,
    pub table: TableSummary,
    pub lowest: &'a [QEntry],
    pub highest: &'a [QEntry],
}

pub fn format_report(report: &RunReport<'_>) -> String {
    report.to_string()
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        writeln!(f, "===== Q-learning Single Hand Evaluation Summary =====")?;
        writeln!(f, "Timestamp: {}", self.timestamp)?;
        writeln!(f, "Initial hand: [{}]", format_tiles(self.hand))?;
        writeln!(f, "Wall size: {}", self.wall_size)?;
        writeln!(f, "Training episodes: {}", self.episodes)?;
        writeln!(f, "Evaluation runs: {} ({} wins)", self.eval_trials, s.wins)?;
        writeln!(f, "Average steps to win: {:.2}", s.avg_steps)?;
        writeln!(f, "Average base score: {:.2}", s.avg_base)?;
        writeln!(f, "Average total score: {:.2}", s.avg_total)?;
        writeln!(
            f,
            "Minimum steps: {} (Base score: {}, Total score: {})",
            s.min_steps, s.min_steps_base, s.min_steps_total
        )?;
        writeln!(
            f,
            "Maximum total score: {} (Steps: {})",
            s.max_total, s.max_total_steps
        )?;
        if self.table.entries > 0 {
            writeln!(f, "Q-table entries: {}", self.table.entries)?;
            writeln!(
                f,
                "Q-value: min={:.4}, max={:.4}, mean={:.4}",
                self.table.min, self.table.max, self.table.mean
            )?;
            writeln!(f, "Top {} min Q-value samples:", self.lowest.len())?;
            for entry in self.lowest {
                writeln!(f, "{}", format_entry(entry))?;
            }
            writeln!(f, "Top {} max Q-value samples:", self.highest.len())?;
            for entry in self.highest {
                writeln!(f, "{}", format_entry(entry))?;
            }
        }
        write!(f, "{}", "=".repeat(51))
    }
}

fn format_entry(entry: &QEntry) -> String {
    format!(
        "  State: {:?}, Action: {}, Q: {:.4}",
        entry.state.0, entry.action, entry.q
    )
}
