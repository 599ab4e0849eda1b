use crate::training::session::EvaluationResults;

/// Reduction of one evaluation sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSummary {
    pub wins: usize,
    pub avg_steps: f64,
    pub avg_base: f64,
    pub avg_total: f64,
    /// Fewest steps to a win, with the scores of that same episode
    pub min_steps: usize,
    pub min_steps_base: i32,
    pub min_steps_total: i32,
    /// Best total score, with the steps of that same episode
    pub max_total: i32,
    pub max_total_steps: usize,
}

impl EvaluationSummary {
    /// `None` when the sweep produced no win. Ties resolve to the earliest episode.
    pub fn from_results(results: &EvaluationResults) -> Option<Self> {
        let wins = results.steps.len();
        if wins == 0 {
            return None;
        }

        let mut min_idx = 0;
        let mut max_idx = 0;
        for i in 1..wins {
            if results.steps[i] < results.steps[min_idx] {
                min_idx = i;
            }
            if results.total_scores[i] > results.total_scores[max_idx] {
                max_idx = i;
            }
        }

        Some(Self {
            wins,
            avg_steps: mean(results.steps.iter().map(|&s| s as f64)),
            avg_base: mean(results.base_scores.iter().map(|&s| s as f64)),
            avg_total: mean(results.total_scores.iter().map(|&s| s as f64)),
            min_steps: results.steps[min_idx],
            min_steps_base: results.base_scores[min_idx],
            min_steps_total: results.total_scores[min_idx],
            max_total: results.total_scores[max_idx],
            max_total_steps: results.steps[max_idx],
        })
    }
}

fn mean<I: ExactSizeIterator<Item = f64>>(values: I) -> f64 {
    let n = values.len();
    values.sum::<f64>() / n as f64
}
