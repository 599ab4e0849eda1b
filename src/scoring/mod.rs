pub mod scoring;

pub use scoring::{calc_score, ScoreBreakdown};
