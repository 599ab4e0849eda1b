pub mod report;
pub mod session;
pub mod statistics;

pub use report::{format_report, RunReport};
pub use session::{train_and_evaluate, EvaluationResults};
pub use statistics::EvaluationSummary;
