//! Discard policies.
//!
//! # Components
//!
//! - `discard_policy`: the trait the trainer drives
//! - `q_learning`: tabular Q-learning implementation
//! - `state_encoding`: hand to table-state mapping

pub mod discard_policy;
pub mod q_learning;
pub mod state_encoding;

pub use discard_policy::{DiscardPolicy, TableSummary, TerminalPredicate};
pub use q_learning::{QEntry, QLearningAgent};
pub use state_encoding::{StateEncoding, StateKey};
