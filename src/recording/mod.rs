//! Output of training runs.
//!
//! # Components
//!
//! - `csv_writer`: append-only results log with header repair
//! - `q_table_export`: CSV dump of a Q-table

pub mod csv_writer;
pub mod q_table_export;

pub use csv_writer::{ResultRow, ResultsWriter, RESULTS_HEADER, TIMESTAMP_FORMAT};
pub use q_table_export::export_q_table_csv;
