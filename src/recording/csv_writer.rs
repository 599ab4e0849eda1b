//! CSV writer for run results.
//!
//! One row per invocation, 17 columns. The header is repaired in place when
//! the file carries a stale or foreign one; data rows are never dropped,
//! every other line is.

use chrono::NaiveDateTime;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::game::tile::{format_tiles, Tile};
use crate::policy::discard_policy::TableSummary;
use crate::training::statistics::EvaluationSummary;
use crate::Result;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const RESULTS_HEADER: [&str; 17] = [
    "Timestamp",
    "Training Episodes",
    "Evaluation Runs",
    "Initial Hand",
    "Wall Size",
    "Average Steps",
    "Average Base Score",
    "Average Total Score",
    "Minimum Steps",
    "Base Score (Min Steps)",
    "Total Score (Min Steps)",
    "Maximum Total Score",
    "Steps (Max Total Score)",
    "Q-table Entries",
    "Q-value Min",
    "Q-value Max",
    "Q-value Mean",
];

/// Leading columns that must match for a header to be accepted.
const HEADER_KEY_COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub timestamp: String,
    pub episodes: usize,
    pub eval_trials: usize,
    pub initial_hand: Vec<Tile>,
    pub wall_size: usize,
    pub summary: EvaluationSummary,
    pub table: TableSummary,
}

impl ResultRow {
    pub fn to_record(&self) -> Vec<String> {
        let s = &self.summary;
        vec![
            self.timestamp.clone(),
            self.episodes.to_string(),
            self.eval_trials.to_string(),
            format_tiles(&self.initial_hand),
            self.wall_size.to_string(),
            format!("{:.2}", s.avg_steps),
            format!("{:.2}", s.avg_base),
            format!("{:.2}", s.avg_total),
            s.min_steps.to_string(),
            s.min_steps_base.to_string(),
            s.min_steps_total.to_string(),
            s.max_total.to_string(),
            s.max_total_steps.to_string(),
            self.table.entries.to_string(),
            format!("{:.4}", self.table.min),
            format!("{:.4}", self.table.max),
            format!("{:.4}", self.table.mean),
        ]
    }
}

/// Appends rows to the results file at `path`.
pub struct ResultsWriter {
    path: PathBuf,
}

impl ResultsWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, row: &ResultRow) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let record = row.to_record();
        let file_exists = self.path.is_file();
        if file_exists && !self.has_expected_header()? {
            log::warn!(
                "Header of {} does not match, rewriting it",
                self.path.display()
            );
            return self.rewrite_with_header(&record);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = Self::csv_writer(file);
        if !file_exists {
            writer.write_record(RESULTS_HEADER)?;
        }
        writer.write_record(&record)?;
        writer.flush()?;
        Ok(())
    }

    fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner)
    }

    fn has_expected_header(&self) -> Result<bool> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?;
        let mut first = csv::StringRecord::new();
        if !reader.read_record(&mut first)? {
            return Ok(false);
        }
        let leading_match = first
            .iter()
            .take(HEADER_KEY_COLUMNS)
            .map(str::trim)
            .eq(RESULTS_HEADER[..HEADER_KEY_COLUMNS].iter().copied());
        Ok(leading_match && first.len() == RESULTS_HEADER.len())
    }

    /// Header, then every old data row, then `record`, via a temp file.
    /// Lines that are not data rows (stale headers, notes) are dropped.
    fn rewrite_with_header(&self, record: &[String]) -> Result<()> {
        let old = BufReader::new(File::open(&self.path)?);
        let mut lines = Vec::new();
        for line in old.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if is_data_row(line) {
                lines.push(line.to_string());
            }
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut file = File::create(&tmp_path)?;
            let mut header = Self::csv_writer(&mut file);
            header.write_record(RESULTS_HEADER)?;
            header.flush()?;
            drop(header);
            for line in &lines {
                writeln!(file, "{}", line)?;
            }
            let mut writer = Self::csv_writer(&mut file);
            writer.write_record(record)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn is_data_row(line: &str) -> bool {
    let first_field = line.split(',').next().unwrap_or("").trim().trim_matches('"');
    NaiveDateTime::parse_from_str(first_field, TIMESTAMP_FORMAT).is_ok()
}
