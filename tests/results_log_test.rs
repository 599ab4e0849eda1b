//! Results log header handling across repeated runs.

use std::fs;
use tempfile::tempdir;

use mahjong_solitaire_rl::game::tile::Tile;
use mahjong_solitaire_rl::policy::TableSummary;
use mahjong_solitaire_rl::recording::{ResultRow, ResultsWriter, RESULTS_HEADER};
use mahjong_solitaire_rl::training::EvaluationSummary;

fn row(n: usize) -> ResultRow {
    ResultRow {
        timestamp: format!("2026-10-14 10:00:{:02}", n % 60),
        episodes: 100 * (n + 1),
        eval_trials: 10,
        initial_hand: (9..=16).map(Tile).collect(),
        wall_size: 24,
        summary: EvaluationSummary {
            wins: 10,
            avg_steps: 5.0,
            avg_base: 60.0,
            avg_total: 250.0,
            min_steps: 2,
            min_steps_base: 70,
            min_steps_total: 290,
            max_total: 290,
            max_total_steps: 2,
        },
        table: TableSummary {
            entries: n,
            min: 0.0,
            max: 1.0,
            mean: 0.5,
        },
    }
}

fn header_and_data_lines(content: &str) -> (usize, usize) {
    let header = RESULTS_HEADER.join(",");
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    let headers = lines.iter().filter(|l| **l == header).count();
    (headers, lines.len() - headers)
}

#[test]
fn test_rows_accumulate_under_one_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");

    let mut written = 0;
    for invocation in 0..4 {
        // Each invocation opens its own writer, like a new process would.
        let writer = ResultsWriter::new(&path);
        for _ in 0..=invocation {
            writer.append(&row(written)).unwrap();
            written += 1;
        }

        if invocation % 2 == 1 {
            // Hand-edit the header between runs.
            let content = fs::read_to_string(&path).unwrap();
            let rest: Vec<&str> = content.lines().skip(1).collect();
            let mut edited = String::from("timestamp;episodes;whatever\n");
            for line in rest {
                edited.push_str(line);
                edited.push('\n');
            }
            fs::write(&path, edited).unwrap();
        }
    }

    // One more row repairs the last hand-edited header.
    ResultsWriter::new(&path).append(&row(written)).unwrap();
    written += 1;

    let content = fs::read_to_string(&path).unwrap();
    let (headers, data) = header_and_data_lines(&content);
    assert_eq!(headers, 1);
    assert_eq!(data, written);
    assert!(content.starts_with(&RESULTS_HEADER.join(",")));
}

#[test]
fn test_header_with_wrong_column_count_is_repaired() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let writer = ResultsWriter::new(&path);
    writer.append(&row(0)).unwrap();

    // Same leading columns, but a column was dropped from the tail.
    let content = fs::read_to_string(&path).unwrap();
    let short_header = RESULTS_HEADER[..16].join(",");
    let patched = content.replacen(&RESULTS_HEADER.join(","), &short_header, 1);
    fs::write(&path, patched).unwrap();

    writer.append(&row(1)).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(header_and_data_lines(&content), (1, 2));
}

#[test]
fn test_note_line_above_header_does_not_duplicate_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let writer = ResultsWriter::new(&path);
    writer.append(&row(0)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, format!("# my notes\n{}", content)).unwrap();

    writer.append(&row(1)).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(header_and_data_lines(&content), (1, 2));
    assert!(content.starts_with(&RESULTS_HEADER.join(",")));
    assert!(!content.contains("# my notes"));
}
