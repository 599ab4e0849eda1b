use std::fs;
use std::path::Path;

use crate::policy::q_learning::QEntry;
use crate::Result;

/// Dumps Q-table entries as `State,Action,Q-value` rows for inspection.
pub fn export_q_table_csv<P: AsRef<Path>>(entries: &[QEntry], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["State", "Action", "Q-value"])?;
    for entry in entries {
        let state = entry
            .state
            .0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        wtr.write_record([state, entry.action.to_string(), format!("{:.6}", entry.q)])?;
    }
    wtr.flush()?;
    log::info!("Q-table exported to: {}", path.display());
    Ok(())
}
