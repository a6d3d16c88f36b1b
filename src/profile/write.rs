use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use super::types::{ColumnProfile, CorrelationMatrix, NumericSummary};

#[derive(Serialize)]
struct Summary<'a> {
    columns: &'a [ColumnProfile],
    numeric: &'a [NumericSummary],
    correlation: Option<&'a CorrelationMatrix>,
}

/// Write the profiling results to `<dir>/summary.json`.
///
/// Writes to a tmp file first, then renames over the target.
pub fn write_summary(
    dir: &Path,
    columns: &[ColumnProfile],
    numeric: &[NumericSummary],
    correlation: Option<&CorrelationMatrix>,
) -> Result<PathBuf> {
    let path = dir.join("summary.json");
    let tmp_path = dir.join(".summary.json.tmp");

    let summary = Summary {
        columns,
        numeric,
        correlation,
    };

    let mut tmp = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    serde_json::to_writer_pretty(&mut tmp, &summary).context("serializing summary JSON")?;
    tmp.write_all(b"\n")?;
    fs::rename(&tmp_path, &path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;

    info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{correlation_matrix, profile_columns, summarize_numeric};
    use crate::table::ListingTable;
    use tempfile::TempDir;

    #[test]
    fn test_summary_round_trips_as_json() -> Result<()> {
        let t = ListingTable::new(
            vec!["x".to_string(), "y".to_string()],
            vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["2".to_string(), "4".to_string()],
            ],
        );
        let profiles = profile_columns(&t);
        let numeric = summarize_numeric(&t, &profiles);
        let corr = correlation_matrix(&t, &profiles);

        let dir = TempDir::new()?;
        let path = write_summary(dir.path(), &profiles, &numeric, corr.as_ref())?;
        assert!(path.exists());

        let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(parsed["columns"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["numeric"].as_array().unwrap().len(), 2);
        assert!(parsed["correlation"]["labels"].is_array());
        Ok(())
    }
}
