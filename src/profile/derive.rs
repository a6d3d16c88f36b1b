use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use super::types::{ColumnKind, ColumnProfile};
use crate::table::{is_missing, parse_numeric, ListingTable};

const SAMPLE_LIMIT: usize = 1_000;
const SAMPLE_VALUES: usize = 3;

/// For each column, look at up to SAMPLE_LIMIT non-missing cells:
///  - The first sample fixes the candidate kind
///  - Any later disagreement demotes the column to Text
///  - A column with no samples at all is Text
///
/// Present/missing tallies always cover the whole column, not just the sample.
pub fn profile_columns(table: &ListingTable) -> Vec<ColumnProfile> {
    let mut profiles = Vec::with_capacity(table.width());

    for (idx, name) in table.headers.iter().enumerate() {
        let mut present = 0usize;
        let mut candidate: Option<ColumnKind> = None;
        let mut inconsistent = false;
        let mut samples: Vec<String> = Vec::new();

        for cell in table.column_cells(idx) {
            if is_missing(cell) {
                continue;
            }
            present += 1;
            if samples.len() < SAMPLE_VALUES {
                samples.push(cell.to_string());
            }
            if inconsistent || present > SAMPLE_LIMIT {
                continue;
            }

            let inferred = infer_kind(cell);
            match candidate {
                None => candidate = Some(inferred),
                Some(prev) if prev != inferred => {
                    debug!(
                        "column `{}` kind conflict: {:?} vs {:?}",
                        name, prev, inferred
                    );
                    inconsistent = true;
                }
                _ => {}
            }
        }

        let kind = match (inconsistent, candidate) {
            (false, Some(k)) => k,
            _ => ColumnKind::Text,
        };

        profiles.push(ColumnProfile {
            name: name.clone(),
            kind,
            present,
            missing: table.height() - present,
            samples,
        });
    }

    profiles
}

fn infer_kind(cell: &str) -> ColumnKind {
    if parse_numeric(cell).is_some() {
        return ColumnKind::Numeric;
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];
    if DATE_FORMATS
        .iter()
        .any(|f| NaiveDate::parse_from_str(cell, f).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(cell, f).is_ok())
    {
        return ColumnKind::Date;
    }

    ColumnKind::Text
}
