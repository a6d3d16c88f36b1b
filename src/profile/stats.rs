use tracing::debug;

use super::types::{ColumnKind, ColumnProfile, NumericSummary};
use crate::table::{parse_numeric, ListingTable};

/// Descriptive statistics for every Numeric column, missing cells excluded.
pub fn summarize_numeric(
    table: &ListingTable,
    profiles: &[ColumnProfile],
) -> Vec<NumericSummary> {
    let mut out = Vec::new();

    for profile in profiles.iter().filter(|p| p.kind == ColumnKind::Numeric) {
        let idx = match table.column_index(&profile.name) {
            Some(idx) => idx,
            None => continue,
        };
        let mut values: Vec<f64> = table.column_cells(idx).filter_map(parse_numeric).collect();
        if values.is_empty() {
            debug!("column `{}` has no parseable cells; skipped", profile.name);
            continue;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = if count > 1 {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        } else {
            0.0
        };

        out.push(NumericSummary {
            name: profile.name.clone(),
            count,
            mean,
            std_dev: variance.sqrt(),
            min: values[0],
            q1: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q3: quantile(&values, 0.75),
            max: values[count - 1],
        });
    }

    out
}

/// Linear-interpolation quantile over an ascending slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_columns;

    fn numeric_table(values: &[&str]) -> ListingTable {
        ListingTable::new(
            vec!["price".to_string()],
            values.iter().map(|v| vec![v.to_string()]).collect(),
        )
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_summary_on_known_values() {
        let t = numeric_table(&["10", "20", "30", "40", ""]);
        let profiles = profile_columns(&t);
        let summaries = summarize_numeric(&t, &profiles);

        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 25.0);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.max, 40.0);
        assert_eq!(s.median, 25.0);
        assert_eq!(s.q1, 17.5);
        assert_eq!(s.q3, 32.5);
        assert!((s.std_dev - 12.909944487358056).abs() < 1e-9);
    }

    #[test]
    fn test_single_value_has_zero_std() {
        let t = numeric_table(&["7"]);
        let profiles = profile_columns(&t);
        let s = &summarize_numeric(&t, &profiles)[0];
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.min, s.max);
        assert_eq!(s.median, 7.0);
    }

    #[test]
    fn test_text_columns_are_not_summarized() {
        let t = ListingTable::new(
            vec!["room_type".to_string()],
            vec![vec!["Private room".to_string()]],
        );
        let profiles = profile_columns(&t);
        assert!(summarize_numeric(&t, &profiles).is_empty());
    }
}
