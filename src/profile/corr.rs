use tracing::info;

use super::types::{ColumnKind, ColumnProfile, CorrelationMatrix};
use crate::table::{parse_numeric, ListingTable};

/// Pearson correlations between every pair of numeric columns, computed over
/// the rows with no missing value in any of them (listwise deletion).
///
/// `None` when fewer than two numeric columns exist.
pub fn correlation_matrix(
    table: &ListingTable,
    profiles: &[ColumnProfile],
) -> Option<CorrelationMatrix> {
    let numeric: Vec<(String, usize)> = profiles
        .iter()
        .filter(|p| p.kind == ColumnKind::Numeric)
        .filter_map(|p| table.column_index(&p.name).map(|i| (p.name.clone(), i)))
        .collect();
    if numeric.len() < 2 {
        return None;
    }

    // Listwise deletion: a row participates only if every numeric cell parses.
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); numeric.len()];
    'rows: for row in &table.rows {
        let mut parsed = Vec::with_capacity(numeric.len());
        for (_, idx) in &numeric {
            match parse_numeric(&row[*idx]) {
                Some(v) => parsed.push(v),
                None => continue 'rows,
            }
        }
        for (col, v) in columns.iter_mut().zip(parsed) {
            col.push(v);
        }
    }

    let labels: Vec<String> = numeric.into_iter().map(|(name, _)| name).collect();
    let n = labels.len();
    let mut values = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(&columns[i], &columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    info!(
        columns = n,
        complete_rows = columns[0].len(),
        "computed correlation matrix"
    );
    Some(CorrelationMatrix { labels, values })
}

/// Pearson product-moment correlation; 0 when either side has no variance.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    if n == 0 {
        return 0.0;
    }
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }
    (cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
}
