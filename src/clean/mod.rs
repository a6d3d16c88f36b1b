use tracing::{debug, info};

use crate::table::{is_missing, parse_numeric, ListingTable};

/// Drop every column whose cells are all missing; returns the dropped names.
///
/// A column with zero rows counts as fully missing. No other column is
/// touched.
pub fn drop_empty_columns(table: &mut ListingTable) -> Vec<String> {
    let empty: Vec<usize> = (0..table.width())
        .filter(|&idx| table.column_cells(idx).all(is_missing))
        .collect();

    let mut dropped = Vec::with_capacity(empty.len());
    // Remove right to left so earlier indices stay valid.
    for idx in empty.into_iter().rev() {
        dropped.push(table.drop_column(idx));
    }
    dropped.reverse();

    if dropped.is_empty() {
        debug!("no fully-missing columns");
    } else {
        info!(columns = ?dropped, "dropped fully-missing columns");
    }
    dropped
}

/// Count missing cells per column, in header order. Removes nothing.
pub fn missing_counts(table: &ListingTable) -> Vec<(String, usize)> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let count = table.column_cells(idx).filter(|c| is_missing(c)).count();
            (name.clone(), count)
        })
        .collect()
}

/// Drop every row whose `price` is missing, unparseable, or `<= 0`; returns
/// the count removed. A table without a `price` column is left untouched.
pub fn drop_nonpositive_prices(table: &mut ListingTable) -> usize {
    let idx = match table.column_index("price") {
        Some(idx) => idx,
        None => {
            debug!("no price column; skipping price filter");
            return 0;
        }
    };

    let before = table.height();
    table
        .rows
        .retain(|row| matches!(parse_numeric(&row[idx]), Some(p) if p > 0.0));
    let removed = before - table.height();

    info!(removed, remaining = table.height(), "filtered non-positive prices");
    removed
}
