use tracing::warn;

/// In-memory listings table: header names plus row-major cells.
///
/// Cells are stored as already-cleaned strings. A missing value is the empty
/// string; the loader normalizes the `NA` token family into that form, so the
/// rest of the pipeline only ever checks for emptiness.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ListingTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        if rows.iter().any(|r| r.len() != headers.len()) {
            warn!("table rows do not all match header width {}", headers.len());
        }
        Self { headers, rows }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Index of the column named `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterate the cells of column `idx`, top to bottom.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |r| r[idx].as_str())
    }

    /// Parsed numeric values of the column named `name`, missing and
    /// unparseable cells skipped. `None` if the column does not exist.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(
            self.column_cells(idx)
                .filter_map(parse_numeric)
                .collect::<Vec<f64>>(),
        )
    }

    /// Remove column `idx` from the headers and every row; returns its name.
    pub fn drop_column(&mut self, idx: usize) -> String {
        for row in &mut self.rows {
            row.remove(idx);
        }
        self.headers.remove(idx)
    }
}

/// True when the cell holds no value.
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty()
}

/// Trim whitespace + strip outer quotes if present.
pub fn clean_cell(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Parse a cell as a finite number; missing cells yield `None`.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let v = clean_cell(cell);
    if v.is_empty() {
        return None;
    }
    v.parse::<f64>().ok().filter(|x| x.is_finite())
}
