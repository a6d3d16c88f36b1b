use serde::{Deserialize, Serialize};

/// Inferred shape of a column's non-missing cells.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum ColumnKind {
    Numeric,
    Date,
    Text,
}

/// Structural report entry for one column.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub present: usize,
    pub missing: usize,
    /// Up to three non-missing cells, in row order.
    pub samples: Vec<String>,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Pairwise Pearson correlations between numeric columns.
/// `values[i][j]` correlates `labels[i]` with `labels[j]`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}
