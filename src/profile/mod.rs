pub mod corr;
pub mod derive;
pub mod stats;
pub mod types;
pub mod write;

pub use corr::correlation_matrix;
pub use derive::profile_columns;
pub use stats::summarize_numeric;
pub use types::{ColumnKind, ColumnProfile, CorrelationMatrix, NumericSummary};
pub use write::write_summary;
