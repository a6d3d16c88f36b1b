pub mod dist;
pub mod geo;
pub mod heatmap;

pub use dist::{price_by_room_type, price_histogram, price_vs_minimum_nights};
pub use geo::listing_map;
pub use heatmap::correlation_heatmap;

/// Pixel size shared by the scatter and distribution charts.
pub(crate) const CHART_SIZE: (u32, u32) = (900, 600);
