use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use tracing::info;

use super::CHART_SIZE;
use crate::table::{is_missing, parse_numeric, ListingTable};

/// Scatter of `longitude` vs `latitude`, one color per `neighbourhood_group`,
/// with a legend. `Ok(false)` when any of the three columns is absent.
pub fn listing_map(table: &ListingTable, out_dir: &Path) -> Result<bool> {
    let (lon_idx, lat_idx, group_idx) = match (
        table.column_index("longitude"),
        table.column_index("latitude"),
        table.column_index("neighbourhood_group"),
    ) {
        (Some(lon), Some(lat), Some(g)) => (lon, lat, g),
        _ => {
            info!("longitude, latitude or neighbourhood_group absent; skipping map");
            return Ok(false);
        }
    };

    let mut groups: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();
    for row in &table.rows {
        let group = &row[group_idx];
        if is_missing(group) {
            continue;
        }
        if let (Some(lon), Some(lat)) = (parse_numeric(&row[lon_idx]), parse_numeric(&row[lat_idx]))
        {
            groups.entry(group.clone()).or_default().push((lon, lat));
        }
    }
    if groups.is_empty() {
        info!("no geocoded rows; skipping map");
        return Ok(false);
    }

    let all = groups.values().flatten();
    let mut min_lon = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    for &(lon, lat) in all {
        min_lon = min_lon.min(lon);
        max_lon = max_lon.max(lon);
        min_lat = min_lat.min(lat);
        max_lat = max_lat.max(lat);
    }
    let lon_pad = ((max_lon - min_lon) * 0.05).max(0.001);
    let lat_pad = ((max_lat - min_lat) * 0.05).max(0.001);

    let path = out_dir.join("listing_map.png");
    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Listings by neighbourhood group", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            min_lon - lon_pad..max_lon + lon_pad,
            min_lat - lat_pad..max_lat + lat_pad,
        )?;
    chart
        .configure_mesh()
        .x_desc("longitude")
        .y_desc("latitude")
        .draw()?;

    for (i, (name, points)) in groups.iter().enumerate() {
        let fill = Palette99::pick(i).mix(0.5);
        let mark = Palette99::pick(i).mix(0.9);
        chart
            .draw_series(
                points
                    .iter()
                    .map(move |&(lon, lat)| Circle::new((lon, lat), 2, fill.filled())),
            )?
            .label(name)
            .legend(move |(x, y)| Circle::new((x, y), 4, mark.filled()));
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(true)
}
