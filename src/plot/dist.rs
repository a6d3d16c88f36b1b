use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use tracing::info;

use super::CHART_SIZE;
use crate::table::{is_missing, parse_numeric, ListingTable};

const HIST_BINS: usize = 50;

/// Histogram of `price` with 50 bins equally spaced in log10 space, drawn on
/// a logarithmic x axis. `Ok(false)` when the column is absent or holds no
/// positive value.
pub fn price_histogram(table: &ListingTable, out_dir: &Path) -> Result<bool> {
    let values: Vec<f64> = match table.numeric_column("price") {
        Some(v) => v.into_iter().filter(|p| *p > 0.0).collect(),
        None => {
            info!("no price column; skipping histogram");
            return Ok(false);
        }
    };
    if values.is_empty() {
        info!("no positive prices; skipping histogram");
        return Ok(false);
    }

    let logs: Vec<f64> = values.iter().map(|v| v.log10()).collect();
    let mut lo = logs.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo < f64::EPSILON {
        // all prices equal: widen so the single bar is visible
        lo -= 0.5;
        hi += 0.5;
    }
    let bin_width = (hi - lo) / HIST_BINS as f64;
    let mut counts = vec![0u32; HIST_BINS];
    for l in &logs {
        let bin = (((l - lo) / bin_width) as usize).min(HIST_BINS - 1);
        counts[bin] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(1).max(1);

    let path = out_dir.join("price_hist.png");
    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Price distribution", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(
            (10f64.powf(lo)..10f64.powf(hi)).log_scale(),
            0u32..max_count + max_count / 10 + 1,
        )?;
    chart
        .configure_mesh()
        .x_desc("price")
        .y_desc("listings")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = 10f64.powf(lo + i as f64 * bin_width);
        let x1 = 10f64.powf(lo + (i + 1) as f64 * bin_width);
        Rectangle::new([(x0, 0u32), (x1, count)], BLUE.mix(0.5).filled())
    }))?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(true)
}

/// Vertical box plots of `price` grouped by `room_type`, y axis clamped to
/// [0, 1000]. `Ok(false)` when either column is absent.
pub fn price_by_room_type(table: &ListingTable, out_dir: &Path) -> Result<bool> {
    let (price_idx, room_idx) = match (
        table.column_index("price"),
        table.column_index("room_type"),
    ) {
        (Some(p), Some(r)) => (p, r),
        _ => {
            info!("price or room_type column absent; skipping box plot");
            return Ok(false);
        }
    };

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in &table.rows {
        let room = &row[room_idx];
        if is_missing(room) {
            continue;
        }
        if let Some(price) = parse_numeric(&row[price_idx]) {
            groups.entry(room.clone()).or_default().push(price);
        }
    }
    if groups.is_empty() {
        info!("no (room_type, price) pairs; skipping box plot");
        return Ok(false);
    }

    let labels: Vec<String> = groups.keys().cloned().collect();
    let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();

    let path = out_dir.join("price_by_room_type.png");
    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Price by room type", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(label_refs[..].into_segmented(), 0f32..1000f32)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("room type")
        .y_desc("price")
        .draw()?;

    chart.draw_series(label_refs.iter().map(|label| {
        let quartiles = Quartiles::new(&groups[*label]);
        Boxplot::new_vertical(SegmentValue::CenterOf(label), &quartiles)
            .width(24)
            .whisker_width(0.5)
    }))?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(true)
}

/// Scatter of `price` against `minimum_nights`, x in [0, 100], y in [0, 1000],
/// translucent points. `Ok(false)` when either column is absent.
pub fn price_vs_minimum_nights(table: &ListingTable, out_dir: &Path) -> Result<bool> {
    let (nights_idx, price_idx) = match (
        table.column_index("minimum_nights"),
        table.column_index("price"),
    ) {
        (Some(n), Some(p)) => (n, p),
        _ => {
            info!("price or minimum_nights column absent; skipping scatter");
            return Ok(false);
        }
    };

    let mut points: Vec<(f64, f64)> = Vec::new();
    for row in &table.rows {
        if let (Some(x), Some(y)) = (
            parse_numeric(&row[nights_idx]),
            parse_numeric(&row[price_idx]),
        ) {
            if (0.0..=100.0).contains(&x) && (0.0..=1000.0).contains(&y) {
                points.push((x, y));
            }
        }
    }

    let path = out_dir.join("price_vs_minimum_nights.png");
    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Price vs minimum nights", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..100f64, 0f64..1000f64)?;
    chart
        .configure_mesh()
        .x_desc("minimum nights")
        .y_desc("price")
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.2).filled())),
    )?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table(headers: &[&str], rows: &[&[&str]]) -> ListingTable {
        ListingTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_histogram_skipped_without_price() -> Result<()> {
        let dir = TempDir::new()?;
        let t = table(&["room_type"], &[&["Private room"]]);
        assert!(!price_histogram(&t, dir.path())?);
        assert!(!dir.path().join("price_hist.png").exists());
        Ok(())
    }

    #[test]
    fn test_boxplot_skipped_without_room_type() -> Result<()> {
        let dir = TempDir::new()?;
        let t = table(&["price"], &[&["100"], &["200"]]);
        assert!(!price_by_room_type(&t, dir.path())?);
        assert!(!dir.path().join("price_by_room_type.png").exists());
        Ok(())
    }

    #[test]
    fn test_scatter_skipped_without_minimum_nights() -> Result<()> {
        let dir = TempDir::new()?;
        let t = table(&["price"], &[&["100"]]);
        assert!(!price_vs_minimum_nights(&t, dir.path())?);
        Ok(())
    }

    // Full render; needs system fonts, so opt in via RENDER_CHARTS=1.
    #[test]
    fn test_render_distribution_charts() -> Result<()> {
        if std::env::var("RENDER_CHARTS").is_err() {
            return Ok(());
        }
        let dir = TempDir::new()?;
        let t = table(
            &["price", "room_type", "minimum_nights"],
            &[
                &["50", "Private room", "1"],
                &["120", "Entire home/apt", "3"],
                &["300", "Entire home/apt", "2"],
                &["35", "Shared room", "1"],
            ],
        );
        assert!(price_histogram(&t, dir.path())?);
        assert!(price_by_room_type(&t, dir.path())?);
        assert!(price_vs_minimum_nights(&t, dir.path())?);
        assert!(dir.path().join("price_hist.png").exists());
        assert!(dir.path().join("price_by_room_type.png").exists());
        assert!(dir.path().join("price_vs_minimum_nights.png").exists());
        Ok(())
    }
}
