use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::info;

use crate::profile::CorrelationMatrix;

/// Heatmap of the correlation matrix, blue-white-red diverging scale centered
/// at zero, rotated x tick labels. `Ok(false)` when no matrix was computed.
pub fn correlation_heatmap(matrix: Option<&CorrelationMatrix>, out_dir: &Path) -> Result<bool> {
    let matrix = match matrix {
        Some(m) if m.labels.len() >= 2 => m,
        _ => {
            info!("fewer than two numeric columns; skipping heatmap");
            return Ok(false);
        }
    };
    let n = matrix.labels.len() as i32;
    let labels = &matrix.labels;

    let path = out_dir.join("correlation_heatmap.png");
    let root = BitMapBackend::new(&path, (820, 760)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation matrix", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(130)
        .y_label_area_size(130)
        .build_cartesian_2d(0i32..n, n..0i32)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(labels.len())
        .y_labels(labels.len())
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_label_formatter(&|x| {
            labels
                .get(*x as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| {
            labels
                .get(*y as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(
        matrix
            .values
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(x, v)| (x as i32, y as i32, *v))
            })
            .map(|(x, y, v)| {
                Rectangle::new([(x, y), (x + 1, y + 1)], diverging_color(v).filled())
            }),
    )?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(true)
}

/// Blue at -1, white at 0, red at +1.
fn diverging_color(v: f64) -> RGBColor {
    let t = v.clamp(-1.0, 1.0);
    if t < 0.0 {
        let f = 1.0 + t;
        RGBColor((255.0 * f) as u8, (255.0 * f) as u8, 255)
    } else {
        let f = 1.0 - t;
        RGBColor(255, (255.0 * f) as u8, (255.0 * f) as u8)
    }
}
