// crates/driftscope-report/src/chart.rs
//
// Distance-vs-iteration chart: the recorded series as a line, the mean
// as a horizontal reference, and a one-standard-deviation band around
// the mean. One PNG per run.

use std::path::Path;

use plotters::prelude::*;

use driftscope_core::{DriftError, DriftStatistics};

/// Render the drift chart for a completed run.
///
/// No-op for an empty series (a run aborted before its first record).
pub fn render_drift_chart(
    out_path: &Path,
    distances: &[f64],
    stats: &DriftStatistics,
    threshold: f64,
) -> Result<(), DriftError> {
    if distances.is_empty() {
        return Ok(());
    }

    let series: Vec<(f32, f32)> = distances
        .iter()
        .enumerate()
        .map(|(i, &d)| (i as f32, d as f32))
        .collect();

    let x_max = (distances.len().saturating_sub(1) as f32).max(1.0);

    let mut y_min = f32::INFINITY;
    let mut y_max = f32::NEG_INFINITY;
    for &(_, y) in &series {
        if y.is_finite() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    // The band must fit inside the plotted range.
    y_min = y_min.min((stats.mean - stats.std_dev) as f32);
    y_max = y_max.max((stats.mean + stats.std_dev) as f32);
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }
    let range = (y_max - y_min).abs();
    let pad = if range > 1e-6 {
        0.1 * range
    } else {
        0.1 * y_max.abs().max(1.0)
    };
    let y_lo = y_min - pad;
    let y_hi = y_max + pad;

    let caption = format!(
        "Translation round-trip drift (mean {:.4} | variance {:.4} | threshold {:.2})",
        stats.mean, stats.variance, threshold
    );

    let root = BitMapBackend::new(out_path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f32..x_max, y_lo..y_hi)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("iteration")
        .y_desc("distance")
        .draw()
        .map_err(render_err)?;

    // One-standard-deviation band around the mean.
    let band_hi = (stats.mean + stats.std_dev) as f32;
    let band_lo = (stats.mean - stats.std_dev) as f32;
    chart
        .draw_series(std::iter::once(Polygon::new(
            vec![(0.0, band_hi), (x_max, band_hi), (x_max, band_lo), (0.0, band_lo)],
            RED.mix(0.2).filled(),
        )))
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
        .map_err(render_err)?
        .label("distance")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    let mean = stats.mean as f32;
    chart
        .draw_series(LineSeries::new(vec![(0.0, mean), (x_max, mean)], &RED))
        .map_err(render_err)?
        .label(format!("mean {:.4}", stats.mean))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err(e: impl std::fmt::Display) -> DriftError {
    DriftError::Render(e.to_string())
}
