use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::dataset::{ChartData, YAxis};
use crate::theme::Theme;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Axis range covering `values` with 10% headroom on each side.
pub fn value_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    let pad = if span > 0.0 { span * 0.1 } else { min.abs().max(1.0) * 0.1 };
    (min - pad)..(max + pad)
}

/// Year label for an x position; blank between categories.
pub fn year_label(labels: &[String], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 0.01 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

/// Render `chart` to a PNG file at `path`.
pub fn render_png(
    chart: &ChartData,
    path: &Path,
    size: (u32, u32),
    theme: Theme,
) -> Result<(), ChartError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let palette = theme.palette();
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&palette.background).map_err(draw_err)?;

    let n = chart.labels.len().max(1);
    let x_range = -0.5f64..(n as f64 - 0.5);
    let has_demand = chart.has_axis(YAxis::Demand);

    let mut ctx = ChartBuilder::on(&root)
        .caption(
            &chart.title,
            ("sans-serif", 26).into_font().color(&palette.title),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .right_y_label_area_size(if has_demand { 70 } else { 0 })
        .build_cartesian_2d(x_range.clone(), value_range(chart.values_on(YAxis::Rate)))
        .map_err(draw_err)?
        .set_secondary_coord(x_range, value_range(chart.values_on(YAxis::Demand)));

    let labels = &chart.labels;
    let x_formatter = |x: &f64| year_label(labels, *x);

    ctx.configure_mesh()
        .x_labels(n)
        .x_label_formatter(&x_formatter)
        .x_desc("Year")
        .y_desc("Avg Rate (INR)")
        .axis_style(&palette.text)
        .light_line_style(&palette.grid)
        .bold_line_style(&palette.grid)
        .label_style(("sans-serif", 13).into_font().color(&palette.text))
        .axis_desc_style(("sans-serif", 15).into_font().color(&palette.text))
        .draw()
        .map_err(draw_err)?;

    if has_demand {
        ctx.configure_secondary_axes()
            .y_desc("Demand (Units)")
            .label_style(("sans-serif", 13).into_font().color(&palette.text))
            .axis_desc_style(("sans-serif", 15).into_font().color(&palette.text))
            .draw()
            .map_err(draw_err)?;
    }

    for dataset in &chart.datasets {
        let color = dataset.color;
        let line_style = color.stroke_width(3);

        for segment in dataset.segments() {
            match dataset.axis {
                YAxis::Rate => ctx.draw_series(LineSeries::new(segment, line_style)),
                YAxis::Demand => ctx.draw_secondary_series(LineSeries::new(segment, line_style)),
            }
            .map_err(draw_err)?;
        }

        let markers = dataset.points().map(|p| Circle::new(p, 4, color.filled()));
        let anno = match dataset.axis {
            YAxis::Rate => ctx.draw_series(markers),
            YAxis::Demand => ctx.draw_secondary_series(markers),
        }
        .map_err(draw_err)?;

        anno.label(dataset.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&palette.background.mix(0.8))
        .border_style(&palette.text)
        .label_font(("sans-serif", 13).into_font().color(&palette.text))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    info!(path = %path.display(), "saved chart");
    Ok(())
}
