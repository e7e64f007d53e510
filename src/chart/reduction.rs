//! Token reduction trend, one panel per model
//!
//! Each panel shows the measured token curve against the ideal
//! `baseline × ratio` line; the area between the two is shaded.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use super::style::{self, model_color, FONT, REFERENCE_GRAY};
use super::{ratio_axis, ratio_tick};
use crate::aggregate::AxisRange;
use crate::report::{ModelReduction, ReductionReport};
use crate::Result;

/// Output file name
pub const OUTPUT_FILE: &str = "graph_token_reduction_trend_avg.png";

/// Render one panel per model.
///
/// # Errors
///
/// Returns error if no model has a baseline or the image cannot be written.
pub fn render<P: AsRef<Path>>(report: &ReductionReport, path: P) -> Result<()> {
    if report.models.is_empty() {
        return Err(crate::Error::Render("no token curves to plot".into()));
    }

    let count = u32::try_from(report.models.len()).unwrap_or(1);
    let root = BitMapBackend::new(path.as_ref(), (600 * count, 550)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, report.models.len()));

    for (i, (model, area)) in report.models.iter().zip(areas.iter()).enumerate() {
        draw_panel(area, model, i == 0)?;
    }

    root.present()?;
    info!(path = %path.as_ref().display(), models = report.models.len(), "token reduction chart written");
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    model: &ModelReduction,
    first: bool,
) -> Result<()> {
    let color = model_color(model.model);
    let actual: Vec<(f64, f64)> = model
        .rows
        .iter()
        .map(|r| (ratio_axis(r.ratio.value()), r.avg_tokens))
        .collect();
    let ideal: Vec<(f64, f64)> = model
        .rows
        .iter()
        .map(|r| (ratio_axis(r.ratio.value()), r.ideal_tokens))
        .collect();

    let y_range = AxisRange::padded(
        actual
            .iter()
            .chain(ideal.iter())
            .map(|&(_, y)| y)
            .chain(std::iter::once(model.baseline_tokens)),
        0.15,
    )
    .unwrap_or(AxisRange {
        min: 0.0,
        max: model.baseline_tokens.max(1.0),
    });

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!(
                "Model: {} (Baseline: {:.0} tok)",
                model.model, model.baseline_tokens
            ),
            (FONT, 22.0).into_font().style(FontStyle::Bold),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(if first { 70 } else { 50 })
        .build_cartesian_2d(ratio_axis(1.05)..ratio_axis(0.45), y_range.as_range())?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("Compression Ratio")
        .axis_desc_style((FONT, 16.0).into_font())
        .x_labels(12)
        .x_label_formatter(&ratio_tick);
    if first {
        mesh.y_desc("Avg Reasoning Tokens");
    }
    mesh.draw()?;

    if actual.len() > 1 {
        let mut band = actual.clone();
        band.extend(ideal.iter().rev().copied());
        chart.draw_series(std::iter::once(Polygon::new(band, color.mix(0.15).filled())))?;
    }

    chart
        .draw_series(DashedLineSeries::new(
            ideal.clone(),
            8,
            5,
            REFERENCE_GRAY.stroke_width(2),
        ))?
        .label("Ideal (Linear)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], REFERENCE_GRAY.stroke_width(2)));

    chart
        .draw_series(LineSeries::new(actual.clone(), color.stroke_width(3)))?
        .label("Actual")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
    chart.draw_series(actual.iter().map(|&c| Circle::new(c, 6, color.filled())))?;

    let label = style::label_style(12.0);
    chart.draw_series(model.rows.iter().map(|r| {
        EmptyElement::at((ratio_axis(r.ratio.value()), r.avg_tokens))
            + Text::new(format!("{:.0}", r.avg_tokens), (0, -14), label.clone())
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, 14.0).into_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}
