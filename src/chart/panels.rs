//! One panel per model on a shared global scale
//!
//! Used by the accuracy-vs-energy tradeoff chart and the energy-vs-tokens
//! chart. The baseline is drawn as an unconnected star; the compressed
//! ratios are joined by a dashed line.

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use super::style::{self, label_offset, model_color, Marker, FONT};
use crate::report::PanelReport;
use crate::Result;

/// Output file of the accuracy-vs-energy tradeoff chart
pub const TRADEOFF_OUTPUT_FILE: &str = "graph_tradeoff_unified_avg.png";

/// Output file of the energy-vs-reasoning-tokens chart
pub const ENERGY_TOKENS_OUTPUT_FILE: &str = "graph_reasoning_vs_energy_avg.png";

const PANEL_WIDTH: u32 = 700;
const PANEL_HEIGHT: u32 = 600;

/// Render one panel per model, all panels on the report's shared ranges.
///
/// # Errors
///
/// Returns error if the image cannot be written.
pub fn render<P: AsRef<Path>>(report: &PanelReport, path: P) -> Result<()> {
    let count = u32::try_from(report.panels.len().max(1)).unwrap_or(1);
    let root =
        BitMapBackend::new(path.as_ref(), (PANEL_WIDTH * count, PANEL_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, report.panels.len().max(1)));

    let one_decimal = |v: &f64| format!("{v:.1}");

    for (i, (series, area)) in report.panels.iter().zip(areas.iter()).enumerate() {
        let color = model_color(series.model);
        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Model: {} ({}-Run Avg)", series.model, report.trial_count),
                (FONT, 26.0).into_font().style(FontStyle::Bold).color(&RGBColor(0x33, 0x33, 0x33)),
            )
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(if i == 0 { 70 } else { 45 })
            .build_cartesian_2d(report.x_range.as_range(), report.y_range.as_range())?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(report.spec.x_desc)
            .axis_desc_style((FONT, 16.0).into_font())
            .x_label_formatter(&one_decimal)
            .y_label_formatter(&one_decimal);
        if i == 0 {
            mesh.y_desc(report.spec.y_desc);
        }
        mesh.draw()?;

        let compressed: Vec<(f64, f64)> = series.compressed().map(|p| (p.x, p.y)).collect();
        if !compressed.is_empty() {
            chart.draw_series(DashedLineSeries::new(
                compressed.clone(),
                10,
                6,
                color.mix(0.5).stroke_width(2),
            ))?;
            let shape = Marker::for_model(series.model);
            chart.draw_series(compressed.iter().map(|&c| style::marker(c, shape, 9, color)))?;
        }

        if let Some(base) = series.baseline() {
            chart.draw_series(std::iter::once(style::star((base.x, base.y), 16, color)))?;
        }

        let label = style::label_style(13.0);
        chart.draw_series(series.points.iter().enumerate().map(|(j, p)| {
            let dy = label_offset(series.model, j, p.ratio.label());
            EmptyElement::at((p.x, p.y)) + Text::new(format!("r{}", p.ratio), (0, dy), label.clone())
        }))?;
    }

    root.present()?;
    info!(path = %path.as_ref().display(), panels = report.panels.len(), "panel chart written");
    Ok(())
}
