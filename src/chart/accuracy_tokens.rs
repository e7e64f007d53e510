//! Accuracy vs. reasoning tokens, one connected curve per model

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use super::style::{self, model_color, BASELINE_STAR, FONT, REFERENCE_GRAY};
use crate::aggregate::AxisRange;
use crate::report::AccuracyTokensReport;
use crate::Result;

/// Output file name
pub const OUTPUT_FILE: &str = "graph_accuracy_tokens_connected_avg.png";

/// Render the chart.
///
/// Every model's points are joined in token order, baseline included; the
/// baseline is overdrawn with a star and marked by a dashed horizontal
/// reference line.
///
/// # Errors
///
/// Returns error if the report is empty or the image cannot be written.
pub fn render<P: AsRef<Path>>(report: &AccuracyTokensReport, path: P) -> Result<()> {
    let points = || report.series.iter().flat_map(|s| s.points.iter());
    let (Some(x_range), Some(y_range)) = (
        AxisRange::padded(points().map(|p| p.x), 0.05),
        AxisRange::padded(points().map(|p| p.y), 0.05),
    ) else {
        return Err(crate::Error::Render("no points to plot".into()));
    };

    let root = BitMapBackend::new(path.as_ref(), (1000, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.as_range(), y_range.as_range())?;

    chart
        .configure_mesh()
        .x_desc(format!("Reasoning Tokens (Avg of {} Runs)", report.trial_count))
        .y_desc(format!("Accuracy (%) (Avg of {} Runs)", report.trial_count))
        .axis_desc_style((FONT, 20.0).into_font())
        .label_style((FONT, 16.0).into_font())
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()?;

    for series in &report.series {
        if let Some(base) = series.baseline() {
            chart.draw_series(DashedLineSeries::new(
                [(x_range.min, base.y), (x_range.max, base.y)],
                8,
                5,
                REFERENCE_GRAY.mix(0.5).stroke_width(2),
            ))?;
        }
    }

    for series in &report.series {
        let color = model_color(series.model);
        chart
            .draw_series(LineSeries::new(
                series.points.iter().map(|p| (p.x, p.y)),
                color.stroke_width(3),
            ))?
            .label(format!("TokenSkip ({})", series.model))
            .legend(move |(x, y)| {
                EmptyElement::at((x + 10, y))
                    + PathElement::new(vec![(-10, 0), (10, 0)], color.stroke_width(3))
                    + Circle::new((0, 0), 5, color.filled())
            });
        chart.draw_series(
            series
                .points
                .iter()
                .map(|p| Circle::new((p.x, p.y), 6, color.filled())),
        )?;
    }

    chart
        .draw_series(
            report
                .series
                .iter()
                .filter_map(|s| s.baseline())
                .map(|p| style::star((p.x, p.y), 14, BASELINE_STAR)),
        )?
        .label("Original")
        .legend(|(x, y)| style::star((x + 10, y), 9, BASELINE_STAR));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .label_font((FONT, 18.0).into_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    info!(path = %path.as_ref().display(), "accuracy/tokens chart written");
    Ok(())
}
