//! Energy saving against compression ratio

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::info;

use super::style::{model_color, FONT, REFERENCE_GRAY};
use super::{ratio_axis, ratio_tick};
use crate::aggregate::AxisRange;
use crate::report::SavingsReport;
use crate::Result;

/// Output file name
pub const OUTPUT_FILE: &str = "graph_energy_savings_avg.png";

/// Render the savings curves, ratio 1.0 on the left.
///
/// # Errors
///
/// Returns error if the report is empty or the image cannot be written.
pub fn render<P: AsRef<Path>>(report: &SavingsReport, path: P) -> Result<()> {
    let savings = report
        .models
        .iter()
        .flat_map(|m| m.rows.iter().map(|r| r.saving_pct))
        .chain(std::iter::once(0.0));
    let Some(y_range) = AxisRange::padded(savings, 0.1).filter(|_| !report.is_empty()) else {
        return Err(crate::Error::Render("no savings to plot".into()));
    };

    let root = BitMapBackend::new(path.as_ref(), (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Energy Efficiency vs Compression Ratio ({}-Run Avg)",
                report.trial_count
            ),
            (FONT, 26.0).into_font().style(FontStyle::Bold),
        )
        .margin(20)
        .x_label_area_size(55)
        .y_label_area_size(70)
        .build_cartesian_2d(ratio_axis(1.02)..ratio_axis(0.48), y_range.as_range())?;

    chart
        .configure_mesh()
        .x_desc("Compression Ratio (Lower = More Compressed)")
        .y_desc("Energy Savings (%)")
        .axis_desc_style((FONT, 18.0).into_font())
        .label_style((FONT, 15.0).into_font())
        .x_labels(12)
        .x_label_formatter(&ratio_tick)
        .y_label_formatter(&|y| format!("{y:.0}%"))
        .draw()?;

    chart
        .draw_series(DashedLineSeries::new(
            [(ratio_axis(1.02), 0.0), (ratio_axis(0.48), 0.0)],
            8,
            5,
            REFERENCE_GRAY.stroke_width(2),
        ))?
        .label("Baseline (0%)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], REFERENCE_GRAY.stroke_width(2)));

    for model in &report.models {
        let color = model_color(model.model);
        let points: Vec<(f64, f64)> = model
            .rows
            .iter()
            .map(|r| (ratio_axis(r.ratio.value()), r.saving_pct))
            .collect();
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(3)))?
            .label(format!("Model {}", model.model))
            .legend(move |(x, y)| {
                EmptyElement::at((x + 10, y))
                    + PathElement::new(vec![(-10, 0), (10, 0)], color.stroke_width(3))
                    + Circle::new((0, 0), 5, color.filled())
            });
        chart.draw_series(points.into_iter().map(|c| Circle::new(c, 6, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, 16.0).into_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    info!(path = %path.as_ref().display(), models = report.models.len(), "savings chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render(&SavingsReport::default(), dir.path().join(OUTPUT_FILE));
        assert!(matches!(err, Err(crate::Error::Render(_))));
    }

    #[test]
    fn test_render_writes_png() {
        use crate::layout::ModelSize;
        use crate::report::{ModelSavings, SavingsRow};

        let row = |ratio: &str, avg_joules, saving_pct| SavingsRow {
            ratio: ratio.parse().unwrap(),
            avg_joules,
            saving_pct,
        };
        let report = SavingsReport {
            models: vec![ModelSavings {
                model: ModelSize::B7,
                baseline_joules: 20_000.0,
                rows: vec![row("1.0", 20_000.0, 0.0), row("0.8", 17_000.0, 15.0), row("0.5", 21_000.0, -5.0)],
            }],
            skipped: vec![ModelSize::B3],
            trial_count: 3,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        render(&report, &path).unwrap();
        super::super::assert_png(&path);
    }
}
