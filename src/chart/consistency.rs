//! Wattmeter and BMC mean power on twin y axes

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontTransform;
use tracing::info;

use super::style::FONT;
use crate::aggregate::AxisRange;
use crate::report::ConsistencyReport;
use crate::Result;

/// Output file name
pub const OUTPUT_FILE: &str = "graph_consistency_dual_axis_avg.png";

const WATTMETER_COLOR: RGBColor = RGBColor(0xd6, 0x27, 0x28);
const BMC_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

/// Chart caption, with the correlation when one could be computed.
#[must_use]
pub fn caption(report: &ConsistencyReport) -> String {
    match report.correlation {
        Some(r) => format!("Power Sensor Consistency: Wattmeter vs BMC (Pearson r = {r:.3})"),
        None => "Power Sensor Consistency: Wattmeter vs BMC".to_string(),
    }
}

/// Render both sensors over the (model, ratio) configurations.
///
/// # Errors
///
/// Returns error if the report is empty or the image cannot be written.
pub fn render<P: AsRef<Path>>(report: &ConsistencyReport, path: P) -> Result<()> {
    let (Some(watt_range), Some(bmc_range)) = (
        AxisRange::padded(report.points.iter().map(|p| p.wattmeter), 0.1),
        AxisRange::padded(report.points.iter().map(|p| p.bmc), 0.1),
    ) else {
        return Err(crate::Error::Render("no sensor readings to plot".into()));
    };

    let labels: Vec<String> = report.points.iter().map(|p| p.label()).collect();
    let n = i32::try_from(labels.len()).unwrap_or(i32::MAX);
    let category = |x: &i32| {
        usize::try_from(*x)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default()
    };

    let root = BitMapBackend::new(path.as_ref(), (1400, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption(report), (FONT, 24.0).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(110)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d(-1..n, watt_range.as_range())?
        .set_secondary_coord(-1..n, bmc_range.as_range());

    chart
        .configure_mesh()
        .x_labels(labels.len() + 2)
        .x_label_formatter(&category)
        .x_label_style(
            (FONT, 13.0)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc("Model | Compression Ratio")
        .y_desc("Wattmeter Power (W)")
        .axis_desc_style((FONT, 18.0).into_font())
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("BMC Power (W)")
        .axis_desc_style((FONT, 18.0).into_font())
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()?;

    let watt: Vec<(i32, f64)> = (0..).zip(report.points.iter().map(|p| p.wattmeter)).collect();
    let bmc: Vec<(i32, f64)> = (0..).zip(report.points.iter().map(|p| p.bmc)).collect();

    chart
        .draw_series(LineSeries::new(watt.clone(), WATTMETER_COLOR.stroke_width(2)))?
        .label("Wattmeter")
        .legend(|(x, y)| {
            EmptyElement::at((x + 10, y))
                + PathElement::new(vec![(-10, 0), (10, 0)], WATTMETER_COLOR.stroke_width(2))
                + Circle::new((0, 0), 4, WATTMETER_COLOR.filled())
        });
    chart.draw_series(
        watt.into_iter()
            .map(|c| Circle::new(c, 5, WATTMETER_COLOR.filled())),
    )?;

    chart
        .draw_secondary_series(DashedLineSeries::new(
            bmc.clone(),
            8,
            5,
            BMC_COLOR.stroke_width(2),
        ))?
        .label("BMC")
        .legend(|(x, y)| {
            EmptyElement::at((x + 10, y))
                + PathElement::new(vec![(-10, 0), (10, 0)], BMC_COLOR.stroke_width(2))
                + Cross::new((0, 0), 4, BMC_COLOR.stroke_width(2))
        });
    chart.draw_secondary_series(
        bmc.into_iter()
            .map(|c| Cross::new(c, 6, BMC_COLOR.stroke_width(2))),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, 16.0).into_font())
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    info!(
        path = %path.as_ref().display(),
        configs = report.points.len(),
        correlation = ?report.correlation,
        "sensor consistency chart written"
    );
    Ok(())
}
