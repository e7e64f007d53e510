//! Accuracy vs. reasoning tokens, one connected curve per model

use anyhow::Context;
use energy_report::chart::accuracy_tokens;
use energy_report::experiment::MeasurementStore;
use energy_report::layout::{ExperimentLayout, LAYOUT_FILE};
use energy_report::logging;
use energy_report::report::AccuracyTokensReport;

fn main() -> anyhow::Result<()> {
    logging::init();

    let layout = ExperimentLayout::load_or_default(LAYOUT_FILE)
        .with_context(|| format!("invalid layout in {LAYOUT_FILE}"))?;
    let store = MeasurementStore::collect(&layout, &AccuracyTokensReport::METRICS);
    let report = AccuracyTokensReport::build(&store, &layout);

    for series in &report.series {
        println!("Processing {}... {} point(s)", series.model, series.points.len());
    }

    if report.is_empty() {
        println!("No data found to create the graph. Please check paths and files.");
        return Ok(());
    }

    accuracy_tokens::render(&report, accuracy_tokens::OUTPUT_FILE)
        .with_context(|| format!("failed to write {}", accuracy_tokens::OUTPUT_FILE))?;
    println!("Graph saved as: {}", accuracy_tokens::OUTPUT_FILE);
    Ok(())
}
