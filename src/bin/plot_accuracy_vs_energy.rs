//! Accuracy vs energy, one panel per model, on shared axes

use anyhow::Context;
use energy_report::chart::panels;
use energy_report::experiment::MeasurementStore;
use energy_report::layout::{ExperimentLayout, LAYOUT_FILE};
use energy_report::logging;
use energy_report::report::{PanelReport, PanelSpec};

fn main() -> anyhow::Result<()> {
    logging::init();

    let layout = ExperimentLayout::load_or_default(LAYOUT_FILE)
        .with_context(|| format!("invalid layout in {LAYOUT_FILE}"))?;
    let spec = PanelSpec::ACCURACY_VS_ENERGY;
    println!(
        "Reading data across {} runs to calculate global scales...",
        layout.trial_count()
    );
    let store = MeasurementStore::collect(&layout, &spec.metrics());

    let Some(report) = PanelReport::build(&store, &layout, spec) else {
        println!("No data found to create the graph. Please check paths and files.");
        return Ok(());
    };
    println!(
        "Global Scales Set -> Energy: {:.1}-{:.1} kJ | Acc: {:.1}-{:.1}%",
        report.x_range.min, report.x_range.max, report.y_range.min, report.y_range.max
    );

    panels::render(&report, panels::TRADEOFF_OUTPUT_FILE)
        .with_context(|| format!("failed to write {}", panels::TRADEOFF_OUTPUT_FILE))?;
    println!("\n{}", "=".repeat(55));
    println!("Unified scale graph (Avg) saved: {}", panels::TRADEOFF_OUTPUT_FILE);
    println!("{}", "=".repeat(55));
    Ok(())
}
