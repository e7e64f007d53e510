//! Wattmeter vs. BMC mean power on twin axes, with their correlation

use anyhow::Context;
use energy_report::chart::consistency;
use energy_report::experiment::MeasurementStore;
use energy_report::layout::{ExperimentLayout, LAYOUT_FILE};
use energy_report::logging;
use energy_report::report::ConsistencyReport;

fn main() -> anyhow::Result<()> {
    logging::init();

    let layout = ExperimentLayout::load_or_default(LAYOUT_FILE)
        .with_context(|| format!("invalid layout in {LAYOUT_FILE}"))?;
    let store = MeasurementStore::collect(&layout, &ConsistencyReport::METRICS);
    let report = ConsistencyReport::build(&store, &layout);

    if report.is_empty() {
        println!("No data found!");
        return Ok(());
    }

    for point in &report.points {
        println!(
            "{:<10} | wattmeter {:>8.1} W | bmc {:>8.1} W",
            point.label(),
            point.wattmeter,
            point.bmc
        );
    }
    if let Some(r) = report.correlation {
        println!("Pearson r = {r:.3}");
    }

    consistency::render(&report, consistency::OUTPUT_FILE)
        .with_context(|| format!("failed to write {}", consistency::OUTPUT_FILE))?;
    println!("Graph saved as: {}", consistency::OUTPUT_FILE);
    Ok(())
}
