//! Energy saving (%) against compression ratio, averaged over trials

use anyhow::Context;
use energy_report::chart::savings;
use energy_report::experiment::MeasurementStore;
use energy_report::layout::{ExperimentLayout, LAYOUT_FILE};
use energy_report::logging;
use energy_report::report::SavingsReport;

fn main() -> anyhow::Result<()> {
    logging::init();

    let layout = ExperimentLayout::load_or_default(LAYOUT_FILE)
        .with_context(|| format!("invalid layout in {LAYOUT_FILE}"))?;
    let store = MeasurementStore::collect(&layout, &[SavingsReport::METRIC]);
    let report = SavingsReport::build(&store, &layout);

    println!("{:<6} | {:<5} | {:<12} | {:<10}", "MODEL", "RATIO", "AVG JOULES", "SAVING %");
    println!("{}", "-".repeat(55));
    for model in &report.skipped {
        println!("Skipping {}: Baseline missing.", model.label());
    }
    for model in &report.models {
        for row in &model.rows {
            println!(
                "{:<6} | {:<5} | {:<12.0} | {:<10.2}%",
                model.model.label(),
                row.ratio.label(),
                row.avg_joules,
                row.saving_pct
            );
        }
    }

    if report.is_empty() {
        println!("No energy data found; no graph written.");
        return Ok(());
    }

    savings::render(&report, savings::OUTPUT_FILE)
        .with_context(|| format!("failed to write {}", savings::OUTPUT_FILE))?;
    println!("\nGraph saved: {}", savings::OUTPUT_FILE);
    Ok(())
}
