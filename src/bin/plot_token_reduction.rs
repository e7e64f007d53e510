//! Average reasoning tokens per ratio against the ideal linear reduction

use anyhow::Context;
use energy_report::chart::reduction;
use energy_report::experiment::MeasurementStore;
use energy_report::layout::{ExperimentLayout, LAYOUT_FILE};
use energy_report::logging;
use energy_report::report::ReductionReport;

fn main() -> anyhow::Result<()> {
    logging::init();

    let layout = ExperimentLayout::load_or_default(LAYOUT_FILE)
        .with_context(|| format!("invalid layout in {LAYOUT_FILE}"))?;
    let store = MeasurementStore::collect(&layout, &[ReductionReport::METRIC]);
    let report = ReductionReport::build(&store, &layout);

    println!("{:<6} | {:<5} | {:<12} | {:<10}", "MODEL", "RATIO", "AVG TOKENS", "REDUCTION %");
    println!("{}", "-".repeat(55));
    for model in &report.skipped {
        println!("Skipping {}: Baseline tokens not found.", model.label());
    }
    for model in &report.models {
        for row in &model.rows {
            println!(
                "{:<6} | {:<5} | {:<12.1} | -{:<9.1}%",
                model.model.label(),
                row.ratio.label(),
                row.avg_tokens,
                row.reduction_pct
            );
        }
    }

    if report.models.is_empty() {
        println!("No token data found; no graph written.");
        return Ok(());
    }

    reduction::render(&report, reduction::OUTPUT_FILE)
        .with_context(|| format!("failed to write {}", reduction::OUTPUT_FILE))?;
    println!("\n{}", "=".repeat(50));
    println!("Graph saved: {}", reduction::OUTPUT_FILE);
    Ok(())
}
