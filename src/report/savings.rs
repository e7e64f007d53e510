//! Energy saving relative to the uncompressed baseline

use tracing::warn;

use crate::aggregate::percent_saving;
use crate::experiment::MeasurementStore;
use crate::layout::{ExperimentLayout, ModelSize, Ratio, Sensor};
use crate::metric::Metric;

/// One ratio of a model's savings curve.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsRow {
    /// Compression ratio
    pub ratio: Ratio,
    /// Mean energy across trials (joules)
    pub avg_joules: f64,
    /// Saving versus the baseline, percent
    pub saving_pct: f64,
}

/// A model's savings curve, ratios descending.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSavings {
    /// Model size
    pub model: ModelSize,
    /// Mean baseline energy (joules)
    pub baseline_joules: f64,
    /// Rows, baseline (0 %) first
    pub rows: Vec<SavingsRow>,
}

/// Savings for every model with a measured baseline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavingsReport {
    /// Models with a baseline, in layout order
    pub models: Vec<ModelSavings>,
    /// Models skipped because the baseline was missing
    pub skipped: Vec<ModelSize>,
    /// Trials averaged per point
    pub trial_count: usize,
}

impl SavingsReport {
    /// Energy metric the report is computed from
    pub const METRIC: Metric = Metric::EnergyJoules(Sensor::Wattmeter);

    /// Build the report.
    ///
    /// A model whose baseline energy is absent in every trial is skipped
    /// entirely and listed in `skipped`.
    #[must_use]
    pub fn build(store: &MeasurementStore, layout: &ExperimentLayout) -> Self {
        let baseline = layout.baseline();
        let mut report = Self {
            trial_count: layout.trial_count(),
            ..Self::default()
        };

        for &model in &layout.models {
            let Some(baseline_joules) = baseline
                .and_then(|b| store.mean(model, b, Self::METRIC))
                .filter(|j| *j != 0.0)
            else {
                warn!(%model, "baseline missing, skipping model");
                report.skipped.push(model);
                continue;
            };

            let mut rows: Vec<SavingsRow> = layout
                .ratios
                .iter()
                .filter_map(|ratio| {
                    let avg_joules = store.mean(model, ratio, Self::METRIC)?;
                    Some(SavingsRow {
                        ratio: ratio.clone(),
                        avg_joules,
                        saving_pct: percent_saving(baseline_joules, avg_joules)?,
                    })
                })
                .collect();
            rows.sort_by(|a, b| b.ratio.value().total_cmp(&a.ratio.value()));

            report.models.push(ModelSavings {
                model,
                baseline_joules,
                rows,
            });
        }
        report
    }

    /// True when no model could be plotted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.iter().all(|m| m.rows.is_empty())
    }
}
