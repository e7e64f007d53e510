//! Reasoning-token reduction relative to the uncompressed baseline

use tracing::warn;

use crate::aggregate::percent_reduction;
use crate::experiment::MeasurementStore;
use crate::layout::{ExperimentLayout, ModelSize, Ratio};
use crate::metric::Metric;

/// One ratio of a model's token curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionRow {
    /// Compression ratio
    pub ratio: Ratio,
    /// Mean generated tokens across trials
    pub avg_tokens: f64,
    /// Tokens removed versus the baseline, percent
    pub reduction_pct: f64,
    /// Baseline tokens scaled by the ratio
    pub ideal_tokens: f64,
}

/// A model's token curve in layout ratio order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReduction {
    /// Model size
    pub model: ModelSize,
    /// Mean baseline tokens
    pub baseline_tokens: f64,
    /// Rows
    pub rows: Vec<ReductionRow>,
}

/// Token reduction for every model with a measured baseline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReductionReport {
    /// Models with a baseline, in layout order
    pub models: Vec<ModelReduction>,
    /// Models skipped because the baseline was missing
    pub skipped: Vec<ModelSize>,
}

impl ReductionReport {
    /// Token metric the report is computed from
    pub const METRIC: Metric = Metric::CotLength;

    /// Build the report.
    #[must_use]
    pub fn build(store: &MeasurementStore, layout: &ExperimentLayout) -> Self {
        let baseline = layout.baseline();
        let mut report = Self::default();

        for &model in &layout.models {
            let Some(baseline_tokens) = baseline
                .and_then(|b| store.mean(model, b, Self::METRIC))
                .filter(|t| *t != 0.0)
            else {
                warn!(%model, "baseline tokens not found, skipping model");
                report.skipped.push(model);
                continue;
            };

            let rows = layout
                .ratios
                .iter()
                .filter_map(|ratio| {
                    let avg_tokens = store.mean(model, ratio, Self::METRIC)?;
                    Some(ReductionRow {
                        ratio: ratio.clone(),
                        avg_tokens,
                        reduction_pct: percent_reduction(baseline_tokens, avg_tokens)?,
                        ideal_tokens: baseline_tokens * ratio.value(),
                    })
                })
                .collect();

            report.models.push(ModelReduction {
                model,
                baseline_tokens,
                rows,
            });
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{Measurement, RunId};

    #[test]
    fn test_reduction_and_ideal_line() {
        let mut store = MeasurementStore::new();
        for (ratio, trial, tokens) in [
            ("1.0", "1st", 190.0),
            ("1.0", "2nd", 210.0),
            ("0.5", "1st", 150.0),
        ] {
            store.add(Measurement::new(
                RunId::new(ModelSize::B7, ratio.parse().unwrap(), trial),
                ReductionReport::METRIC,
                tokens,
            ));
        }

        let report = ReductionReport::build(&store, &ExperimentLayout::default());
        assert_eq!(report.skipped, vec![ModelSize::B3, ModelSize::B14]);
        let m = &report.models[0];
        assert_eq!(m.model, ModelSize::B7);
        assert!((m.baseline_tokens - 200.0).abs() < 1e-9);
        assert_eq!(m.rows.len(), 2);
        let half = &m.rows[1];
        assert!((half.reduction_pct - 25.0).abs() < 1e-9);
        assert!((half.ideal_tokens - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_label_without_decimal() {
        let mut store = MeasurementStore::new();
        for (ratio, tokens) in [("1", 300.0), ("0.7", 240.0)] {
            store.add(Measurement::new(
                RunId::new(ModelSize::B14, ratio.parse().unwrap(), "1st"),
                ReductionReport::METRIC,
                tokens,
            ));
        }
        let layout = ExperimentLayout::from_json_str(
            r#"{"trial_dirs": ["1st"], "models": ["14B"], "ratios": ["1", "0.7"]}"#,
        )
        .unwrap();

        let report = ReductionReport::build(&store, &layout);
        assert!(report.skipped.is_empty());
        let m = &report.models[0];
        assert!((m.baseline_tokens - 300.0).abs() < 1e-9);
        assert!((m.rows[1].reduction_pct - 20.0).abs() < 1e-9);
        assert!((m.rows[1].ideal_tokens - 210.0).abs() < 1e-9);
    }
}
