//! Accuracy against reasoning tokens, all models on one chart

use super::{ModelSeries, RatioPoint};
use crate::experiment::MeasurementStore;
use crate::layout::ExperimentLayout;
use crate::metric::Metric;
use crate::run_log::AccuracyScale;

/// Connected accuracy/token curves, one per model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccuracyTokensReport {
    /// Series with points sorted by token count; empty models omitted
    pub series: Vec<ModelSeries>,
    /// Trials averaged per point
    pub trial_count: usize,
}

impl AccuracyTokensReport {
    /// Metrics to collect. Accuracy is plotted as logged.
    pub const METRICS: [Metric; 2] = [Metric::CotLength, Metric::Accuracy(AccuracyScale::Raw)];

    /// Build the report.
    ///
    /// Unlike the panel charts the baseline stays on the connected line;
    /// points are ordered by token count.
    #[must_use]
    pub fn build(store: &MeasurementStore, layout: &ExperimentLayout) -> Self {
        let [tokens, accuracy] = Self::METRICS;
        let series = layout
            .models
            .iter()
            .filter_map(|&model| {
                let mut points: Vec<RatioPoint> = layout
                    .ratios
                    .iter()
                    .filter_map(|ratio| {
                        let (x, y) = store.paired_mean(model, ratio, tokens, accuracy)?;
                        Some(RatioPoint {
                            ratio: ratio.clone(),
                            x,
                            y,
                        })
                    })
                    .collect();
                points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
                let series = ModelSeries { model, points };
                (!series.is_empty()).then_some(series)
            })
            .collect();

        Self {
            series,
            trial_count: layout.trial_count(),
        }
    }

    /// True when no model has a point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
