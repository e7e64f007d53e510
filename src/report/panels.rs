//! One-panel-per-model scatter reports with shared axis ranges

use tracing::info;

use super::{ModelSeries, RatioPoint, AXIS_PADDING};
use crate::aggregate::AxisRange;
use crate::experiment::MeasurementStore;
use crate::layout::{ExperimentLayout, Sensor};
use crate::metric::Metric;
use crate::run_log::AccuracyScale;

/// Which metrics go on which axis, and how the axes are labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    /// Horizontal metric
    pub x: Metric,
    /// Vertical metric
    pub y: Metric,
    /// Horizontal axis description
    pub x_desc: &'static str,
    /// Vertical axis description
    pub y_desc: &'static str,
}

impl PanelSpec {
    /// Accuracy (%) against wattmeter energy (kJ).
    pub const ACCURACY_VS_ENERGY: Self = Self {
        x: Metric::EnergyKilojoules(Sensor::Wattmeter),
        y: Metric::Accuracy(AccuracyScale::Percent),
        x_desc: "Avg Energy (kJ) [Lower is Better]",
        y_desc: "Avg Accuracy (%) [Higher is Better]",
    };

    /// Wattmeter energy (kJ) against average reasoning length.
    pub const ENERGY_VS_TOKENS: Self = Self {
        x: Metric::CotLength,
        y: Metric::EnergyKilojoules(Sensor::Wattmeter),
        x_desc: "Average CoT (Reasoning) Length",
        y_desc: "Avg Energy (kJ)",
    };

    /// Metrics to collect for this panel set.
    #[must_use]
    pub const fn metrics(&self) -> [Metric; 2] {
        [self.x, self.y]
    }
}

/// Per-model panels sharing one global, padded axis range.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelReport {
    /// Axis metrics and labels
    pub spec: PanelSpec,
    /// One series per layout model (possibly empty)
    pub panels: Vec<ModelSeries>,
    /// Shared horizontal range
    pub x_range: AxisRange,
    /// Shared vertical range
    pub y_range: AxisRange,
    /// Trials averaged per point
    pub trial_count: usize,
}

impl PanelReport {
    /// Build panels from paired trial means.
    ///
    /// A point exists only where at least one trial produced both metrics.
    /// Returns `None` when no model has any point.
    #[must_use]
    pub fn build(store: &MeasurementStore, layout: &ExperimentLayout, spec: PanelSpec) -> Option<Self> {
        let panels: Vec<ModelSeries> = layout
            .models
            .iter()
            .map(|&model| ModelSeries {
                model,
                points: layout
                    .ratios
                    .iter()
                    .filter_map(|ratio| {
                        store
                            .paired_mean(model, ratio, spec.x, spec.y)
                            .map(|(x, y)| RatioPoint {
                                ratio: ratio.clone(),
                                x,
                                y,
                            })
                    })
                    .collect(),
            })
            .collect();

        let points = || panels.iter().flat_map(|s| s.points.iter());
        let x_range = AxisRange::padded(points().map(|p| p.x), AXIS_PADDING)?;
        let y_range = AxisRange::padded(points().map(|p| p.y), AXIS_PADDING)?;
        info!(
            x_min = x_range.min,
            x_max = x_range.max,
            y_min = y_range.min,
            y_max = y_range.max,
            "global scales set"
        );

        Some(Self {
            spec,
            panels,
            x_range,
            y_range,
            trial_count: layout.trial_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{Measurement, RunId};
    use crate::layout::{ModelSize, Ratio};

    fn add(store: &mut MeasurementStore, model: ModelSize, ratio: &str, metric: Metric, v: f64) {
        let ratio: Ratio = ratio.parse().unwrap();
        store.add(Measurement::new(RunId::new(model, ratio, "1st"), metric, v));
    }

    #[test]
    fn test_panels_share_global_range() {
        let spec = PanelSpec::ENERGY_VS_TOKENS;
        let mut store = MeasurementStore::new();
        add(&mut store, ModelSize::B3, "1.0", spec.x, 300.0);
        add(&mut store, ModelSize::B3, "1.0", spec.y, 30.0);
        add(&mut store, ModelSize::B3, "0.5", spec.x, 150.0);
        add(&mut store, ModelSize::B3, "0.5", spec.y, 20.0);
        add(&mut store, ModelSize::B14, "0.7", spec.x, 500.0);
        add(&mut store, ModelSize::B14, "0.7", spec.y, 80.0);
        // energy without tokens: no point
        add(&mut store, ModelSize::B7, "0.9", spec.y, 1000.0);

        let layout = ExperimentLayout::default();
        let report = PanelReport::build(&store, &layout, spec).unwrap();

        assert_eq!(report.panels.len(), 3);
        assert_eq!(report.panels[0].points.len(), 2);
        assert!(report.panels[0].baseline().is_some());
        assert_eq!(report.panels[0].compressed().count(), 1);
        assert!(report.panels[1].is_empty());
        assert_eq!(report.panels[2].points.len(), 1);

        assert!((report.x_range.min - 115.0).abs() < 1e-9);
        assert!((report.x_range.max - 535.0).abs() < 1e-9);
        assert!((report.y_range.min - 14.0).abs() < 1e-9);
        assert!((report.y_range.max - 86.0).abs() < 1e-9);
        assert_eq!(report.trial_count, 3);
    }

    #[test]
    fn test_no_data_yields_none() {
        let store = MeasurementStore::new();
        let layout = ExperimentLayout::default();
        assert!(PanelReport::build(&store, &layout, PanelSpec::ACCURACY_VS_ENERGY).is_none());
    }
}
