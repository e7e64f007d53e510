//! Wattmeter vs. BMC sensor agreement

use crate::aggregate::pearson;
use crate::experiment::MeasurementStore;
use crate::layout::{ExperimentLayout, ModelSize, Ratio, Sensor};
use crate::metric::Metric;

/// Mean power of both sensors for one (model, ratio).
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyPoint {
    /// Model size
    pub model: ModelSize,
    /// Compression ratio
    pub ratio: Ratio,
    /// Trial-averaged wattmeter mean power (W)
    pub wattmeter: f64,
    /// Trial-averaged BMC mean power (W)
    pub bmc: f64,
}

impl ConsistencyPoint {
    /// Axis label, e.g. `"14B | 0.5"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} | {}", self.model, self.ratio)
    }
}

/// Sensor readings side by side, plus their correlation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsistencyReport {
    /// Points in model-major layout order
    pub points: Vec<ConsistencyPoint>,
    /// Pearson correlation between the two sensors
    pub correlation: Option<f64>,
}

impl ConsistencyReport {
    /// Metrics to collect
    pub const METRICS: [Metric; 2] = [
        Metric::MeanPower(Sensor::Wattmeter),
        Metric::MeanPower(Sensor::Bmc),
    ];

    /// Build the report.
    ///
    /// Each sensor is averaged over its own trials; a configuration is kept
    /// when both sensors have at least one reading.
    #[must_use]
    pub fn build(store: &MeasurementStore, layout: &ExperimentLayout) -> Self {
        let [watt, bmc] = Self::METRICS;
        let points: Vec<ConsistencyPoint> = layout
            .models
            .iter()
            .flat_map(|&model| {
                layout.ratios.iter().filter_map(move |ratio| {
                    Some(ConsistencyPoint {
                        model,
                        ratio: ratio.clone(),
                        wattmeter: store.mean(model, ratio, watt)?,
                        bmc: store.mean(model, ratio, bmc)?,
                    })
                })
            })
            .collect();

        let xs: Vec<f64> = points.iter().map(|p| p.wattmeter).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.bmc).collect();
        Self {
            correlation: pearson(&xs, &ys),
            points,
        }
    }

    /// True when no configuration had both sensors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
