//! Measurement Store - in-memory store of everything read for a chart
//!
//! All reads happen up front in [`MeasurementStore::collect`]; chart
//! datasets are then computed from the store without touching the disk.

use tracing::debug;

use super::{Measurement, RunId};
use crate::aggregate;
use crate::layout::{ExperimentLayout, ModelSize, Ratio};
use crate::metric::Metric;

/// In-memory store of measurements.
///
/// ## Design
///
/// Measurements live in a vector in collection order (trial-major), so a
/// per-configuration query sees trials in the layout's order.
#[derive(Debug, Default)]
pub struct MeasurementStore {
    measurements: Vec<Measurement>,
}

impl MeasurementStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `metrics` for every run of `layout`.
    ///
    /// Unreadable values are skipped (logged at debug level).
    #[must_use]
    pub fn collect(layout: &ExperimentLayout, metrics: &[Metric]) -> Self {
        let mut store = Self::new();
        for run in RunId::enumerate(layout) {
            let paths = run.paths(layout);
            for &metric in metrics {
                if let Some(value) = metric.read(&paths) {
                    store.add(Measurement::new(run.clone(), metric, value));
                }
            }
        }
        debug!(
            measurements = store.len(),
            trials = layout.trial_count(),
            "collected measurements"
        );
        store
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Get the number of measurements in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Add a measurement to the store.
    pub fn add(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// Value of `metric` for a single run.
    #[must_use]
    pub fn value(&self, run: &RunId, metric: Metric) -> Option<f64> {
        self.measurements
            .iter()
            .find(|m| m.metric() == metric && m.run() == run)
            .map(Measurement::value)
    }

    /// Values of `metric` for every trial of a configuration that has one.
    #[must_use]
    pub fn trial_values(&self, model: ModelSize, ratio: &Ratio, metric: Metric) -> Vec<f64> {
        self.measurements
            .iter()
            .filter(|m| m.metric() == metric && m.run().is_config(model, ratio))
            .map(Measurement::value)
            .collect()
    }

    /// Mean of `metric` across the trials of a configuration.
    ///
    /// `None` if no trial produced a value.
    #[must_use]
    pub fn mean(&self, model: ModelSize, ratio: &Ratio, metric: Metric) -> Option<f64> {
        aggregate::mean(
            self.trial_values(model, ratio, metric)
                .into_iter()
                .map(Some),
        )
    }

    /// Means of two metrics over the trials where both were read.
    ///
    /// A trial with only one of the two values does not count toward
    /// either mean.
    #[must_use]
    pub fn paired_mean(
        &self,
        model: ModelSize,
        ratio: &Ratio,
        x: Metric,
        y: Metric,
    ) -> Option<(f64, f64)> {
        let pairs: Vec<(f64, f64)> = self
            .measurements
            .iter()
            .filter(|m| m.metric() == x && m.run().is_config(model, ratio))
            .filter_map(|mx| self.value(mx.run(), y).map(|vy| (mx.value(), vy)))
            .collect();
        let mean_x = aggregate::mean(pairs.iter().map(|p| Some(p.0)))?;
        let mean_y = aggregate::mean(pairs.iter().map(|p| Some(p.1)))?;
        Some((mean_x, mean_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(label: &str) -> Ratio {
        label.parse().unwrap()
    }

    fn run(trial: &str, r: &str) -> RunId {
        RunId::new(ModelSize::B7, ratio(r), trial)
    }

    #[test]
    fn test_store_default() {
        let store = MeasurementStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.mean(ModelSize::B7, &ratio("1.0"), Metric::CotLength), None);
    }

    #[test]
    fn test_mean_over_present_trials() {
        let mut store = MeasurementStore::new();
        store.add(Measurement::new(run("1st", "0.9"), Metric::CotLength, 10.0));
        store.add(Measurement::new(run("2nd", "0.9"), Metric::CotLength, 12.0));
        store.add(Measurement::new(run("4th", "0.9"), Metric::CotLength, 14.0));
        // other ratio, other metric
        store.add(Measurement::new(run("1st", "0.8"), Metric::CotLength, 99.0));
        store.add(Measurement::new(
            run("1st", "0.9"),
            Metric::Accuracy(crate::run_log::AccuracyScale::Percent),
            50.0,
        ));

        assert_eq!(
            store.mean(ModelSize::B7, &ratio("0.9"), Metric::CotLength),
            Some(12.0)
        );
        assert_eq!(
            store.trial_values(ModelSize::B7, &ratio("0.9"), Metric::CotLength),
            vec![10.0, 12.0, 14.0]
        );
        assert_eq!(store.mean(ModelSize::B3, &ratio("0.9"), Metric::CotLength), None);
    }

    #[test]
    fn test_paired_mean_requires_both() {
        use crate::layout::Sensor;
        let energy = Metric::EnergyKilojoules(Sensor::Wattmeter);
        let mut store = MeasurementStore::new();
        store.add(Measurement::new(run("1st", "0.5"), Metric::CotLength, 100.0));
        store.add(Measurement::new(run("1st", "0.5"), energy, 10.0));
        store.add(Measurement::new(run("2nd", "0.5"), Metric::CotLength, 200.0));
        store.add(Measurement::new(run("3rd", "0.5"), energy, 30.0));
        store.add(Measurement::new(run("3rd", "0.5"), Metric::CotLength, 300.0));

        let (tok, eng) = store
            .paired_mean(ModelSize::B7, &ratio("0.5"), Metric::CotLength, energy)
            .unwrap();
        assert!((tok - 200.0).abs() < 1e-12);
        assert!((eng - 20.0).abs() < 1e-12);

        // the unpaired 2nd trial still counts for the single-metric mean
        assert_eq!(
            store.mean(ModelSize::B7, &ratio("0.5"), Metric::CotLength),
            Some(200.0)
        );
        assert_eq!(
            store.paired_mean(ModelSize::B7, &ratio("0.9"), Metric::CotLength, energy),
            None
        );
    }
}
