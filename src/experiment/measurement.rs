//! Measurement - one scalar read from one run

use crate::metric::Metric;

use super::RunId;

/// Measurement is a single metric value read for one run.
///
/// Only values that were actually read are ever recorded; a missing or
/// unparseable file produces no measurement at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    run: RunId,
    metric: Metric,
    value: f64,
}

impl Measurement {
    /// Create a new measurement.
    ///
    /// # Arguments
    ///
    /// * `run` - Run the value was read from
    /// * `metric` - Which scalar was read
    /// * `value` - Metric value
    #[must_use]
    pub const fn new(run: RunId, metric: Metric, value: f64) -> Self {
        Self { run, metric, value }
    }

    /// Get the run identifier.
    #[must_use]
    pub const fn run(&self) -> &RunId {
        &self.run
    }

    /// Get the metric.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Get the metric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}
