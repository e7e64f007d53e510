//! Scalars readable from a run directory

use std::fmt;

use tracing::debug;

use crate::layout::{RunPaths, Sensor};
use crate::power::PowerSeries;
use crate::run_log::{read_run_log, AccuracyScale};
use crate::Result;

/// A scalar measurement of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// `output acc` from the run log
    Accuracy(AccuracyScale),
    /// `output avg_cot_length` from the run log
    CotLength,
    /// Integrated energy in joules
    EnergyJoules(Sensor),
    /// Integrated energy in kilojoules
    EnergyKilojoules(Sensor),
    /// Mean power in watts
    MeanPower(Sensor),
}

impl Metric {
    /// Read the metric, propagating why it is unavailable.
    ///
    /// # Errors
    ///
    /// Returns the underlying file, parse or sample-count error.
    pub fn try_read(self, paths: &RunPaths) -> Result<f64> {
        match self {
            Self::Accuracy(scale) => read_run_log(paths.run_log())?.require_accuracy(scale),
            Self::CotLength => read_run_log(paths.run_log())?.require_avg_cot_length(),
            Self::EnergyJoules(sensor) => {
                PowerSeries::load(paths.power_series(sensor))?.total_energy()
            }
            Self::EnergyKilojoules(sensor) => {
                Ok(Self::EnergyJoules(sensor).try_read(paths)? / 1000.0)
            }
            Self::MeanPower(sensor) => PowerSeries::load(paths.power_series(sensor))?.mean_power(),
        }
    }

    /// Read the metric; any failure is "no data for this point".
    #[must_use]
    pub fn read(self, paths: &RunPaths) -> Option<f64> {
        match self.try_read(paths) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(metric = %self, dir = %paths.dir().display(), error = %err, "no data");
                None
            }
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accuracy(AccuracyScale::Raw) => f.write_str("accuracy"),
            Self::Accuracy(AccuracyScale::Percent) => f.write_str("accuracy_pct"),
            Self::CotLength => f.write_str("avg_cot_length"),
            Self::EnergyJoules(sensor) => write!(f, "energy_j[{sensor:?}]"),
            Self::EnergyKilojoules(sensor) => write!(f, "energy_kj[{sensor:?}]"),
            Self::MeanPower(sensor) => write!(f, "mean_power_w[{sensor:?}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn run_dir() -> (tempfile::TempDir, RunPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths::new(dir.path());
        (dir, paths)
    }

    #[test]
    fn test_read_all_metrics() {
        let (_dir, paths) = run_dir();
        std::fs::write(
            paths.run_log(),
            "output acc = 0.8\noutput avg_cot_length = 150.0\n",
        )
        .unwrap();
        std::fs::write(paths.power_series(Sensor::Wattmeter), "[[0, 200], [10, 200]]").unwrap();
        std::fs::write(paths.power_series(Sensor::Bmc), "[[0, 150], [10, 170]]").unwrap();

        let acc = Metric::Accuracy(AccuracyScale::Percent).read(&paths).unwrap();
        assert!((acc - 80.0).abs() < 1e-9);
        assert_eq!(Metric::Accuracy(AccuracyScale::Raw).read(&paths), Some(0.8));
        assert_eq!(Metric::CotLength.read(&paths), Some(150.0));
        assert_eq!(
            Metric::EnergyJoules(Sensor::Wattmeter).read(&paths),
            Some(2000.0)
        );
        assert_eq!(
            Metric::EnergyKilojoules(Sensor::Wattmeter).read(&paths),
            Some(2.0)
        );
        assert_eq!(Metric::MeanPower(Sensor::Bmc).read(&paths), Some(160.0));
    }

    #[test]
    fn test_missing_files_are_absent() {
        let (_dir, paths) = run_dir();
        assert_eq!(Metric::CotLength.read(&paths), None);
        assert_eq!(Metric::EnergyJoules(Sensor::Bmc).read(&paths), None);
        assert!(matches!(
            Metric::CotLength.try_read(&paths),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_absent() {
        let (_dir, paths) = run_dir();
        std::fs::write(paths.power_series(Sensor::Wattmeter), "[[0, 1], oops").unwrap();
        assert_eq!(Metric::EnergyJoules(Sensor::Wattmeter).read(&paths), None);
    }
}
