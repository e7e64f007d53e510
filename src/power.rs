//! Power sample series
//!
//! Sensors dump their readings as a JSON array in one of two shapes:
//!
//! ```text
//! [[1718000000.0, 212.5], [1718000001.0, 214.0], ...]
//! [{"timestamp": "2024-06-10T08:00:00", "value": 212.5}, ...]
//! ```
//!
//! Timestamps are epoch seconds or ISO-8601 text and are not guaranteed to
//! be sorted. Total energy is the trapezoidal integral of value over time,
//! so watts over seconds yield joules.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// Naive ISO-8601 layouts accepted after RFC 3339 fails
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts with a space separator (RFC 3339 requires `T`)
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%#z"];

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSample {
    Pair(Vec<Value>),
    Record {
        timestamp: Option<Value>,
        value: Option<Value>,
    },
}

/// Parse a sample timestamp into epoch seconds.
///
/// Numbers are taken as epoch seconds. Strings are ISO-8601; naive values
/// (no offset) are read as UTC. Anything else is `None`.
#[must_use]
pub fn parse_timestamp(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_iso8601(s.trim()),
        _ => None,
    }
}

#[allow(clippy::cast_precision_loss)]
fn parse_iso8601(s: &str) -> Option<f64> {
    let micros = DateTime::parse_from_rfc3339(s)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        })
        .map(|dt| dt.timestamp_micros())
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.and_utc().timestamp_micros())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().timestamp_micros())
        })?;
    Some(micros as f64 / 1_000_000.0)
}

/// Numeric reading; `"NaN"` and `"inf"` strings count as unreadable.
fn parse_value(raw: Option<&Value>) -> Option<f64> {
    let value = match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// One power reading.
///
/// `timestamp` is `None` when the raw timestamp could not be parsed;
/// `value` is `None` when the reading itself was unreadable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    /// Epoch seconds
    pub timestamp: Option<f64>,
    /// Reading (watts)
    pub value: Option<f64>,
}

impl PowerSample {
    /// Sample with a valid timestamp and value.
    #[must_use]
    pub const fn new(timestamp: f64, value: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            value: Some(value),
        }
    }
}

/// Power readings of one sensor for one run, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PowerSeries {
    samples: Vec<PowerSample>,
}

impl PowerSeries {
    /// Wrap already-parsed samples.
    #[must_use]
    pub fn new(samples: Vec<PowerSample>) -> Self {
        Self { samples }
    }

    /// Decode a sample array.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not a JSON array of pairs/records,
    /// or a pair has fewer than two entries.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawSample> = serde_json::from_str(json)?;
        let samples = raw
            .into_iter()
            .enumerate()
            .map(|(i, sample)| match sample {
                RawSample::Pair(pair) if pair.len() >= 2 => Ok(PowerSample {
                    timestamp: parse_timestamp(&pair[0]),
                    value: parse_value(Some(&pair[1])),
                }),
                RawSample::Pair(pair) => Err(Error::MalformedSeries(format!(
                    "sample {i} has {} element(s), expected [timestamp, value]",
                    pair.len()
                ))),
                RawSample::Record { timestamp, value } => Ok(PowerSample {
                    timestamp: timestamp.as_ref().and_then(parse_timestamp),
                    value: parse_value(value.as_ref()),
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { samples })
    }

    /// Load a sample array from disk.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or decoded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// All samples in file order.
    #[must_use]
    pub fn samples(&self) -> &[PowerSample] {
        &self.samples
    }

    /// Number of samples, timed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the file held no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(timestamp, value)` pairs with a valid timestamp, sorted by time.
    ///
    /// Ties are broken by value so the result does not depend on the input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns error if a sample with a valid timestamp has an unreadable
    /// value. Untimed samples are dropped before their value is looked at.
    pub fn timed(&self) -> Result<Vec<(f64, f64)>> {
        let mut points = self
            .samples
            .iter()
            .filter_map(|s| s.timestamp.map(|t| (t, s.value)))
            .map(|(t, v)| {
                v.map(|v| (t, v)).ok_or_else(|| {
                    Error::MalformedSeries(format!("unreadable value at timestamp {t}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        Ok(points)
    }

    /// Trapezoidal integral of value over time (joules for watts/seconds).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientSamples`] with fewer than two timed
    /// samples, or [`Error::MalformedSeries`] for an unreadable value.
    pub fn total_energy(&self) -> Result<f64> {
        let points = self.timed()?;
        if points.len() < 2 {
            return Err(Error::InsufficientSamples {
                found: points.len(),
            });
        }
        Ok(trapezoid(&points))
    }

    /// Mean of every reading, timestamp validity notwithstanding.
    ///
    /// # Errors
    ///
    /// Returns error for an empty series or any unreadable value.
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_power(&self) -> Result<f64> {
        if self.samples.is_empty() {
            return Err(Error::InsufficientSamples { found: 0 });
        }
        let mut sum = 0.0;
        for (i, sample) in self.samples.iter().enumerate() {
            sum += sample
                .value
                .ok_or_else(|| Error::MalformedSeries(format!("unreadable value in sample {i}")))?;
        }
        Ok(sum / self.samples.len() as f64)
    }
}

/// Trapezoidal rule over points already sorted by x.
#[must_use]
pub fn trapezoid(points: &[(f64, f64)]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_power_pairs() {
        let series = PowerSeries::from_json_str("[[0, 10], [10, 10]]").unwrap();
        assert!((series.total_energy().unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_form_matches_pairs() {
        let pairs = PowerSeries::from_json_str("[[0, 10], [5, 20], [10, 10]]").unwrap();
        let records = PowerSeries::from_json_str(
            r#"[{"timestamp": 10, "value": 10}, {"timestamp": 0, "value": 10}, {"timestamp": 5, "value": "20"}]"#,
        )
        .unwrap();
        let expected = 5.0 * 15.0 + 5.0 * 15.0;
        assert!((pairs.total_energy().unwrap() - expected).abs() < 1e-9);
        assert!((records.total_energy().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_iso_timestamps() {
        let series = PowerSeries::from_json_str(
            r#"[["2024-06-10T08:00:10", 10], ["2024-06-10T08:00:00", 10]]"#,
        )
        .unwrap();
        assert!((series.total_energy().unwrap() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_iso_timestamp_variants_agree() {
        let zulu = parse_timestamp(&Value::from("2024-06-10T08:00:00Z")).unwrap();
        let naive = parse_timestamp(&Value::from("2024-06-10T08:00:00")).unwrap();
        let spaced = parse_timestamp(&Value::from("2024-06-10 08:00:00.000")).unwrap();
        let offset = parse_timestamp(&Value::from("2024-06-10T10:00:00+02:00")).unwrap();
        assert!((zulu - naive).abs() < 1e-9);
        assert!((zulu - spaced).abs() < 1e-9);
        assert!((zulu - offset).abs() < 1e-9);
        assert!((zulu - 1_718_006_400.0).abs() < 1e-6);
    }

    #[test]
    fn test_fractional_iso_seconds() {
        let t = parse_timestamp(&Value::from("1970-01-01T00:00:01.5")).unwrap();
        assert!((t - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_unparseable_timestamps_dropped() {
        let series = PowerSeries::from_json_str(
            r#"[[0, 10], ["yesterday", 999], [null, 999], [10, 10], {"value": 5}]"#,
        )
        .unwrap();
        assert_eq!(series.len(), 5);
        assert!((series.total_energy().unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fewer_than_two_timed_samples() {
        let single = PowerSeries::from_json_str("[[0, 10], [\"bad\", 10]]").unwrap();
        assert!(matches!(
            single.total_energy(),
            Err(Error::InsufficientSamples { found: 1 })
        ));
        let empty = PowerSeries::from_json_str("[]").unwrap();
        assert!(empty.is_empty());
        assert!(empty.total_energy().is_err());
        assert!(empty.mean_power().is_err());
    }

    #[test]
    fn test_bad_value_on_timed_sample_poisons_series() {
        let series = PowerSeries::from_json_str(r#"[[0, 10], [5, "abc"], [10, 10]]"#).unwrap();
        assert!(matches!(
            series.total_energy(),
            Err(Error::MalformedSeries(_))
        ));
    }

    #[test]
    fn test_non_finite_value_poisons_series() {
        for json in [
            r#"[[0, "NaN"], [10, 10]]"#,
            r#"[[0, 10], [10, "inf"]]"#,
            r#"[{"timestamp": 0, "value": "-infinity"}, {"timestamp": 10, "value": 10}]"#,
        ] {
            let series = PowerSeries::from_json_str(json).unwrap();
            assert!(
                matches!(series.total_energy(), Err(Error::MalformedSeries(_))),
                "{json}"
            );
            assert!(series.mean_power().is_err(), "{json}");
        }
    }

    #[test]
    fn test_bad_value_on_untimed_sample_ignored_for_energy() {
        let series = PowerSeries::from_json_str(r#"[[0, 10], ["bad", null], [10, 10]]"#).unwrap();
        assert!((series.total_energy().unwrap() - 100.0).abs() < 1e-9);
        assert!(series.mean_power().is_err());
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            PowerSeries::from_json_str("[[0]]"),
            Err(Error::MalformedSeries(_))
        ));
        assert!(matches!(
            PowerSeries::from_json_str("{\"a\": 1}"),
            Err(Error::Json(_))
        ));
        assert!(PowerSeries::from_json_str("[1, 2, 3]").is_err());
        assert!(PowerSeries::from_json_str("not json").is_err());
    }

    #[test]
    fn test_mean_power_uses_untimed_samples() {
        let series =
            PowerSeries::from_json_str(r#"[[0, 100], ["bad", 200], {"value": 300}]"#).unwrap();
        assert!((series.mean_power().unwrap() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_trapezoid_linear_ramp() {
        let points = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
        assert!((trapezoid(&points) - 2.0).abs() < 1e-12);
        assert!(trapezoid(&points[..1]).abs() < f64::EPSILON);
    }
}
