//! Run log field extraction
//!
//! Evaluation runs print their summary as labeled fields somewhere in an
//! otherwise free-form log:
//!
//! ```text
//! output acc = 0.755
//! output avg_cot_length = 225.89841
//! ```
//!
//! Only the first occurrence of each field counts.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Result};

fn accuracy_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"output acc = ([\d.]+)").expect("static pattern compiles")
    })
}

fn cot_length_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"output avg_cot_length = ([\d.]+)").expect("static pattern compiles")
    })
}

/// How accuracy values are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccuracyScale {
    /// Value exactly as logged
    Raw,
    /// Fractions (`<= 1.0`) scaled to percent
    #[default]
    Percent,
}

/// Scale a logged accuracy to percent.
///
/// Values `<= 1.0` are fractions; anything larger is already a percentage.
#[must_use]
pub fn normalize_accuracy(value: f64) -> f64 {
    if value <= 1.0 {
        value * 100.0
    } else {
        value
    }
}

/// Scalar fields extracted from one run log.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunLogMetrics {
    accuracy: Option<f64>,
    avg_cot_length: Option<f64>,
}

impl RunLogMetrics {
    /// Accuracy exactly as logged.
    #[must_use]
    pub const fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Accuracy normalized to percent.
    #[must_use]
    pub fn accuracy_percent(&self) -> Option<f64> {
        self.accuracy.map(normalize_accuracy)
    }

    /// Accuracy in the requested scale.
    #[must_use]
    pub fn accuracy_scaled(&self, scale: AccuracyScale) -> Option<f64> {
        match scale {
            AccuracyScale::Raw => self.accuracy(),
            AccuracyScale::Percent => self.accuracy_percent(),
        }
    }

    /// Average reasoning (chain-of-thought) tokens per example.
    #[must_use]
    pub const fn avg_cot_length(&self) -> Option<f64> {
        self.avg_cot_length
    }

    /// Accuracy, or [`Error::FieldNotFound`].
    ///
    /// # Errors
    ///
    /// Returns error if the log has no parseable accuracy field.
    pub fn require_accuracy(&self, scale: AccuracyScale) -> Result<f64> {
        self.accuracy_scaled(scale)
            .ok_or(Error::FieldNotFound("output acc"))
    }

    /// Average CoT length, or [`Error::FieldNotFound`].
    ///
    /// # Errors
    ///
    /// Returns error if the log has no parseable CoT length field.
    pub fn require_avg_cot_length(&self) -> Result<f64> {
        self.avg_cot_length
            .ok_or(Error::FieldNotFound("output avg_cot_length"))
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract the labeled fields from log text.
///
/// A field whose first match does not parse as a number (e.g. `1.2.3`) is
/// reported as absent.
#[must_use]
pub fn parse_run_log(text: &str) -> RunLogMetrics {
    RunLogMetrics {
        accuracy: first_capture(accuracy_pattern(), text),
        avg_cot_length: first_capture(cot_length_pattern(), text),
    }
}

/// Read and parse a run log.
///
/// # Errors
///
/// Returns error if the file cannot be read.
pub fn read_run_log<P: AsRef<Path>>(path: P) -> Result<RunLogMetrics> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Ok(parse_run_log(&text))
}
