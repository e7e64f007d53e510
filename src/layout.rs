//! Experiment directory layout
//!
//! All runs live under a fixed tree:
//!
//! ```text
//! <root>/<trial_dir>/<model_size>/<benchmark>/cr_<ratio>/
//!     run_log.txt
//!     metrics_watt.json
//!     metrics_bmc.json
//! ```
//!
//! The set of trials, models and ratios is enumerated up front, never
//! discovered by walking the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Run log file name inside a run directory
pub const RUN_LOG_FILE: &str = "run_log.txt";

/// Layout document the binaries pick up from the working directory
pub const LAYOUT_FILE: &str = "energy_layout.json";

/// Model size under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelSize {
    /// 3B parameters
    #[serde(rename = "3B")]
    B3,
    /// 7B parameters
    #[serde(rename = "7B")]
    B7,
    /// 14B parameters
    #[serde(rename = "14B")]
    B14,
}

impl ModelSize {
    /// All model sizes in plotting order.
    pub const ALL: [Self; 3] = [Self::B3, Self::B7, Self::B14];

    /// Directory name / display label (e.g. `"7B"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::B3 => "3B",
            Self::B7 => "7B",
            Self::B14 => "14B",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "3B" => Ok(Self::B3),
            "7B" => Ok(Self::B7),
            "14B" => Ok(Self::B14),
            other => Err(Error::InvalidLayout(format!("unknown model size '{other}'"))),
        }
    }
}

/// Compression ratio applied to the token-generation budget.
///
/// Keeps the label exactly as it appears in directory names (`cr_0.9`) next
/// to its numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ratio {
    label: String,
    value: f64,
}

impl Ratio {
    /// Label as used in directory names.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Numeric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// True for the ratio = 1.0 reference run.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        (self.value - 1.0).abs() < f64::EPSILON
    }

    /// Run directory name, `cr_<label>`.
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("cr_{}", self.label)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for Ratio {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .parse()
            .map_err(|_| Error::InvalidLayout(format!("ratio '{s}' is not a number")))?;
        if !(value > 0.0 && value <= 1.0) {
            return Err(Error::InvalidLayout(format!(
                "ratio '{s}' must be in (0, 1]"
            )));
        }
        Ok(Self {
            label: s.to_string(),
            value,
        })
    }
}

impl TryFrom<String> for Ratio {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Ratio> for String {
    fn from(ratio: Ratio) -> Self {
        ratio.label
    }
}

/// Power sensor that produced a sample series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sensor {
    /// Wall wattmeter
    Wattmeter,
    /// Board management controller
    Bmc,
}

impl Sensor {
    /// Series file name inside a run directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Wattmeter => "metrics_watt.json",
            Self::Bmc => "metrics_bmc.json",
        }
    }
}

/// Files of one (trial, model, ratio) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    dir: PathBuf,
}

impl RunPaths {
    /// Wrap an existing run directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Run directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `run_log.txt`
    #[must_use]
    pub fn run_log(&self) -> PathBuf {
        self.dir.join(RUN_LOG_FILE)
    }

    /// Power series file for `sensor`.
    #[must_use]
    pub fn power_series(&self, sensor: Sensor) -> PathBuf {
        self.dir.join(sensor.file_name())
    }
}

/// Fixed enumeration of every run the charts look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentLayout {
    /// Directory the trial directories are resolved against
    pub root: PathBuf,
    /// Repeated-trial directories, averaged together
    pub trial_dirs: Vec<String>,
    /// Benchmark directory name
    pub benchmark: String,
    /// Model sizes, in plotting order
    pub models: Vec<ModelSize>,
    /// Ratios, baseline first
    pub ratios: Vec<Ratio>,
}

impl Default for ExperimentLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            trial_dirs: vec!["1st".into(), "2nd".into(), "3rd".into()],
            benchmark: "gsm8k".into(),
            models: ModelSize::ALL.to_vec(),
            ratios: ["1.0", "0.9", "0.8", "0.7", "0.6", "0.5"]
                .iter()
                .filter_map(|r| r.parse().ok())
                .collect(),
        }
    }
}

impl ExperimentLayout {
    /// Resolve trial directories against `root` instead of the working dir.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Parse a layout document.
    ///
    /// Missing fields fall back to the default layout.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed, names an unknown model or
    /// ratio, leaves any of the enumerations empty or has no baseline ratio.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load a layout document from disk.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid layout.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Load `path` when it exists, otherwise use the default layout.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but is not a valid layout.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let layout = Self::load_json(path)?;
            info!(path = %path.display(), trials = layout.trial_count(), "layout loaded");
            Ok(layout)
        } else {
            debug!(path = %path.display(), "no layout file, using default tree");
            Ok(Self::default())
        }
    }

    /// The uncompressed reference ratio, matched by value so `"1"` and
    /// `"1.0"` both qualify.
    #[must_use]
    pub fn baseline(&self) -> Option<&Ratio> {
        self.ratios.iter().find(|r| r.is_baseline())
    }

    /// Check that every enumeration has at least one entry and that the
    /// ratios include the baseline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] naming what is missing.
    pub fn validate(&self) -> Result<()> {
        if self.trial_dirs.is_empty() {
            return Err(Error::InvalidLayout("no trial directories".into()));
        }
        if self.models.is_empty() {
            return Err(Error::InvalidLayout("no model sizes".into()));
        }
        if self.ratios.is_empty() {
            return Err(Error::InvalidLayout("no ratios".into()));
        }
        if self.baseline().is_none() {
            return Err(Error::InvalidLayout("no baseline ratio (1.0)".into()));
        }
        Ok(())
    }

    /// Number of trials averaged per point.
    #[must_use]
    pub fn trial_count(&self) -> usize {
        self.trial_dirs.len()
    }

    /// Files of one run.
    #[must_use]
    pub fn run_paths(&self, trial: &str, model: ModelSize, ratio: &Ratio) -> RunPaths {
        RunPaths::new(
            self.root
                .join(trial)
                .join(model.label())
                .join(&self.benchmark)
                .join(ratio.dir_name()),
        )
    }
}
