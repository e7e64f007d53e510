//! Run Identifier - one (model, ratio, trial) execution

use std::fmt;

use crate::layout::{ExperimentLayout, ModelSize, Ratio, RunPaths};

/// Run Identifier names a single execution of the benchmark.
///
/// Identifiers come from the layout's fixed enumeration; each trial of a
/// (model, ratio) configuration is a separate run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunId {
    model: ModelSize,
    ratio: Ratio,
    trial: String,
}

impl RunId {
    /// Create a run identifier.
    ///
    /// # Arguments
    ///
    /// * `model` - Model size under test
    /// * `ratio` - Compression ratio
    /// * `trial` - Trial directory name (e.g. `"2nd"`)
    #[must_use]
    pub fn new(model: ModelSize, ratio: Ratio, trial: impl Into<String>) -> Self {
        Self {
            model,
            ratio,
            trial: trial.into(),
        }
    }

    /// Every run of a layout, trial-major.
    #[must_use]
    pub fn enumerate(layout: &ExperimentLayout) -> Vec<Self> {
        let mut runs =
            Vec::with_capacity(layout.trial_count() * layout.models.len() * layout.ratios.len());
        for trial in &layout.trial_dirs {
            for &model in &layout.models {
                for ratio in &layout.ratios {
                    runs.push(Self::new(model, ratio.clone(), trial.clone()));
                }
            }
        }
        runs
    }

    /// Get the model size.
    #[must_use]
    pub const fn model(&self) -> ModelSize {
        self.model
    }

    /// Get the compression ratio.
    #[must_use]
    pub const fn ratio(&self) -> &Ratio {
        &self.ratio
    }

    /// Get the trial directory name.
    #[must_use]
    pub fn trial(&self) -> &str {
        &self.trial
    }

    /// True if this run belongs to the (model, ratio) configuration.
    #[must_use]
    pub fn is_config(&self, model: ModelSize, ratio: &Ratio) -> bool {
        self.model == model && self.ratio.label() == ratio.label()
    }

    /// Files of this run under `layout`.
    #[must_use]
    pub fn paths(&self, layout: &ExperimentLayout) -> RunPaths {
        layout.run_paths(&self.trial, self.model, &self.ratio)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.model, self.ratio.dir_name(), self.trial)
    }
}
