//! Chart datasets
//!
//! Each report is computed from a [`MeasurementStore`] and holds exactly
//! what one chart draws. Reports never touch the filesystem, so every
//! aggregation rule is testable without rendering.
//!
//! [`MeasurementStore`]: crate::experiment::MeasurementStore

mod accuracy_tokens;
mod consistency;
mod panels;
mod reduction;
mod savings;

pub use accuracy_tokens::AccuracyTokensReport;
pub use consistency::{ConsistencyPoint, ConsistencyReport};
pub use panels::{PanelReport, PanelSpec};
pub use reduction::{ModelReduction, ReductionReport, ReductionRow};
pub use savings::{ModelSavings, SavingsReport, SavingsRow};

use crate::layout::{ModelSize, Ratio};

/// Fraction of the data span added on each side of shared axes
pub const AXIS_PADDING: f64 = 0.1;

/// One aggregated (x, y) point of a model's series.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioPoint {
    /// Ratio the point was measured at
    pub ratio: Ratio,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl RatioPoint {
    /// True for the ratio = 1.0 point.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.ratio.is_baseline()
    }
}

/// A model's points in layout ratio order; absent ratios are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSeries {
    /// Model size
    pub model: ModelSize,
    /// Points, baseline included
    pub points: Vec<RatioPoint>,
}

impl ModelSeries {
    /// The ratio = 1.0 point, if it was measured.
    #[must_use]
    pub fn baseline(&self) -> Option<&RatioPoint> {
        self.points.iter().find(|p| p.is_baseline())
    }

    /// Every non-baseline point, in order.
    pub fn compressed(&self) -> impl Iterator<Item = &RatioPoint> {
        self.points.iter().filter(|p| !p.is_baseline())
    }

    /// True when no ratio produced a point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
