//! Error types for energy-report
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)
//!
//! Every variant except [`Error::Io`]/[`Error::Render`] describes a data
//! point that is skipped rather than a failed invocation; the aggregation
//! layer turns them into absence.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// energy-report error types
#[derive(Error, Debug)]
pub enum Error {
    /// A labeled field was not present in a run log
    #[error("Field not found in run log: {0}")]
    FieldNotFound(&'static str),

    /// Power sample document could not be decoded
    #[error("Malformed power series: {0}")]
    MalformedSeries(String),

    /// Fewer than two timed samples remain after dropping bad timestamps
    #[error("Insufficient samples: {found} timed sample(s), need at least 2")]
    InsufficientSamples {
        /// Number of samples with a parseable timestamp
        found: usize,
    },

    /// Layout document is invalid
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Chart backend failure
    #[error("Render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Self::Render(err.to_string())
    }
}
