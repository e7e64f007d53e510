//! # energy-report: Energy and Accuracy Reports for Compressed Reasoning Runs
//!
//! **Version**: 0.1.0
//!
//! Reads the artifacts of a compression-ratio sweep (run logs with accuracy
//! and chain-of-thought length, wattmeter and BMC power series), averages
//! them across repeated trials, and renders comparison charts as PNG files.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Jidoka**: A missing or malformed artifact removes one data point, never the run
//! - **Genchi Genbutsu**: Energy is integrated from the raw samples, not estimated
//! - **Poka-Yoke**: Strongly typed models, ratios and sensors; no stringly paths
//! - **Kaizen**: Every aggregation rule is tested without rendering
//!
//! ## Pipeline
//!
//! ```text
//! ExperimentLayout ──► MeasurementStore::collect ──► *Report::build ──► chart::*::render
//!   (directory tree)     (run_log, power, metric)     (aggregate)         (plotters PNG)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use energy_report::chart::savings;
//! use energy_report::experiment::MeasurementStore;
//! use energy_report::layout::ExperimentLayout;
//! use energy_report::report::SavingsReport;
//!
//! let layout = ExperimentLayout::default();
//! let store = MeasurementStore::collect(&layout, &[SavingsReport::METRIC]);
//! let report = SavingsReport::build(&store, &layout);
//! if !report.is_empty() {
//!     savings::render(&report, savings::OUTPUT_FILE)?;
//! }
//! # Ok::<(), energy_report::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod experiment;
pub mod layout;
pub mod logging;
pub mod metric;
pub mod power;
pub mod report;
pub mod run_log;

pub use error::{Error, Result};
