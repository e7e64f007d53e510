//! Experiment runs and their measurements
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentLayout ──< RunId (model × ratio × trial)
//!                          │
//!                          └──< Measurement (metric, value)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use energy_report::experiment::MeasurementStore;
//! use energy_report::layout::{ExperimentLayout, ModelSize, Sensor};
//! use energy_report::metric::Metric;
//!
//! let layout = ExperimentLayout::default();
//! let energy = Metric::EnergyKilojoules(Sensor::Wattmeter);
//! let store = MeasurementStore::collect(&layout, &[energy]);
//!
//! let baseline = &layout.ratios[0];
//! if let Some(kj) = store.mean(ModelSize::B7, baseline, energy) {
//!     println!("7B baseline: {kj:.1} kJ");
//! }
//! ```

mod measurement;
mod run_id;
mod store;

pub use measurement::Measurement;
pub use run_id::RunId;
pub use store::MeasurementStore;
