#![deny(missing_docs)]
//! Boolean satisfiability two ways: exhaustive classical evaluation, and
//! amplitude-amplification search over a reversible oracle compiled from the
//! formula's CNF.
//!
//! ```
//! use sat_oracle::config::{Sampling, SearchConfig, SimulatorConfig};
//! use sat_oracle::pipeline::solve;
//! use sat_oracle::quantum::simulator::StatevectorSimulator;
//! use sat_oracle::search::outcome::Strategy;
//!
//! let backend = StatevectorSimulator::new(SimulatorConfig {
//!     sampling: Sampling::Expected,
//!     ..SimulatorConfig::default()
//! });
//! let report = solve("A & B", Strategy::Known, &SearchConfig::default(), backend).unwrap();
//! assert_eq!(report.top_measurement.as_deref(), Some("11"));
//! ```

/// Search configuration and its validation.
pub mod config;

/// Error types for every stage.
pub mod error;

/// Expression text to report in one call.
pub mod pipeline;

/// Gates, oracle synthesis, amplification circuits and execution backends.
pub mod quantum;

/// Boolean expressions, their CNF, and classical evaluation.
pub mod sat;

/// Iteration counts and the search loops.
pub mod search;
