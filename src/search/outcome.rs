//! What a search reports back.

use crate::quantum::histogram::Histogram;
use crate::sat::assignment::Assignment;
use serde::Serialize;
use std::fmt;

/// How the iteration count of a search is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The number of solutions is known; one run with the closed-form count.
    Known,
    /// The number of solutions is unknown; randomized growing-bound search.
    Adaptive,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known => write!(f, "known"),
            Self::Adaptive => write!(f, "adaptive"),
        }
    }
}

/// The result of one search.
///
/// `found == false` is a valid answer, not a failure: either the top measurement
/// of the single known-count run did not verify, or the adaptive bound ran out.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The verified assignment, if any.
    pub assignment: Option<Assignment>,
    /// Most frequent bitstring of the last run.
    pub top_measurement: Option<String>,
    /// Iteration count of the last run, i.e. the winning one when `found`.
    pub iterations_used: usize,
    /// Backend runs made.
    pub attempts: usize,
    /// Whether `assignment` is set.
    pub found: bool,
    /// Histogram of the last run.
    pub counts: Histogram,
}

impl SearchOutcome {
    /// An outcome for a search that never ran the backend.
    #[must_use]
    pub fn empty(shots: usize) -> Self {
        Self {
            assignment: None,
            top_measurement: None,
            iterations_used: 0,
            attempts: 0,
            found: false,
            counts: Histogram::new(shots),
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.assignment {
            Some(a) => write!(f, "found {a}")?,
            None => write!(f, "not found")?,
        }
        write!(
            f,
            " after {} attempt(s), last run used {} iteration(s)",
            self.attempts, self.iterations_used
        )
    }
}
