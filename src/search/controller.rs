//! Drives the amplification circuit against a backend until a candidate verifies.
//!
//! Known count: one run with [`optimal_iterations`], whose top measurement is
//! checked against the formula.
//!
//! Adaptive: a bounded loop over a [`GrowthSchedule`]. Each attempt draws
//! `k` from `0..floor(m)`, runs the circuit with `k` rounds and checks the top
//! measurement. A miss grows `m`; the loop ends on the first verified candidate,
//! when `m` passes its limit, or at `max_attempts`. The first attempt always runs.
//!
//! Candidates are checked against the formula as written, not its CNF.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::quantum::amplification::AmplificationEngine;
use crate::quantum::backend::{ExecutionBackend, validate_histogram};
use crate::quantum::gate::{GateSequence, Qubit};
use crate::quantum::histogram::Histogram;
use crate::quantum::oracle::OracleCompiler;
use crate::sat::assignment::Assignment;
use crate::sat::formula::Formula;
use crate::search::iterations::{optimal_iterations, success_probability};
use crate::search::outcome::SearchOutcome;
use crate::search::sampler::IterationSampler;
use crate::search::schedule::GrowthSchedule;
use tracing::{debug, info};

/// One backend run and its verdict.
#[derive(Debug, Clone)]
struct Trial {
    counts: Histogram,
    top: Option<String>,
    verified: Option<Assignment>,
}

/// Runs known-count and adaptive searches against one backend.
#[derive(Debug)]
pub struct SearchController<B, S> {
    backend: B,
    sampler: S,
    config: SearchConfig,
}

impl<B: ExecutionBackend, S: IterationSampler> SearchController<B, S> {
    /// A controller over `backend` and `sampler`. `config` is validated here.
    pub fn new(backend: B, sampler: S, config: SearchConfig) -> Self {
        Self {
            backend,
            sampler,
            config: config.validated(),
        }
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn trial(
        &mut self,
        oracle: &GateSequence,
        objective: &[Qubit],
        formula: &Formula,
        iterations: usize,
    ) -> Result<Trial> {
        let circuit = AmplificationEngine::construct(oracle, objective, iterations);
        let counts = self.backend.run(&circuit, self.config.shots)?;
        validate_histogram(&circuit, &counts)?;

        let top = counts.most_frequent().map(str::to_string);
        let verified = top
            .as_deref()
            .and_then(Assignment::from_bitstring)
            .filter(|a| formula.is_satisfied_by(a));
        Ok(Trial {
            counts,
            top,
            verified,
        })
    }

    /// Searches with the iteration count that is optimal for `solutions` marked
    /// states. `solutions == 0` runs zero rounds, which is plain uniform sampling.
    ///
    /// # Errors
    ///
    /// Oracle compilation and backend failures, and
    /// [`EvaluationError::SearchSpaceOverflow`](crate::error::EvaluationError::SearchSpaceOverflow)
    /// for formulas too wide to count assignments of.
    pub fn run_known(&mut self, formula: &Formula, solutions: usize) -> Result<SearchOutcome> {
        let (oracle, objective) = OracleCompiler::compile(formula.cnf())?.into_parts();
        let space = formula.search_space()?;
        let iterations = optimal_iterations(solutions, space);

        let trial = self.trial(&oracle, &objective, formula, iterations)?;
        let found = trial.verified.is_some();
        info!(
            solutions,
            space,
            iterations,
            predicted = success_probability(iterations, solutions, space),
            found,
            top = trial.top.as_deref().unwrap_or("-"),
            "known-count search finished"
        );

        Ok(SearchOutcome {
            assignment: trial.verified,
            top_measurement: trial.top,
            iterations_used: iterations,
            attempts: 1,
            found,
            counts: trial.counts,
        })
    }

    /// Searches without knowing how many solutions exist.
    ///
    /// # Errors
    ///
    /// As [`SearchController::run_known`]. A backend error ends the search
    /// immediately.
    pub fn run_adaptive(&mut self, formula: &Formula) -> Result<SearchOutcome> {
        let (oracle, objective) = OracleCompiler::compile(formula.cnf())?.into_parts();
        let space = formula.search_space()?;
        let mut schedule =
            GrowthSchedule::for_space(space, self.config.growth_factor, self.config.bound_factor);
        let mut outcome = SearchOutcome::empty(self.config.shots);
        debug!(
            space,
            limit = schedule.limit(),
            scheduled = schedule.max_attempts(),
            "adaptive search started"
        );

        loop {
            if self
                .config
                .max_attempts
                .is_some_and(|max| outcome.attempts >= max)
            {
                debug!(attempts = outcome.attempts, "attempt ceiling reached");
                break;
            }

            let upper = schedule.draw_upper();
            let iterations = self.sampler.draw(upper);
            let trial = self.trial(&oracle, &objective, formula, iterations)?;
            outcome.attempts += 1;
            outcome.iterations_used = iterations;
            outcome.counts = trial.counts;
            outcome.top_measurement = trial.top;

            if let Some(assignment) = trial.verified {
                outcome.assignment = Some(assignment);
                outcome.found = true;
                break;
            }
            debug!(
                attempt = outcome.attempts,
                bound = schedule.bound(),
                iterations,
                top = outcome.top_measurement.as_deref().unwrap_or("-"),
                "candidate did not verify"
            );

            schedule.grow();
            if schedule.exhausted() {
                debug!(
                    bound = schedule.bound(),
                    limit = schedule.limit(),
                    "search bound exhausted"
                );
                break;
            }
        }

        info!(
            space,
            attempts = outcome.attempts,
            iterations = outcome.iterations_used,
            found = outcome.found,
            "adaptive search finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BackendError, Error, EvaluationError};
    use crate::quantum::backend::BackendKind;
    use crate::quantum::circuit::Circuit;
    use crate::quantum::simulator::{Sampling, SimulatorConfig, StatevectorSimulator};
    use crate::search::sampler::{RandomSampler, ScriptedSampler};

    fn expected() -> StatevectorSimulator {
        StatevectorSimulator::new(SimulatorConfig {
            sampling: Sampling::Expected,
            ..SimulatorConfig::default()
        })
    }

    fn formula(text: &str) -> Formula {
        Formula::parse(text).unwrap()
    }

    #[test]
    fn test_known_single_solution() {
        let mut c = SearchController::new(expected(), ScriptedSampler::default(), SearchConfig::default());
        let outcome = c.run_known(&formula("A & B"), 1).unwrap();
        assert!(outcome.found);
        assert_eq!(outcome.iterations_used, 1);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.top_measurement.as_deref(), Some("11"));
        assert_eq!(outcome.counts.get("11"), 1024);
    }

    #[test]
    fn test_known_zero_solutions_samples_uniformly() {
        let mut c = SearchController::new(expected(), ScriptedSampler::default(), SearchConfig::default());
        let outcome = c.run_known(&formula("A & ~A"), 0).unwrap();
        assert!(!outcome.found);
        assert_eq!(outcome.iterations_used, 0);
        assert_eq!(outcome.assignment, None);
        assert_eq!(outcome.counts.get("0"), 512);
        assert_eq!(outcome.counts.get("1"), 512);
    }

    #[test]
    fn test_adaptive_unsatisfiable_exhausts_bound() {
        // N = 2, limit 2*sqrt(2): m = 1, 1.2, 1.44, 1.73, 2.07, 2.49, then 2.99 stops
        let mut c = SearchController::new(expected(), RandomSampler::new(Some(1)), SearchConfig::default());
        let outcome = c.run_adaptive(&formula("A & ~A")).unwrap();
        assert!(!outcome.found);
        assert_eq!(outcome.attempts, 6);
        assert_eq!(outcome.assignment, None);
    }

    #[test]
    fn test_adaptive_scripted_attempt_count() {
        // a uniform tie reads as "00", so only the one-round draw on attempt 5 succeeds
        let sampler = ScriptedSampler::new([0, 0, 0, 0, 1]);
        let mut c = SearchController::new(expected(), sampler, SearchConfig::default());
        let outcome = c.run_adaptive(&formula("A & B")).unwrap();
        assert!(outcome.found);
        assert_eq!(outcome.attempts, 5);
        assert_eq!(outcome.iterations_used, 1);
        assert_eq!(outcome.assignment.map(|a| a.to_bitstring()), Some("11".to_string()));
    }

    #[test]
    fn test_adaptive_respects_max_attempts() {
        let config = SearchConfig::default().with_max_attempts(Some(2));
        let mut c = SearchController::new(expected(), ScriptedSampler::default(), config);
        let outcome = c.run_adaptive(&formula("A & B")).unwrap();
        assert!(!outcome.found);
        assert_eq!(outcome.attempts, 2);
    }

    #[test]
    fn test_tautology_found_on_first_attempt() {
        let mut c = SearchController::new(expected(), ScriptedSampler::default(), SearchConfig::default());
        let outcome = c.run_adaptive(&formula("A | ~A")).unwrap();
        assert!(outcome.found);
        assert_eq!(outcome.attempts, 1);
    }

    fn wide_formula(vars: u8) -> Formula {
        let names = (0..vars)
            .map(|i| format!("{}{}", char::from(b'a' + i / 26), char::from(b'a' + i % 26)))
            .collect::<Vec<_>>();
        formula(&names.join(" & "))
    }

    #[test]
    fn test_oversized_search_space_is_an_error() {
        let wide = wide_formula(64);
        let mut c = SearchController::new(expected(), ScriptedSampler::default(), SearchConfig::default());
        for err in [c.run_adaptive(&wide).unwrap_err(), c.run_known(&wide, 1).unwrap_err()] {
            assert!(matches!(
                err,
                Error::Evaluation(EvaluationError::SearchSpaceOverflow { vars: 64 })
            ));
        }
    }

    #[test]
    fn test_wide_formula_hits_the_qubit_limit() {
        // 2^40 fits, but 40 variables plus 40 ancillas exceed the simulator
        let mut c = SearchController::new(expected(), ScriptedSampler::default(), SearchConfig::default());
        let err = c.run_adaptive(&wide_formula(40)).unwrap_err();
        assert!(matches!(err, Error::Backend(BackendError::TooManyQubits { .. })));
    }

    struct Offline;

    impl ExecutionBackend for Offline {
        fn kind(&self) -> BackendKind {
            BackendKind::Hardware
        }

        fn run(&mut self, _: &Circuit, _: usize) -> std::result::Result<Histogram, BackendError> {
            Err(BackendError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_backend_errors_are_not_retried() {
        let mut c = SearchController::new(Offline, ScriptedSampler::default(), SearchConfig::default());
        let err = c.run_adaptive(&formula("A & B")).unwrap_err();
        assert!(matches!(err, Error::Backend(BackendError::Unavailable(_))));
    }

    struct Garbage;

    impl ExecutionBackend for Garbage {
        fn kind(&self) -> BackendKind {
            BackendKind::Simulate
        }

        fn run(&mut self, _: &Circuit, shots: usize) -> std::result::Result<Histogram, BackendError> {
            let mut h = Histogram::new(shots);
            h.record("111", shots);
            Ok(h)
        }
    }

    #[test]
    fn test_malformed_histogram_is_rejected() {
        let mut c = SearchController::new(Garbage, ScriptedSampler::default(), SearchConfig::default());
        let err = c.run_known(&formula("A & B"), 1).unwrap_err();
        assert!(matches!(err, Error::Backend(BackendError::MalformedOutput(_))));
    }
}
