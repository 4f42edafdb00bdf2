//! One call from expression text to a complete report.
//!
//! [`solve`] parses the expression, enumerates its classical solutions, compiles
//! the oracle and runs the requested search against a backend. The report is
//! `Serialize` so the binary can print it as JSON.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::quantum::backend::ExecutionBackend;
use crate::quantum::layout::QubitLayout;
use crate::sat::evaluator::ClassicalEvaluator;
use crate::sat::formula::Formula;
use crate::search::controller::SearchController;
use crate::search::outcome::{SearchOutcome, Strategy};
use crate::search::sampler::{IterationSampler, RandomSampler};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Everything one solve produced. Bitstrings follow the variable order.
pub struct SolveReport {
    /// The expression as given.
    pub expression: String,
    /// Variable names, sorted.
    pub variables: Vec<String>,
    /// How the iteration count was chosen.
    pub strategy: Strategy,
    /// Satisfying assignments found by enumeration.
    pub classical_solutions: Vec<String>,
    /// `M`, the number of classical solutions.
    pub num_solutions: usize,
    /// Most frequent outcome of the last backend run.
    pub top_measurement: Option<String>,
    /// The verified assignment as a bitstring.
    pub assignment: Option<String>,
    /// Counts of the last backend run.
    pub histogram: BTreeMap<String, usize>,
    /// Rounds in the last circuit run.
    pub iterations_used: usize,
    /// Backend runs made.
    pub attempts: usize,
    /// Whether a candidate verified.
    pub found: bool,
    /// Width of the oracle circuit.
    pub oracle_qubits: usize,
}

impl SolveReport {
    fn new(
        formula: &Formula,
        strategy: Strategy,
        classical_solutions: Vec<String>,
        outcome: SearchOutcome,
    ) -> Self {
        Self {
            expression: formula.text().to_string(),
            variables: formula.variables().iter().map(str::to_string).collect(),
            strategy,
            num_solutions: classical_solutions.len(),
            classical_solutions,
            top_measurement: outcome.top_measurement,
            assignment: outcome.assignment.map(|a| a.to_bitstring()),
            histogram: outcome.counts.sorted(),
            iterations_used: outcome.iterations_used,
            attempts: outcome.attempts,
            found: outcome.found,
            oracle_qubits: QubitLayout::for_formula(formula.cnf()).num_qubits(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Serialization failures from `serde_json`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Solves `text` with a randomly seeded (or `config.seed`ed) sampler.
///
/// # Errors
///
/// Parse, enumeration, oracle and backend errors. A search that finds nothing is
/// a report with `found == false`.
pub fn solve<B: ExecutionBackend>(
    text: &str,
    strategy: Strategy,
    config: &SearchConfig,
    backend: B,
) -> Result<SolveReport> {
    let formula = Formula::parse(text)?;
    solve_formula(
        &formula,
        strategy,
        config,
        backend,
        RandomSampler::new(config.seed),
    )
}

/// Solves an already parsed formula with the given sampler.
///
/// # Errors
///
/// As [`solve`].
pub fn solve_formula<B: ExecutionBackend, S: IterationSampler>(
    formula: &Formula,
    strategy: Strategy,
    config: &SearchConfig,
    backend: B,
    sampler: S,
) -> Result<SolveReport> {
    let classical = ClassicalEvaluator::default().solve(formula)?;
    let mut controller = SearchController::new(backend, sampler, *config);
    let outcome = match strategy {
        Strategy::Known => controller.run_known(formula, classical.len())?,
        Strategy::Adaptive => controller.run_adaptive(formula)?,
    };
    info!(
        expression = formula.text(),
        %strategy,
        solutions = classical.len(),
        found = outcome.found,
        "solved"
    );
    Ok(SolveReport::new(formula, strategy, classical, outcome))
}
