//! Classical emulation of reversible gate sequences.
//!
//! An oracle never puts a basis state into superposition, so its effect on one
//! computational basis state is a permutation plus a sign. [`ClassicalEmulator`]
//! tracks exactly that, which makes it possible to check an oracle against the
//! formula it came from one assignment at a time, without a statevector.

use crate::error::{EmulationError, EvaluationError, Result};
use crate::quantum::gate::{Gate, GateSequence};
use crate::quantum::oracle::Oracle;
use crate::sat::assignment::Assignment;
use crate::sat::evaluator::DEFAULT_MAX_VARIABLES;
use crate::sat::formula::Formula;
use bit_vec::BitVec;
use tracing::debug;

/// A basis state together with the sign of its amplitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    /// One bit per qubit.
    pub bits: BitVec,
    /// Whether the amplitude picked up a `-1`.
    pub negated: bool,
}

impl Register {
    /// `|0...0>` with a positive sign.
    #[must_use]
    pub fn zero(num_qubits: usize) -> Self {
        Self {
            bits: BitVec::from_elem(num_qubits, false),
            negated: false,
        }
    }

    fn all_set(&self, qubits: &[usize]) -> bool {
        qubits.iter().all(|&q| self.bits.get(q).unwrap_or(false))
    }

    fn toggle(&mut self, qubit: usize) {
        let value = self.bits.get(qubit).unwrap_or(false);
        self.bits.set(qubit, !value);
    }
}

/// Runs oracles one basis state at a time. Whole-oracle checks enumerate every
/// assignment, so they share the evaluator's variable ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicalEmulator {
    max_variables: usize,
}

impl Default for ClassicalEmulator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VARIABLES)
    }
}

impl ClassicalEmulator {
    /// An emulator that checks oracles of at most `max_variables` variables.
    #[must_use]
    pub const fn new(max_variables: usize) -> Self {
        Self { max_variables }
    }

    /// Applies `gates` to `register` in place.
    ///
    /// # Errors
    ///
    /// [`EmulationError::WidthMismatch`] if the register is not as wide as the
    /// sequence, [`EmulationError::NonClassicalGate`] on the first `H`.
    pub fn run(
        gates: &GateSequence,
        register: &mut Register,
    ) -> std::result::Result<(), EmulationError> {
        if register.bits.len() != gates.num_qubits() {
            return Err(EmulationError::WidthMismatch {
                expected: gates.num_qubits(),
                actual: register.bits.len(),
            });
        }
        for (index, gate) in gates.iter().enumerate() {
            match gate {
                Gate::X(q) => register.toggle(*q),
                Gate::Z(q) => register.negated ^= register.all_set(&[*q]),
                Gate::Mcx { controls, target } => {
                    if register.all_set(controls) {
                        register.toggle(*target);
                    }
                }
                Gate::Mcz { qubits } => register.negated ^= register.all_set(qubits),
                Gate::H(_) => {
                    return Err(EmulationError::NonClassicalGate {
                        index,
                        gate: gate.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Runs every assignment of `formula` through `oracle`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::TooManyVariables`] past the variable ceiling, and any
    /// [`EmulationError`] from [`ClassicalEmulator::run`].
    pub fn check_oracle(&self, oracle: &Oracle, formula: &Formula) -> Result<OracleCheck> {
        let gates = oracle.gates();
        let layout = oracle.layout();
        let n = layout.num_vars();
        if n > self.max_variables {
            return Err(EvaluationError::TooManyVariables {
                vars: n,
                limit: self.max_variables,
            }
            .into());
        }
        let mut check = OracleCheck::default();

        for index in 0..1usize << n {
            let assignment = Assignment::from_index(index, n);
            let mut register = Register::zero(layout.num_qubits());
            for (var, qubit) in layout.objective_qubits().enumerate() {
                register.bits.set(qubit, assignment.value(var).unwrap_or(false));
            }
            let input = register.bits.clone();

            Self::run(&gates, &mut register)?;
            check.checked += 1;

            let bits = assignment.to_bitstring();
            if register.bits != input {
                check.dirty.push(bits.clone());
            }
            if register.negated {
                check.marked.push(bits.clone());
            }
            if register.negated != formula.is_satisfied_by(&assignment) {
                check.mismatched.push(bits);
            }
        }

        debug!(
            checked = check.checked,
            marked = check.marked.len(),
            mismatched = check.mismatched.len(),
            dirty = check.dirty.len(),
            "checked oracle"
        );
        Ok(check)
    }
}

/// Result of [`ClassicalEmulator::check_oracle`]. Bitstrings are in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OracleCheck {
    /// Assignments run through the oracle.
    pub checked: usize,
    /// Assignments the oracle flips the sign of.
    pub marked: Vec<String>,
    /// Assignments marked differently from how the formula evaluates.
    pub mismatched: Vec<String>,
    /// Assignments after which some qubit did not return to its input value.
    pub dirty: Vec<String>,
}

impl OracleCheck {
    /// True when the oracle marks exactly the solutions and cleans up after itself.
    #[must_use]
    pub fn is_sound(&self) -> bool {
        self.mismatched.is_empty() && self.dirty.is_empty()
    }
}
