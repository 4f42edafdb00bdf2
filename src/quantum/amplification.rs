//! Builds amplitude-amplification circuits around an oracle.
//!
//! ```text
//! H^n ; ( oracle ; diffuser )^k ; measure
//! ```
//!
//! The diffuser is the reflection about the uniform superposition, written as a
//! [`Conjugation`]: `H^n X^n` around a phase flip of `|1..1>`, which together
//! reflect about `|0..0>` in the Hadamard basis. It matches the textbook operator
//! up to a global phase.

use crate::quantum::circuit::Circuit;
use crate::quantum::gate::{Gate, GateSequence, Qubit};
use crate::quantum::reversible::Conjugation;
use tracing::trace;

/// Builds search circuits around a compiled oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmplificationEngine;

impl AmplificationEngine {
    /// Uniform superposition over `objective`.
    #[must_use]
    pub fn superposition(num_qubits: usize, objective: &[Qubit]) -> GateSequence {
        let mut seq = GateSequence::new(num_qubits);
        seq.h_all(objective.iter().copied());
        seq
    }

    /// Inversion about the mean over `objective`.
    #[must_use]
    pub fn diffuser(num_qubits: usize, objective: &[Qubit]) -> GateSequence {
        let mut basis = Self::superposition(num_qubits, objective);
        basis.x_all(objective.iter().copied());

        let mut reflect = GateSequence::new(num_qubits);
        reflect.push(Gate::phase_flip(objective.iter().copied()));

        Conjugation::new(basis, reflect).assemble()
    }

    /// The full search circuit for `iterations` rounds.
    ///
    /// `iterations == 0` is plain uniform sampling. Objective qubit `j` is measured
    /// into classical bit `j`.
    #[must_use]
    pub fn construct(oracle: &GateSequence, objective: &[Qubit], iterations: usize) -> Circuit {
        let num_qubits = oracle.num_qubits();
        let diffuser = Self::diffuser(num_qubits, objective);

        let mut gates = Self::superposition(num_qubits, objective);
        for _ in 0..iterations {
            gates.append(oracle);
            gates.append(&diffuser);
        }
        trace!(iterations, gates = gates.len(), "constructed search circuit");

        Circuit::measure_all(gates, objective.iter().copied())
    }
}
