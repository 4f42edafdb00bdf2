//! Measured circuits: what a backend runs.

use crate::quantum::gate::{GateSequence, Qubit};
use std::fmt;

/// Reads `qubit` into classical bit `clbit` at the end of the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Measurement {
    /// The measured qubit.
    pub qubit: Qubit,
    /// The classical bit it lands in.
    pub clbit: usize,
}

/// A gate sequence plus the measurements taken after it.
///
/// Histogram bitstrings produced from a circuit put classical bit `j` at
/// character `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    gates: GateSequence,
    measurements: Vec<Measurement>,
}

impl Circuit {
    /// A circuit from gates and explicit measurements.
    #[must_use]
    pub const fn new(gates: GateSequence, measurements: Vec<Measurement>) -> Self {
        Self {
            gates,
            measurements,
        }
    }

    /// Measures each qubit of `qubits` into the classical bit of the same position.
    pub fn measure_all<I: IntoIterator<Item = Qubit>>(gates: GateSequence, qubits: I) -> Self {
        let measurements = qubits
            .into_iter()
            .enumerate()
            .map(|(clbit, qubit)| Measurement { qubit, clbit })
            .collect();
        Self::new(gates, measurements)
    }

    /// The gates, in application order.
    #[must_use]
    pub const fn gates(&self) -> &GateSequence {
        &self.gates
    }

    /// The measurements, in the order given.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Width of the gate sequence.
    #[must_use]
    pub const fn num_qubits(&self) -> usize {
        self.gates.num_qubits()
    }

    /// One more than the highest classical bit written, or 0.
    #[must_use]
    pub fn num_clbits(&self) -> usize {
        self.measurements
            .iter()
            .map(|m| m.clbit + 1)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "qreg q[{}];", self.num_qubits())?;
        writeln!(f, "creg c[{}];", self.num_clbits())?;
        write!(f, "{}", self.gates)?;
        for m in &self.measurements {
            writeln!(f, "measure q[{}] -> c[{}];", m.qubit, m.clbit)?;
        }
        Ok(())
    }
}
