//! Primitive gates and gate sequences.
//!
//! The gate set is exactly what the oracle and the diffuser need: `X`, `H`, `Z`, a
//! multi-controlled X, and a multi-controlled phase flip. All of them are
//! self-inverse, which is what lets [`GateSequence::inverse`] be a reversal.
//!
//! Both multi-qubit gates degenerate cleanly: [`Gate::mcx`] with no controls is
//! `X`, and [`Gate::phase_flip`] over one qubit is `Z` and over no qubits is an
//! unconditional sign flip.

use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// Index of a qubit within one [`QubitLayout`](crate::quantum::layout::QubitLayout).
pub type Qubit = usize;

/// Qubit lists of multi-qubit gates; most fit inline.
pub type Qubits = SmallVec<[Qubit; 4]>;

/// The gate set. Every gate is its own inverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Bit flip.
    X(Qubit),
    /// Hadamard.
    H(Qubit),
    /// Phase flip of `|1>`.
    Z(Qubit),
    /// Flips `target` when every control is 1.
    Mcx {
        /// Control qubits, never empty.
        controls: Qubits,
        /// The flipped qubit.
        target: Qubit,
    },
    /// Negates the amplitude of every basis state in which all `qubits` are 1.
    Mcz {
        /// The qubits that must all be 1; empty flips every state.
        qubits: Qubits,
    },
}

impl Gate {
    /// Multi-controlled X, reduced to `X` when there are no controls.
    pub fn mcx<I: IntoIterator<Item = Qubit>>(controls: I, target: Qubit) -> Self {
        let controls: Qubits = controls.into_iter().collect();
        if controls.is_empty() {
            Self::X(target)
        } else {
            Self::Mcx { controls, target }
        }
    }

    /// Multi-controlled phase flip, reduced to `Z` on a single qubit.
    pub fn phase_flip<I: IntoIterator<Item = Qubit>>(qubits: I) -> Self {
        let qubits: Qubits = qubits.into_iter().collect();
        match qubits.as_slice() {
            [q] => Self::Z(*q),
            _ => Self::Mcz { qubits },
        }
    }

    /// Every gate in the set is its own inverse.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.clone()
    }

    /// All qubits the gate touches.
    #[must_use]
    pub fn qubits(&self) -> Qubits {
        match self {
            Self::X(q) | Self::H(q) | Self::Z(q) => smallvec::smallvec![*q],
            Self::Mcx { controls, target } => {
                let mut qs = controls.clone();
                qs.push(*target);
                qs
            }
            Self::Mcz { qubits } => qubits.clone(),
        }
    }

    /// Lowercase mnemonic, as printed in circuit listings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::X(_) => "x",
            Self::H(_) => "h",
            Self::Z(_) => "z",
            Self::Mcx { .. } => "mcx",
            Self::Mcz { .. } => "mcz",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X(q) | Self::H(q) | Self::Z(q) => write!(f, "{} q[{q}]", self.name()),
            Self::Mcx { controls, target } => write!(
                f,
                "mcx {} -> q[{target}]",
                controls.iter().map(|c| format!("q[{c}]")).join(", ")
            ),
            Self::Mcz { qubits } if qubits.is_empty() => write!(f, "mcz (global)"),
            Self::Mcz { qubits } => write!(
                f,
                "mcz {}",
                qubits.iter().map(|q| format!("q[{q}]")).join(", ")
            ),
        }
    }
}

/// An ordered list of gates over a fixed number of qubits.
///
/// Sequences only grow. Combinators such as [`GateSequence::inverse`] build new
/// sequences instead of editing gates in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GateSequence {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl GateSequence {
    /// An empty sequence over `num_qubits` qubits.
    #[must_use]
    pub const fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    /// Width of the sequence.
    #[must_use]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of gates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True when no gate has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The gates, in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Gate> {
        self.gates.iter()
    }

    /// Appends one gate. Its qubits must be inside the sequence width.
    pub fn push(&mut self, gate: Gate) {
        debug_assert!(
            gate.qubits().iter().all(|&q| q < self.num_qubits),
            "{gate} outside a {}-qubit sequence",
            self.num_qubits
        );
        self.gates.push(gate);
    }

    /// Appends `X` on every qubit of `qubits`.
    pub fn x_all<I: IntoIterator<Item = Qubit>>(&mut self, qubits: I) {
        for q in qubits {
            self.push(Gate::X(q));
        }
    }

    /// Appends `H` on every qubit of `qubits`.
    pub fn h_all<I: IntoIterator<Item = Qubit>>(&mut self, qubits: I) {
        for q in qubits {
            self.push(Gate::H(q));
        }
    }

    /// Appends every gate of `other`.
    pub fn append(&mut self, other: &Self) {
        debug_assert!(other.num_qubits <= self.num_qubits);
        self.gates.extend(other.gates.iter().cloned());
    }

    /// The sequence that undoes this one: gates in reverse order, each inverted.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            num_qubits: self.num_qubits,
            gates: self.gates.iter().rev().map(Gate::inverse).collect(),
        }
    }

    /// Largest number of qubits any single gate touches.
    #[must_use]
    pub fn max_arity(&self) -> usize {
        self.gates
            .iter()
            .map(|g| g.qubits().len())
            .max()
            .unwrap_or(0)
    }

    /// Gate counts by name, sorted by name.
    #[must_use]
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        self.gates
            .iter()
            .map(Gate::name)
            .counts()
            .into_iter()
            .sorted()
            .collect()
    }
}

impl<'a> IntoIterator for &'a GateSequence {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}

impl fmt::Display for GateSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gate in &self.gates {
            writeln!(f, "{gate};")?;
        }
        Ok(())
    }
}
