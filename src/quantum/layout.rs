//! Where variables and clause ancillas live in the oracle register.

use crate::quantum::gate::Qubit;
use crate::sat::cnf::CnfFormula;
use crate::sat::literal::Variable;
use std::ops::Range;

/// Assignment of qubit indices to variables and clause ancillas.
///
/// Variable `i` is qubit `i`; the ancilla of clause `j` is qubit `num_vars + j`.
/// A layout belongs to one formula and is rebuilt for every new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QubitLayout {
    num_vars: usize,
    num_clauses: usize,
}

impl QubitLayout {
    /// A layout for `num_vars` variables and `num_clauses` clauses.
    #[must_use]
    pub const fn new(num_vars: usize, num_clauses: usize) -> Self {
        Self {
            num_vars,
            num_clauses,
        }
    }

    /// The layout of `cnf`.
    #[must_use]
    pub fn for_formula(cnf: &CnfFormula) -> Self {
        Self::new(cnf.num_vars(), cnf.num_clauses())
    }

    /// Variable qubits.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Ancilla qubits, one per clause.
    #[must_use]
    pub const fn num_clauses(&self) -> usize {
        self.num_clauses
    }

    /// Total register width.
    #[must_use]
    pub const fn num_qubits(&self) -> usize {
        self.num_vars + self.num_clauses
    }

    /// The qubit of `var`, or `None` if the formula has no such variable.
    #[must_use]
    pub const fn variable_qubit(&self, var: Variable) -> Option<Qubit> {
        if var < self.num_vars {
            Some(var)
        } else {
            None
        }
    }

    /// The variable qubits, which are the ones the search measures.
    #[must_use]
    pub const fn objective_qubits(&self) -> Range<Qubit> {
        0..self.num_vars
    }

    /// The clause ancillas, in clause order.
    #[must_use]
    pub const fn ancillas(&self) -> Range<Qubit> {
        self.num_vars..self.num_qubits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_ranges() {
        let layout = QubitLayout::new(3, 2);
        assert_eq!(layout.num_qubits(), 5);
        assert_eq!(layout.objective_qubits(), 0..3);
        assert_eq!(layout.ancillas(), 3..5);
        assert_eq!(layout.variable_qubit(2), Some(2));
        assert_eq!(layout.variable_qubit(3), None);
    }

    #[test]
    fn test_for_formula() {
        let formula = crate::sat::formula::Formula::parse("(A | B) & ~C").unwrap();
        let layout = QubitLayout::for_formula(formula.cnf());
        assert_eq!(layout, QubitLayout::new(3, 2));
    }
}
