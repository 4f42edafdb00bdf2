//! Compiles a CNF formula into a phase-marking oracle.
//!
//! For clause `j` with ancilla `a_j` the compute block is
//!
//! ```text
//! X  on every qubit of a positive literal    (1 now means "literal is false")
//! MCX(all literal qubits -> a_j)             (a_j = 1 iff the clause is false)
//! X  on every qubit of a positive literal    (restore the variables)
//! X  on a_j                                  (a_j = 1 iff the clause is true)
//! ```
//!
//! After every clause is computed, one phase flip controlled on all ancillas marks
//! exactly the satisfying assignments. The compute block is then undone in reverse
//! clause order, returning every ancilla to 0 so the oracle can be applied again.
//!
//! Degenerate shapes need no special cases:
//! - an empty clause emits `X; X` on its ancilla and never becomes satisfied;
//! - one clause marks with a single `Z`;
//! - zero clauses mark with an unconditional phase flip, i.e. every state.

use crate::error::CompileError;
use crate::quantum::gate::{Gate, GateSequence, Qubit};
use crate::quantum::layout::QubitLayout;
use crate::quantum::reversible::Conjugation;
use crate::sat::clause::Clause;
use crate::sat::cnf::CnfFormula;
use itertools::Itertools;
use std::ops::Range;
use tracing::{debug, trace};

/// A compiled oracle: its layout and its compute/mark structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oracle {
    layout: QubitLayout,
    block: Conjugation,
}

impl Oracle {
    /// Qubit positions of variables and ancillas.
    #[must_use]
    pub const fn layout(&self) -> &QubitLayout {
        &self.layout
    }

    /// Register width, variables plus ancillas.
    #[must_use]
    pub const fn num_qubits(&self) -> usize {
        self.layout.num_qubits()
    }

    /// The variable qubits.
    #[must_use]
    pub const fn objective_qubits(&self) -> Range<Qubit> {
        self.layout.objective_qubits()
    }

    /// The per-clause compute half.
    #[must_use]
    pub const fn compute(&self) -> &GateSequence {
        self.block.compute()
    }

    /// The marking phase flip.
    #[must_use]
    pub const fn mark(&self) -> &GateSequence {
        self.block.action()
    }

    /// The complete oracle: compute, mark, uncompute.
    #[must_use]
    pub fn gates(&self) -> GateSequence {
        self.block.assemble()
    }

    /// Splits into the full gate sequence and the objective qubits.
    #[must_use]
    pub fn into_parts(self) -> (GateSequence, Vec<Qubit>) {
        (self.gates(), self.objective_qubits().collect())
    }
}

/// Turns CNF formulas into oracles.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleCompiler;

impl OracleCompiler {
    /// Compiles `cnf` into an [`Oracle`].
    ///
    /// # Errors
    ///
    /// [`CompileError::UnknownVariable`] if a literal indexes past the formula's
    /// variables.
    pub fn compile(cnf: &CnfFormula) -> Result<Oracle, CompileError> {
        let layout = QubitLayout::for_formula(cnf);
        let mut compute = GateSequence::new(layout.num_qubits());

        for (j, (clause, ancilla)) in cnf.iter().zip(layout.ancillas()).enumerate() {
            Self::compute_clause(&layout, j, clause, ancilla, &mut compute)?;
        }

        let mut mark = GateSequence::new(layout.num_qubits());
        mark.push(Gate::phase_flip(layout.ancillas()));

        debug!(
            vars = layout.num_vars(),
            clauses = layout.num_clauses(),
            qubits = layout.num_qubits(),
            compute_gates = compute.len(),
            unsatisfiable = cnf.has_empty_clause(),
            "compiled oracle"
        );

        Ok(Oracle {
            layout,
            block: Conjugation::new(compute, mark),
        })
    }

    fn compute_clause(
        layout: &QubitLayout,
        index: usize,
        clause: &Clause,
        ancilla: Qubit,
        out: &mut GateSequence,
    ) -> Result<(), CompileError> {
        let mut controls = Vec::with_capacity(clause.len());
        let mut flips = Vec::new();

        for lit in clause {
            let qubit =
                layout
                    .variable_qubit(lit.variable())
                    .ok_or(CompileError::UnknownVariable {
                        clause: index,
                        variable: lit.variable(),
                        num_vars: layout.num_vars(),
                    })?;
            controls.push(qubit);
            if lit.polarity() {
                flips.push(qubit);
            }
        }

        trace!(
            clause = index,
            ancilla,
            controls = %controls.iter().join(","),
            "clause indicator"
        );

        out.x_all(flips.iter().copied());
        out.push(Gate::mcx(controls, ancilla));
        out.x_all(flips.iter().copied());
        out.push(Gate::X(ancilla));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::formula::Formula;
    use crate::sat::literal::Literal;
    use crate::sat::variables::Variables;

    fn compile(text: &str) -> Oracle {
        OracleCompiler::compile(Formula::parse(text).unwrap().cnf()).unwrap()
    }

    #[test]
    fn test_a_and_b_layout() {
        // (A) & (B): two unit clauses, ancillas 2 and 3
        let oracle = compile("A & B");
        assert_eq!(oracle.num_qubits(), 4);
        assert_eq!(oracle.objective_qubits(), 0..2);
        let compute: Vec<_> = oracle.compute().iter().cloned().collect();
        assert_eq!(
            compute,
            vec![
                Gate::X(0),
                Gate::mcx([0], 2),
                Gate::X(0),
                Gate::X(2),
                Gate::X(1),
                Gate::mcx([1], 3),
                Gate::X(1),
                Gate::X(3),
            ]
        );
        assert_eq!(
            oracle.mark().iter().cloned().collect::<Vec<_>>(),
            vec![Gate::phase_flip([2, 3])]
        );
    }

    #[test]
    fn test_single_clause_marks_with_z() {
        // one clause with two positive literals
        let oracle = compile("A | B");
        assert_eq!(oracle.num_qubits(), 3);
        assert_eq!(
            oracle.mark().iter().cloned().collect::<Vec<_>>(),
            vec![Gate::Z(2)]
        );
        let compute: Vec<_> = oracle.compute().iter().cloned().collect();
        assert_eq!(
            compute,
            vec![
                Gate::X(0),
                Gate::X(1),
                Gate::mcx([0, 1], 2),
                Gate::X(0),
                Gate::X(1),
                Gate::X(2),
            ]
        );
    }

    #[test]
    fn test_negative_literals_are_not_flipped() {
        let oracle = compile("~A | ~B");
        let flips = oracle
            .compute()
            .iter()
            .filter(|g| matches!(g, Gate::X(q) if *q < 2))
            .count();
        assert_eq!(flips, 0);
    }

    #[test]
    fn test_uncompute_is_reverse_clause_order() {
        let oracle = compile("(A | B) & (~A | C)");
        let gates = oracle.gates();
        let compute = oracle.compute().len();
        assert_eq!(gates.len(), 2 * compute + 1);

        let all: Vec<_> = gates.iter().cloned().collect();
        let forward = &all[..compute];
        let backward: Vec<_> = all[compute + 1..].iter().rev().cloned().collect();
        assert_eq!(forward, backward.as_slice());
        // the first gate after the mark belongs to the last clause (ancilla 4)
        assert_eq!(all[compute + 1], Gate::X(4));
    }

    #[test]
    fn test_zero_clauses_marks_everything() {
        let oracle = compile("A | ~A");
        assert_eq!(oracle.num_qubits(), 1);
        assert!(oracle.compute().is_empty());
        assert_eq!(
            oracle.gates().iter().cloned().collect::<Vec<_>>(),
            vec![Gate::phase_flip(std::iter::empty())]
        );
    }

    #[test]
    fn test_empty_clause_leaves_ancilla_clear() {
        let cnf = CnfFormula::new(vec![Clause::default()], Variables::new(["A"]));
        let oracle = OracleCompiler::compile(&cnf).unwrap();
        let compute: Vec<_> = oracle.compute().iter().cloned().collect();
        assert_eq!(compute, vec![Gate::X(1), Gate::X(1)]);
    }

    #[test]
    fn test_unknown_variable() {
        let cnf = CnfFormula::new(
            vec![Clause::new([Literal::positive(0)]), Clause::new([Literal::negative(3)])],
            Variables::new(["A", "B"]),
        );
        assert_eq!(
            OracleCompiler::compile(&cnf),
            Err(CompileError::UnknownVariable {
                clause: 1,
                variable: 3,
                num_vars: 2
            })
        );
    }

    #[test]
    fn test_into_parts() {
        let (gates, objective) = compile("A & ~B").into_parts();
        assert_eq!(objective, vec![0, 1]);
        assert_eq!(gates.num_qubits(), 4);
    }
}
