//! Brute-force classical evaluation.
//!
//! Enumerates every assignment in index order (see [`Assignment::from_index`]) and
//! keeps those that satisfy the formula. This is the ground truth the search is
//! checked against, and the source of the solution count for the closed-form
//! iteration formula. Its cost is `2^n` evaluations, so it refuses to run past a
//! variable limit.

use crate::error::EvaluationError;
use crate::sat::assignment::Assignment;
use crate::sat::cnf::CnfFormula;
use crate::sat::formula::Formula;
use tracing::debug;

/// Default ceiling on the number of variables enumerated.
pub const DEFAULT_MAX_VARIABLES: usize = 24;

/// Enumerates assignments up to a variable ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicalEvaluator {
    max_variables: usize,
}

impl Default for ClassicalEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VARIABLES)
    }
}

impl ClassicalEvaluator {
    /// An evaluator that refuses formulas wider than `max_variables`.
    #[must_use]
    pub const fn new(max_variables: usize) -> Self {
        Self { max_variables }
    }

    fn check(&self, vars: usize) -> Result<(), EvaluationError> {
        if vars > self.max_variables {
            return Err(EvaluationError::TooManyVariables {
                vars,
                limit: self.max_variables,
            });
        }
        Ok(())
    }

    /// Every assignment over `n` variables, in enumeration order. Callers check
    /// `n` against the ceiling first.
    fn assignments(n: usize) -> impl Iterator<Item = Assignment> {
        (0..1usize << n).map(move |i| Assignment::from_index(i, n))
    }

    /// Satisfying assignments of `cnf`, as bitstrings in ascending index order.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::TooManyVariables`] past the configured limit.
    pub fn solve_cnf(&self, cnf: &CnfFormula) -> Result<Vec<String>, EvaluationError> {
        self.check(cnf.num_vars())?;
        Ok(Self::assignments(cnf.num_vars())
            .filter(|a| cnf.eval(a))
            .map(|a| a.to_bitstring())
            .collect())
    }

    /// Satisfying assignments of the original expression of `formula`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::TooManyVariables`] past the configured limit.
    pub fn solve(&self, formula: &Formula) -> Result<Vec<String>, EvaluationError> {
        self.check(formula.num_vars())?;
        let solutions: Vec<String> = Self::assignments(formula.num_vars())
            .filter(|a| formula.is_satisfied_by(a))
            .map(|a| a.to_bitstring())
            .collect();
        debug!(
            vars = formula.num_vars(),
            solutions = solutions.len(),
            "classical enumeration finished"
        );
        Ok(solutions)
    }

    /// Number of satisfying assignments, `M`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::TooManyVariables`] past the configured limit.
    pub fn count(&self, formula: &Formula) -> Result<usize, EvaluationError> {
        self.check(formula.num_vars())?;
        Ok(Self::assignments(formula.num_vars())
            .filter(|a| formula.is_satisfied_by(a))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solutions(text: &str) -> Vec<String> {
        ClassicalEvaluator::default()
            .solve(&Formula::parse(text).unwrap())
            .unwrap()
    }

    #[test]
    fn test_and() {
        assert_eq!(solutions("A & B"), vec!["11"]);
    }

    #[test]
    fn test_bit_order_follows_variable_order() {
        // A is character 0, B is character 1
        assert_eq!(solutions("A & ~B"), vec!["10"]);
        assert_eq!(solutions("~A & B"), vec!["01"]);
    }

    #[test]
    fn test_ascending_order() {
        assert_eq!(solutions("A | B"), vec!["01", "10", "11"]);
    }

    #[test]
    fn test_contradiction_and_tautology() {
        assert!(solutions("A & ~A").is_empty());
        assert_eq!(solutions("A | ~A"), vec!["0", "1"]);
    }

    #[test]
    fn test_cnf_agrees_with_expression() {
        let evaluator = ClassicalEvaluator::default();
        for text in [
            "(A | B) & (~A | C) & (~B | D)",
            "~(A & B) | (C & ~D)",
            "(A & ~A) | B",
        ] {
            let formula = Formula::parse(text).unwrap();
            assert_eq!(
                evaluator.solve(&formula).unwrap(),
                evaluator.solve_cnf(formula.cnf()).unwrap(),
                "{text}"
            );
        }
    }

    #[test]
    fn test_count() {
        let formula = Formula::parse("(A | B) & (~A | C) & (~B | D)").unwrap();
        let evaluator = ClassicalEvaluator::default();
        assert_eq!(
            evaluator.count(&formula).unwrap(),
            evaluator.solve(&formula).unwrap().len()
        );
    }

    #[test]
    fn test_variable_limit() {
        let formula = Formula::parse("A & B & C").unwrap();
        assert_eq!(
            ClassicalEvaluator::new(2).solve(&formula),
            Err(EvaluationError::TooManyVariables { vars: 3, limit: 2 })
        );
    }
}
