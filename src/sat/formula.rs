//! A parsed expression bundled with its CNF and variable ordering.

use crate::error::{EvaluationError, ParseError};
use crate::sat::assignment::Assignment;
use crate::sat::cnf::CnfFormula;
use crate::sat::expr::Expr;
use crate::sat::parser::parse_expression;
use crate::sat::variables::Variables;
use std::fmt;

/// A parsed expression together with its CNF.
///
/// The expression is kept so candidates can be checked against what the user
/// actually wrote, not only against the normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    text: String,
    expr: Expr,
    cnf: CnfFormula,
}

impl Formula {
    /// Parses and normalizes `text`.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] from the expression parser.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let (expr, variables) = parse_expression(text)?;
        Ok(Self::from_expr(text, expr, variables))
    }

    /// Wraps an already-built expression.
    #[must_use]
    pub fn from_expr(text: &str, expr: Expr, variables: Variables) -> Self {
        let cnf = CnfFormula::from_expr(&expr, variables);
        Self {
            text: text.to_string(),
            expr,
            cnf,
        }
    }

    /// The expression as written.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed expression.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The normalized clauses.
    #[must_use]
    pub const fn cnf(&self) -> &CnfFormula {
        &self.cnf
    }

    /// The variable ordering.
    #[must_use]
    pub const fn variables(&self) -> &Variables {
        &self.cnf.variables
    }

    /// `n`, the number of distinct variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.cnf.num_vars()
    }

    /// The number of assignments, `N = 2^n`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::SearchSpaceOverflow`] when `2^n` does not fit a `usize`.
    pub fn search_space(&self) -> Result<usize, EvaluationError> {
        self.variables()
            .search_space()
            .ok_or(EvaluationError::SearchSpaceOverflow {
                vars: self.num_vars(),
            })
    }

    /// Substitutes `assignment` into the original expression.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        assignment.len() == self.num_vars() && self.expr.eval(assignment)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_both_forms() {
        let formula = Formula::parse("~(A & B)").unwrap();
        assert_eq!(formula.num_vars(), 2);
        assert_eq!(formula.cnf().num_clauses(), 1);
        assert_eq!(formula.text(), "~(A & B)");
        assert_eq!(formula.to_string(), "~(A & B)");
    }

    #[test]
    fn test_satisfied_by() {
        let formula = Formula::parse("A & ~B").unwrap();
        let check = |bits| formula.is_satisfied_by(&Assignment::from_bitstring(bits).unwrap());
        assert!(check("10"));
        assert!(!check("11"));
        // wrong length never satisfies
        assert!(!check("1"));
        assert!(!check("100"));
    }

    #[test]
    fn test_search_space() {
        assert_eq!(Formula::parse("A & ~B | C").unwrap().search_space(), Ok(8));

        let names = (0..64)
            .map(|i| format!("{}{}", char::from(b'a' + i / 26), char::from(b'a' + i % 26)))
            .collect::<Vec<_>>();
        let wide = Formula::parse(&names.join(" & ")).unwrap();
        assert_eq!(wide.num_vars(), 64);
        assert_eq!(
            wide.search_space(),
            Err(EvaluationError::SearchSpaceOverflow { vars: 64 })
        );
    }

    #[test]
    fn test_parse_error_propagates() {
        assert_eq!(Formula::parse("&&"), Err(ParseError::NoVariables));
    }
}
