//! Boolean expression trees as parsed from text.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Variable;
use crate::sat::variables::Variables;
use std::fmt;

/// Boolean expression tree over variable indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// A variable by index.
    Var(Variable),
    /// Negation.
    Not(Box<Expr>),
    /// Conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Disjunction.
    Or(Box<Expr>, Box<Expr>),
    /// A constant.
    Val(bool),
}

impl Expr {
    /// `~e`.
    #[must_use]
    pub fn not(e: Self) -> Self {
        Self::Not(Box::new(e))
    }

    /// `lhs & rhs`.
    #[must_use]
    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    /// `lhs | rhs`.
    #[must_use]
    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Evaluates the expression under a complete assignment.
    ///
    /// Variables the assignment does not cover read as `false`.
    #[must_use]
    pub fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Self::Var(v) => assignment.value(*v).unwrap_or(false),
            Self::Not(e) => !e.eval(assignment),
            Self::And(a, b) => a.eval(assignment) && b.eval(assignment),
            Self::Or(a, b) => a.eval(assignment) || b.eval(assignment),
            Self::Val(b) => *b,
        }
    }

    /// Renders the expression with names from `vars`, fully parenthesized.
    #[must_use]
    pub fn display<'a>(&'a self, vars: &'a Variables) -> impl fmt::Display + 'a {
        Named { expr: self, vars }
    }
}

struct Named<'a> {
    expr: &'a Expr,
    vars: &'a Variables,
}

impl<'a> Named<'a> {
    const fn sub(&self, expr: &'a Expr) -> Self {
        Self {
            expr,
            vars: self.vars,
        }
    }
}

impl fmt::Display for Named<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expr::Var(v) => match self.vars.name(*v) {
                Some(name) => write!(f, "{name}"),
                None => write!(f, "x{v}"),
            },
            Expr::Not(e) => write!(f, "~{}", self.sub(e)),
            Expr::And(a, b) => write!(f, "({} & {})", self.sub(a), self.sub(b)),
            Expr::Or(a, b) => write!(f, "({} | {})", self.sub(a), self.sub(b)),
            Expr::Val(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(bits: &str) -> Assignment {
        Assignment::from_bitstring(bits).unwrap()
    }

    #[test]
    fn test_eval() {
        // (x0 & ~x1) | x2
        let e = Expr::or(
            Expr::and(Expr::Var(0), Expr::not(Expr::Var(1))),
            Expr::Var(2),
        );
        assert!(e.eval(&assignment("100")));
        assert!(e.eval(&assignment("001")));
        assert!(!e.eval(&assignment("110")));
        assert!(!e.eval(&assignment("000")));
    }

    #[test]
    fn test_constants_and_uncovered_variables() {
        assert!(Expr::or(Expr::Val(false), Expr::Val(true)).eval(&assignment("0")));
        assert!(!Expr::and(Expr::Val(true), Expr::Var(0)).eval(&assignment("0")));
        // x3 is outside a two-variable assignment and reads as false
        assert!(Expr::not(Expr::Var(3)).eval(&assignment("11")));
    }

    #[test]
    fn test_display_uses_names() {
        let vars = Variables::new(["A", "B"]);
        let e = Expr::or(Expr::Var(0), Expr::not(Expr::Var(1)));
        assert_eq!(e.display(&vars).to_string(), "(A | ~B)");
    }
}
