//! Conjunctive normal form and the conversion into it.
//!
//! Conversion runs in three passes over an [`Expr`]:
//!
//! 1. [`push_negations`] drives every `Not` down to a variable (De Morgan, double
//!    negation, negated constants), giving negation normal form.
//! 2. [`distribute`] rewrites `a | (b & c)` into `(a | b) & (a | c)` until no `Or`
//!    sits above an `And`.
//! 3. The resulting tree is flattened into clauses and simplified: constant-false
//!    literals vanish, clauses that are tautologies (or contain constant true) are
//!    dropped, duplicate clauses are merged.
//!
//! No other simplification happens. In particular `A & ~A` stays as the two unit
//! clauses `(A)` and `(~A)`, which the oracle handles like any other formula.
//!
//! Distribution is exponential in the worst case. Expressions small enough to be
//! searched are small enough for this.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::expr::Expr;
use crate::sat::literal::Literal;
use crate::sat::variables::Variables;
use itertools::Itertools;
use std::fmt;
use tracing::trace;

/// A conjunction of clauses over a variable ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CnfFormula {
    /// The clauses, simplified.
    pub clauses: Vec<Clause>,
    /// Names of the variables the literals index.
    pub variables: Variables,
}

impl CnfFormula {
    /// Builds a formula from clauses, keeping their order.
    #[must_use]
    pub const fn new(clauses: Vec<Clause>, variables: Variables) -> Self {
        Self { clauses, variables }
    }

    /// Normalizes `expr` into CNF over `variables`.
    #[must_use]
    pub fn from_expr(expr: &Expr, variables: Variables) -> Self {
        let nnf = push_negations(expr);
        let distributed = distribute(&nnf);
        let clauses = simplify(to_clauses(&distributed));
        trace!(clauses = clauses.len(), "normalized expression to CNF");
        Self { clauses, variables }
    }

    /// Variables in the ordering, referenced or not.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Clauses after simplification.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// The clauses, in order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// True if every clause is satisfied. Zero clauses is always true.
    #[must_use]
    pub fn eval(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|c| c.eval(assignment))
    }

    /// True if some clause has no literals and can never be satisfied.
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }
}

impl fmt::Display for CnfFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "true");
        }
        let name = |l: &Literal| {
            let base = self
                .variables
                .name(l.variable())
                .map_or_else(|| format!("x{}", l.variable()), str::to_string);
            if l.polarity() { base } else { format!("~{base}") }
        };
        let rendered = self
            .clauses
            .iter()
            .map(|c| {
                if c.is_empty() {
                    "(false)".to_string()
                } else {
                    format!("({})", c.iter().map(name).join(" | "))
                }
            })
            .join(" & ");
        f.write_str(&rendered)
    }
}

/// Rewrites `expr` into negation normal form.
#[must_use]
pub fn push_negations(expr: &Expr) -> Expr {
    match expr {
        Expr::Not(e) => match e.as_ref() {
            Expr::Var(i) => Expr::not(Expr::Var(*i)),
            Expr::Not(inner) => push_negations(inner),
            Expr::And(a, b) => Expr::or(
                push_negations(&Expr::not(a.as_ref().clone())),
                push_negations(&Expr::not(b.as_ref().clone())),
            ),
            Expr::Or(a, b) => Expr::and(
                push_negations(&Expr::not(a.as_ref().clone())),
                push_negations(&Expr::not(b.as_ref().clone())),
            ),
            Expr::Val(b) => Expr::Val(!b),
        },
        Expr::And(a, b) => Expr::and(push_negations(a), push_negations(b)),
        Expr::Or(a, b) => Expr::or(push_negations(a), push_negations(b)),
        Expr::Val(b) => Expr::Val(*b),
        Expr::Var(i) => Expr::Var(*i),
    }
}

/// Distributes disjunction over conjunction. Expects negation normal form.
#[must_use]
pub fn distribute(expr: &Expr) -> Expr {
    match expr {
        Expr::And(a, b) => Expr::and(distribute(a), distribute(b)),
        Expr::Or(a, b) => distribute_or(distribute(a), distribute(b)),
        e => e.clone(),
    }
}

/// `lhs | rhs` where both sides are already in CNF.
fn distribute_or(lhs: Expr, rhs: Expr) -> Expr {
    match (lhs, rhs) {
        (Expr::And(a, b), rhs) => Expr::and(
            distribute_or(*a, rhs.clone()),
            distribute_or(*b, rhs),
        ),
        (lhs, Expr::And(a, b)) => Expr::and(
            distribute_or(lhs.clone(), *a),
            distribute_or(lhs, *b),
        ),
        (lhs, rhs) => Expr::or(lhs, rhs),
    }
}

/// One clause per conjunct; `None` marks a clause that is trivially true.
fn to_clauses(expr: &Expr) -> Vec<Option<Clause>> {
    match expr {
        Expr::And(a, b) => {
            let mut clauses = to_clauses(a);
            clauses.extend(to_clauses(b));
            clauses
        }
        e => {
            let mut literals = Vec::new();
            if collect_literals(e, &mut literals) {
                vec![None]
            } else {
                vec![Some(Clause::new(literals))]
            }
        }
    }
}

/// Gathers the literals of a disjunction. Returns true on a constant-true disjunct.
fn collect_literals(expr: &Expr, out: &mut Vec<Literal>) -> bool {
    match expr {
        Expr::Or(a, b) => collect_literals(a, out) | collect_literals(b, out),
        Expr::Var(i) => {
            out.push(Literal::positive(*i));
            false
        }
        Expr::Not(e) => match e.as_ref() {
            Expr::Var(i) => {
                out.push(Literal::negative(*i));
                false
            }
            _ => {
                debug_assert!(false, "negation above a non-variable after push_negations");
                false
            }
        },
        Expr::Val(b) => *b,
        Expr::And(..) => {
            debug_assert!(false, "conjunction below disjunction after distribution");
            false
        }
    }
}

fn simplify(clauses: Vec<Option<Clause>>) -> Vec<Clause> {
    clauses
        .into_iter()
        .flatten()
        .filter(|c| !c.is_tautology())
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::parser::parse_expression;

    fn cnf_of(text: &str) -> (Expr, CnfFormula) {
        let (expr, vars) = parse_expression(text).unwrap();
        let cnf = CnfFormula::from_expr(&expr, vars);
        (expr, cnf)
    }

    fn assert_equivalent(text: &str) {
        let (expr, cnf) = cnf_of(text);
        let n = cnf.num_vars();
        for i in 0..(1usize << n) {
            let a = Assignment::from_index(i, n);
            assert_eq!(expr.eval(&a), cnf.eval(&a), "{text} differs at {a}");
        }
    }

    fn is_cnf_shape(e: &Expr) -> bool {
        fn is_lit(e: &Expr) -> bool {
            match e {
                Expr::Var(_) | Expr::Val(_) => true,
                Expr::Not(inner) => matches!(inner.as_ref(), Expr::Var(_)),
                _ => false,
            }
        }
        fn is_disj(e: &Expr) -> bool {
            match e {
                Expr::Or(a, b) => is_disj(a) && is_disj(b),
                e => is_lit(e),
            }
        }
        match e {
            Expr::And(a, b) => is_cnf_shape(a) && is_cnf_shape(b),
            e => is_disj(e),
        }
    }

    #[test]
    fn test_single_literal_is_one_clause() {
        let (_, cnf) = cnf_of("A");
        assert_eq!(cnf.num_clauses(), 1);
        assert_eq!(cnf.clauses[0][0], Literal::positive(0));

        let (_, cnf) = cnf_of("~A");
        assert_eq!(cnf.clauses, vec![Clause::new([Literal::negative(0)])]);
    }

    #[test]
    fn test_and_of_two_positives() {
        let (_, cnf) = cnf_of("A & B");
        assert_eq!(
            cnf.clauses,
            vec![
                Clause::new([Literal::positive(0)]),
                Clause::new([Literal::positive(1)]),
            ]
        );
    }

    #[test]
    fn test_single_disjunction_is_one_clause() {
        let (_, cnf) = cnf_of("A | ~B | C");
        assert_eq!(cnf.num_clauses(), 1);
        assert_eq!(cnf.clauses[0].len(), 3);
    }

    #[test]
    fn test_de_morgan() {
        let (_, cnf) = cnf_of("~(A & B)");
        assert_eq!(
            cnf.clauses,
            vec![Clause::new([Literal::negative(0), Literal::negative(1)])]
        );
        assert_equivalent("~(A | ~B) | C");
        assert_equivalent("~~~A");
    }

    #[test]
    fn test_distribution() {
        let (_, cnf) = cnf_of("A | (B & C)");
        assert_eq!(cnf.to_string(), "(A | B) & (A | C)");
        assert_equivalent("(A & B) | (C & D)");
        assert_equivalent("(A & ~B) | (~A & B)");
    }

    #[test]
    fn test_contradiction_kept_as_unit_clauses() {
        let (_, cnf) = cnf_of("A & ~A");
        assert_eq!(cnf.to_string(), "(A) & (~A)");
        assert!(!cnf.eval(&Assignment::from_bitstring("0").unwrap()));
        assert!(!cnf.eval(&Assignment::from_bitstring("1").unwrap()));
    }

    #[test]
    fn test_tautology_yields_zero_clauses() {
        let (_, cnf) = cnf_of("A | ~A");
        assert_eq!(cnf.num_clauses(), 0);
        assert_eq!(cnf.to_string(), "true");
        assert!(cnf.eval(&Assignment::from_bitstring("0").unwrap()));
    }

    #[test]
    fn test_constants() {
        let vars = Variables::new(["A"]);
        let falsum = CnfFormula::from_expr(&Expr::and(Expr::Var(0), Expr::Val(false)), vars.clone());
        assert!(falsum.has_empty_clause());
        assert_eq!(falsum.to_string(), "(A) & (false)");

        let verum = CnfFormula::from_expr(&Expr::or(Expr::Var(0), Expr::Val(true)), vars.clone());
        assert_eq!(verum.num_clauses(), 0);

        let negated = CnfFormula::from_expr(&Expr::not(Expr::Val(true)), vars);
        assert!(negated.has_empty_clause());
    }

    #[test]
    fn test_duplicate_clauses_merged() {
        let (_, cnf) = cnf_of("(A | B) & (B | A) & A & A");
        assert_eq!(cnf.num_clauses(), 2);
    }

    #[test]
    fn test_shape_after_distribution() {
        for text in ["~(A & (B | ~C))", "(A | B) & ~(C | (D & A))", "A | (B & (C | (D & E)))"] {
            let (expr, _) = parse_expression(text).unwrap();
            let cnf = distribute(&push_negations(&expr));
            assert!(is_cnf_shape(&cnf), "{text}");
            assert_equivalent(text);
        }
    }
}
