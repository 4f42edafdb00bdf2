//! Clauses of a CNF formula.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Literal;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;

/// Disjunction of literals.
///
/// Literals are kept sorted and deduplicated, so two clauses over the same literal
/// set compare equal. An empty clause is false under every assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    /// Sorts and deduplicates `literals`.
    pub fn new<I: IntoIterator<Item = Literal>>(literals: I) -> Self {
        let literals = literals.into_iter().sorted().dedup().collect();
        Self { literals }
    }

    /// Distinct literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// True for the empty, unsatisfiable clause.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Literals in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// True if the clause contains both `x` and `~x` for some variable.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        // sorted by (variable, polarity): complementary literals are adjacent
        self.literals
            .iter()
            .tuple_windows()
            .any(|(a, b)| a.variable() == b.variable())
    }

    /// True if some literal holds.
    #[must_use]
    pub fn eval(&self, assignment: &Assignment) -> bool {
        self.iter()
            .any(|&l| assignment.literal_value(l).unwrap_or(false))
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self::new(literals)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_dedups() {
        let clause = Clause::new([
            Literal::positive(2),
            Literal::negative(0),
            Literal::positive(2),
        ]);
        assert_eq!(clause.len(), 2);
        assert_eq!(clause[0], Literal::negative(0));
        assert_eq!(clause[1], Literal::positive(2));
    }

    #[test]
    fn test_tautology() {
        assert!(Clause::new([Literal::positive(1), Literal::negative(1)]).is_tautology());
        assert!(!Clause::new([Literal::positive(1), Literal::negative(2)]).is_tautology());
        assert!(!Clause::default().is_tautology());
    }

    #[test]
    fn test_eval() {
        let clause = Clause::new([Literal::positive(0), Literal::negative(1)]);
        assert!(clause.eval(&Assignment::from_bitstring("10").unwrap()));
        assert!(clause.eval(&Assignment::from_bitstring("00").unwrap()));
        assert!(!clause.eval(&Assignment::from_bitstring("01").unwrap()));
        assert!(!Clause::default().eval(&Assignment::from_bitstring("11").unwrap()));
    }

    #[test]
    fn test_iter() {
        let clause = Clause::from(vec![Literal::positive(0), Literal::positive(1)]);
        let mut iter = clause.iter();
        assert_eq!(iter.next(), Some(&Literal::positive(0)));
        assert_eq!(iter.next(), Some(&Literal::positive(1)));
        assert_eq!(iter.next(), None);
    }
}
