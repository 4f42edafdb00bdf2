//! The variable ordering shared by the oracle and the classical evaluator.
//!
//! Names are sorted by byte value, so `A < B < Z < a`. Index `i` in this ordering
//! is variable qubit `i` and character `i` of every bitstring the crate produces or
//! consumes. Both sides of the pipeline read the mapping from here; nothing else
//! assigns qubit indices to names.

use crate::sat::literal::Variable;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use std::fmt;

/// Sorted, deduplicated variable names with a reverse index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Variables {
    names: Vec<String>,
    index: FxHashMap<String, Variable>,
}

impl Variables {
    /// Builds the ordering from any collection of names; duplicates collapse.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .sorted()
            .dedup()
            .collect_vec();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Index of `name`, if present.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<Variable> {
        self.index.get(name).copied()
    }

    /// Name of `var`, if in range.
    #[must_use]
    pub fn name(&self, var: Variable) -> Option<&str> {
        self.names.get(var).map(String::as_str)
    }

    /// Names in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Size of the search space, `2^len`, or `None` if it does not fit a `usize`.
    #[must_use]
    pub fn search_space(&self) -> Option<usize> {
        u32::try_from(self.names.len())
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
    }
}

impl fmt::Display for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_deduplicated() {
        let vars = Variables::new(["b", "A", "a", "B", "A"]);
        assert_eq!(vars.iter().collect_vec(), vec!["A", "B", "a", "b"]);
        assert_eq!(vars.index_of("a"), Some(2));
        assert_eq!(vars.index_of("c"), None);
        assert_eq!(vars.name(1), Some("B"));
    }

    #[test]
    fn test_search_space() {
        assert_eq!(Variables::new(["x", "y", "z"]).search_space(), Some(8));
        assert_eq!(Variables::default().search_space(), Some(1));
    }

    #[test]
    fn test_search_space_overflow() {
        let names = |n: usize| (0..n).map(|i| format!("v{i:03}")).collect_vec();
        let widest = usize::BITS as usize - 1;
        assert_eq!(
            Variables::new(names(widest)).search_space(),
            Some(1usize << widest)
        );
        assert_eq!(Variables::new(names(widest + 1)).search_space(), None);
        assert_eq!(Variables::new(names(100)).search_space(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Variables::new(["B", "A"]).to_string(), "[A, B]");
    }
}
