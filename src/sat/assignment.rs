//! Complete truth assignments and their bitstring encoding.
//!
//! An assignment over `n` variables is stored as a bit vector where bit `i` is the
//! value of variable `i`. Its bitstring renders bit `i` as character `i`, and the
//! enumeration index of an assignment reads that bitstring as a big-endian binary
//! number (variable `0` is the most significant bit). The execution backend uses the
//! same character order, so bitstrings from either side compare directly.

use crate::sat::literal::{Literal, Variable};
use crate::sat::variables::Variables;
use bit_vec::BitVec;
use std::fmt;

/// Values for every variable of a formula, by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Assignment(BitVec);

impl Assignment {
    /// All-false assignment over `n` variables.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self(BitVec::from_elem(n, false))
    }

    /// The assignment with enumeration index `index` over `n` variables.
    #[must_use]
    pub fn from_index(index: usize, n: usize) -> Self {
        let mut bits = BitVec::from_elem(n, false);
        for var in 0..n {
            bits.set(var, (index >> (n - 1 - var)) & 1 == 1);
        }
        Self(bits)
    }

    /// Parses a bitstring of `'0'`/`'1'` characters; anything else yields `None`.
    #[must_use]
    pub fn from_bitstring(bits: &str) -> Option<Self> {
        bits.chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<BitVec>>()
            .map(Self)
    }

    /// Number of variables covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an assignment over no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sets `var`, which must be in range.
    pub fn set(&mut self, var: Variable, b: bool) {
        self.0.set(var, b);
    }

    /// Value of `var`, `None` out of range.
    #[must_use]
    pub fn value(&self, var: Variable) -> Option<bool> {
        self.0.get(var)
    }

    /// Value of `l` under this assignment, `None` if its variable is out of range.
    #[must_use]
    pub fn literal_value(&self, l: Literal) -> Option<bool> {
        self.value(l.variable()).map(|b| l.eval(b))
    }

    /// Inverse of [`Assignment::from_index`].
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
            .iter()
            .fold(0, |acc, bit| (acc << 1) | usize::from(bit))
    }

    /// Variable `i` at character `i`.
    #[must_use]
    pub fn to_bitstring(&self) -> String {
        self.0.iter().map(|b| if b { '1' } else { '0' }).collect()
    }

    /// Pairs every variable name with its value, in variable order.
    #[must_use]
    pub fn named<'a>(&self, vars: &'a Variables) -> Vec<(&'a str, bool)> {
        vars.iter().zip(self.0.iter()).collect()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bitstring())
    }
}
