#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variables and signed literals.
use core::ops::{Neg, Not};
use std::fmt::Debug;

/// Index of a variable in a formula's [`Variables`](crate::sat::variables::Variables) ordering.
///
/// The same index is the variable's qubit and its bitstring position.
pub type Variable = usize;

/// A variable together with the polarity it appears with.
///
/// `polarity == true` is the positive literal `x`, `false` is `~x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal {
    variable: Variable,
    polarity: bool,
}

impl Literal {
    /// A literal of `variable` with the given polarity.
    #[must_use]
    pub const fn new(variable: Variable, polarity: bool) -> Self {
        Self { variable, polarity }
    }

    /// `x`.
    #[must_use]
    pub const fn positive(variable: Variable) -> Self {
        Self::new(variable, true)
    }

    /// `~x`.
    #[must_use]
    pub const fn negative(variable: Variable) -> Self {
        Self::new(variable, false)
    }

    /// The variable index.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.variable
    }

    /// True for `x`, false for `~x`.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.polarity
    }

    /// The complementary literal.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            variable: self.variable,
            polarity: !self.polarity,
        }
    }

    /// Truth value of the literal when its variable takes `value`.
    #[must_use]
    pub const fn eval(self, value: bool) -> bool {
        value == self.polarity
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Not for &Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negated()
    }
}
