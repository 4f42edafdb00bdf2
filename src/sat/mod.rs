#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Expressions, their CNF, and brute-force evaluation.
pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod evaluator;
pub mod expr;
pub mod formula;
pub mod literal;
pub mod parser;
pub mod variables;
