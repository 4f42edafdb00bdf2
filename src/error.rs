//! Error types shared across the pipeline.
//!
//! Each stage has its own error enum so callers can tell a malformed expression
//! apart from a backend that went away. [`Error`] wraps all of them for the
//! top-level entry points.
//!
//! An adaptive search that runs out of attempts is *not* an error; it is reported
//! as a `SearchOutcome` with `found == false`.

use thiserror::Error;

/// Result alias for the crate-level entry points.
pub type Result<T> = std::result::Result<T, Error>;

/// The expression text could not be turned into a formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No alphabetic variable token occurs anywhere in the input.
    #[error("no variables found in expression")]
    NoVariables,

    /// A character outside the expression alphabet.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset into the input.
        offset: usize,
    },

    /// A token that is valid on its own but not in this position.
    #[error("unexpected '{found}' at offset {offset}, expected {expected}")]
    UnexpectedToken {
        /// The token as written.
        found: String,
        /// What the parser was looking for.
        expected: &'static str,
        /// Byte offset into the input.
        offset: usize,
    },

    /// The input ended in the middle of an expression.
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// An opening parenthesis that is never closed.
    #[error("unclosed '(' at offset {offset}")]
    UnclosedParen {
        /// Byte offset of the `(`.
        offset: usize,
    },
}

/// The oracle could not be synthesized from a CNF formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A literal refers to a variable outside the formula's variable ordering.
    #[error("clause {clause} references unknown variable {variable} (formula has {num_vars})")]
    UnknownVariable {
        /// Index of the clause in the formula.
        clause: usize,
        /// The out-of-range variable index.
        variable: usize,
        /// Variables the formula declares.
        num_vars: usize,
    },
}

/// The execution backend failed to produce a histogram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend cannot be reached or refused the job.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The circuit needs more qubits than the backend supports.
    #[error("circuit needs {requested} qubits, backend supports at most {limit}")]
    TooManyQubits {
        /// Qubits (or classical bits) the circuit uses.
        requested: usize,
        /// The backend's ceiling.
        limit: usize,
    },

    /// A gate or measurement references a qubit outside the circuit.
    #[error("qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange {
        /// The referenced qubit.
        qubit: usize,
        /// Width of the circuit.
        num_qubits: usize,
    },

    /// The backend returned something that is not a histogram over the measured bits.
    #[error("malformed backend output: {0}")]
    MalformedOutput(String),
}

/// Brute-force evaluation refused to run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// Enumerating `2^vars` assignments would exceed the configured ceiling.
    #[error("{vars} variables exceed the enumeration limit of {limit}")]
    TooManyVariables {
        /// Variables in the formula.
        vars: usize,
        /// The configured ceiling.
        limit: usize,
    },

    /// `2^vars` does not fit in a `usize`.
    #[error("search space of {vars} variables does not fit in a machine word")]
    SearchSpaceOverflow {
        /// Variables in the formula.
        vars: usize,
    },
}

/// A gate sequence could not be run as a classical reversible function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmulationError {
    /// The gate creates superposition and has no classical semantics.
    #[error("gate {index} ({gate}) has no classical semantics")]
    NonClassicalGate {
        /// Position of the gate in the sequence.
        index: usize,
        /// The gate, rendered.
        gate: String,
    },

    /// The input register does not match the sequence width.
    #[error("register has {actual} bits, sequence acts on {expected} qubits")]
    WidthMismatch {
        /// Width of the gate sequence.
        expected: usize,
        /// Width of the register.
        actual: usize,
    },
}

/// Any failure of the solve pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The expression did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Oracle synthesis failed.
    #[error("error creating oracle: {0}")]
    Compile(#[from] CompileError),

    /// The backend failed; never retried.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The formula is too wide to enumerate or count.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    /// The oracle could not be emulated classically.
    #[error(transparent)]
    Emulation(#[from] EmulationError),

    /// Classical emulation found assignments the oracle marks wrongly or leaves dirty.
    #[error("oracle check failed: {mismatched} mismatched and {dirty} dirty assignments")]
    OracleCheck {
        /// Assignments marked differently from how the formula evaluates.
        mismatched: usize,
        /// Assignments that left some qubit changed.
        dirty: usize,
    },

    /// Reading input files failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a report failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
