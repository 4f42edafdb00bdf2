//! The execution backend boundary.
//!
//! The search only needs one capability from whatever runs its circuits: take a
//! circuit and a shot count, return a [`Histogram`] over the measured classical
//! bits. Bitstring character `j` is classical bit `j`.
//!
//! Backends take `&mut self` because a sampling backend owns random state.
//! Concurrent searches use one backend each.

use crate::error::BackendError;
use crate::quantum::circuit::Circuit;
use crate::quantum::histogram::Histogram;
use std::fmt;

/// What kind of machine sits behind a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Classical simulation, exact or sampled.
    Simulate,
    /// A physical device.
    Hardware,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulate => write!(f, "simulate"),
            Self::Hardware => write!(f, "hardware"),
        }
    }
}

/// Anything that can run a measured circuit for a number of shots.
pub trait ExecutionBackend {
    /// Simulator or device.
    fn kind(&self) -> BackendKind;

    /// Runs `circuit` `shots` times and counts the measured bitstrings.
    ///
    /// # Errors
    ///
    /// Any [`BackendError`]; the caller does not retry.
    fn run(&mut self, circuit: &Circuit, shots: usize) -> Result<Histogram, BackendError>;
}

impl<B: ExecutionBackend + ?Sized> ExecutionBackend for &mut B {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn run(&mut self, circuit: &Circuit, shots: usize) -> Result<Histogram, BackendError> {
        (**self).run(circuit, shots)
    }
}

impl<B: ExecutionBackend + ?Sized> ExecutionBackend for Box<B> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn run(&mut self, circuit: &Circuit, shots: usize) -> Result<Histogram, BackendError> {
        (**self).run(circuit, shots)
    }
}

/// Checks that a histogram returned for `circuit` only has keys of the measured
/// width made of `0`/`1`.
///
/// # Errors
///
/// [`BackendError::MalformedOutput`] naming the first offending key.
pub fn validate_histogram(circuit: &Circuit, histogram: &Histogram) -> Result<(), BackendError> {
    let width = circuit.num_clbits();
    match histogram
        .iter()
        .find(|(bits, _)| bits.len() != width || !bits.bytes().all(|b| b == b'0' || b == b'1'))
    {
        Some((bits, _)) => Err(BackendError::MalformedOutput(format!(
            "bitstring '{bits}' does not match {width} measured bits"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantum::gate::GateSequence;

    #[test]
    fn test_validate_histogram() {
        let circuit = Circuit::measure_all(GateSequence::new(3), [0, 1]);
        let mut good = Histogram::new(2);
        good.record("01", 2);
        assert!(validate_histogram(&circuit, &good).is_ok());

        let mut short = Histogram::new(2);
        short.record("1", 2);
        assert!(matches!(
            validate_histogram(&circuit, &short),
            Err(BackendError::MalformedOutput(_))
        ));

        let mut junk = Histogram::new(2);
        junk.record("0x", 2);
        assert!(validate_histogram(&circuit, &junk).is_err());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(BackendKind::Simulate.to_string(), "simulate");
        assert_eq!(BackendKind::Hardware.to_string(), "hardware");
    }
}
