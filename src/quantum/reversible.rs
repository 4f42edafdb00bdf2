//! Compute / act / uncompute blocks.
//!
//! A [`Conjugation`] stores only the `compute` half and the `action`. The
//! uncompute half is always derived as `compute.inverse()`, so the two can never
//! drift apart. Both the oracle (clause ancillas around the marking phase flip)
//! and the diffuser (basis change around the zero-state reflection) are built this
//! way.

use crate::quantum::gate::GateSequence;

/// A compute block and the action it surrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conjugation {
    compute: GateSequence,
    action: GateSequence,
}

impl Conjugation {
    /// Wraps `action` in `compute` and its inverse.
    #[must_use]
    pub const fn new(compute: GateSequence, action: GateSequence) -> Self {
        Self { compute, action }
    }

    /// The compute half.
    #[must_use]
    pub const fn compute(&self) -> &GateSequence {
        &self.compute
    }

    /// The surrounded action.
    #[must_use]
    pub const fn action(&self) -> &GateSequence {
        &self.action
    }

    /// The derived uncompute half.
    #[must_use]
    pub fn uncompute(&self) -> GateSequence {
        self.compute.inverse()
    }

    /// `compute`, then `action`, then `compute⁻¹`, as one sequence.
    #[must_use]
    pub fn assemble(&self) -> GateSequence {
        let width = self.compute.num_qubits().max(self.action.num_qubits());
        let mut out = GateSequence::new(width);
        out.append(&self.compute);
        out.append(&self.action);
        out.append(&self.uncompute());
        out
    }
}
