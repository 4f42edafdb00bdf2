//! A dense statevector simulator for the crate's gate set.
//!
//! Every gate in [`Gate`] has a real matrix, so amplitudes are plain `f64`. Basis
//! state `i` has qubit `q` in bit `q` of `i`. Measured outcomes are rendered with
//! classical bit `j` at character `j`.
//!
//! Two sampling modes:
//! - [`Sampling::Shots`] draws `shots` independent outcomes with `fastrand`;
//! - [`Sampling::Expected`] apportions `shots` to outcomes in proportion to their
//!   probabilities (largest remainder), which is deterministic and handy for
//!   reproducing a run exactly. The counts always sum to `shots`.

use crate::error::BackendError;
use crate::quantum::backend::{BackendKind, ExecutionBackend};
use crate::quantum::circuit::{Circuit, Measurement};
use crate::quantum::gate::{Gate, GateSequence, Qubit};
use crate::quantum::histogram::Histogram;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::trace;

/// Default qubit ceiling; `2^24` amplitudes is 128 MiB.
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// How measurement counts are produced from the final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sampling {
    /// Independent random shots.
    #[default]
    Shots,
    /// Exact apportionment of the shots, no randomness.
    Expected,
}

/// Simulator limits and sampling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Largest circuit accepted.
    pub max_qubits: usize,
    /// How counts are produced.
    pub sampling: Sampling,
    /// Seed for shot sampling; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            sampling: Sampling::Shots,
            seed: None,
        }
    }
}

/// Amplitudes of an `n`-qubit register.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    num_qubits: usize,
    amplitudes: Vec<f64>,
}

impl Statevector {
    /// `|0...0>`.
    #[must_use]
    pub fn zero(num_qubits: usize) -> Self {
        let mut amplitudes = vec![0.0; 1 << num_qubits];
        amplitudes[0] = 1.0;
        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Register width.
    #[must_use]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitude of basis state `index`, 0 outside the register.
    #[must_use]
    pub fn amplitude(&self, index: usize) -> f64 {
        self.amplitudes.get(index).copied().unwrap_or(0.0)
    }

    /// Probability of basis state `index`.
    #[must_use]
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitude(index).powi(2)
    }

    /// Applies one gate in place.
    pub fn apply(&mut self, gate: &Gate) {
        match gate {
            Gate::X(q) => self.flip(0, 1 << q),
            Gate::Mcx { controls, target } => self.flip(mask(controls), 1 << target),
            Gate::Z(q) => self.negate(1 << q),
            Gate::Mcz { qubits } => self.negate(mask(qubits)),
            Gate::H(q) => {
                let bit = 1 << q;
                for i in (0..self.amplitudes.len()).filter(|i| i & bit == 0) {
                    let (a, b) = (self.amplitudes[i], self.amplitudes[i | bit]);
                    self.amplitudes[i] = (a + b) * FRAC_1_SQRT_2;
                    self.amplitudes[i | bit] = (a - b) * FRAC_1_SQRT_2;
                }
            }
        }
    }

    /// Applies every gate of `gates` in order.
    pub fn apply_all(&mut self, gates: &GateSequence) {
        for gate in gates {
            self.apply(gate);
        }
    }

    /// Swaps the `target` bit of every basis state whose `controls` are all set.
    fn flip(&mut self, controls: usize, target: usize) {
        for i in 0..self.amplitudes.len() {
            if i & controls == controls && i & target == 0 {
                self.amplitudes.swap(i, i | target);
            }
        }
    }

    fn negate(&mut self, qubits: usize) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & qubits == qubits {
                *amp = -*amp;
            }
        }
    }

    /// Outcome distribution over the classical bits of `measurements`.
    ///
    /// Entry `k` is the probability that classical bit `j` reads bit `j` of `k`.
    #[must_use]
    pub fn marginal(&self, measurements: &[Measurement], num_clbits: usize) -> Vec<f64> {
        let mut out = vec![0.0; 1 << num_clbits];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if *amp == 0.0 {
                continue;
            }
            let outcome = measurements
                .iter()
                .filter(|m| i >> m.qubit & 1 == 1)
                .fold(0, |acc, m| acc | 1 << m.clbit);
            out[outcome] += amp * amp;
        }
        out
    }
}

fn mask(qubits: &[Qubit]) -> usize {
    qubits.iter().fold(0, |acc, q| acc | 1 << q)
}

/// Renders outcome `k` with classical bit `j` at character `j`.
#[must_use]
pub fn render_outcome(outcome: usize, width: usize) -> String {
    (0..width)
        .map(|j| if outcome >> j & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// The in-process backend.
#[derive(Debug, Clone)]
pub struct StatevectorSimulator {
    config: SimulatorConfig,
    rng: fastrand::Rng,
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl StatevectorSimulator {
    /// A simulator with its own generator, seeded from `config`.
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        Self { config, rng }
    }

    /// The configuration it was built with.
    #[must_use]
    pub const fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    fn check(&self, circuit: &Circuit) -> Result<(), BackendError> {
        let num_qubits = circuit.num_qubits();
        let limit = self.config.max_qubits;
        if num_qubits > limit || circuit.num_clbits() > limit {
            return Err(BackendError::TooManyQubits {
                requested: num_qubits.max(circuit.num_clbits()),
                limit,
            });
        }
        let out_of_range = circuit
            .gates()
            .iter()
            .flat_map(Gate::qubits)
            .chain(circuit.measurements().iter().map(|m| m.qubit))
            .find(|&q| q >= num_qubits);
        match out_of_range {
            Some(qubit) => Err(BackendError::QubitOutOfRange { qubit, num_qubits }),
            None => Ok(()),
        }
    }

    /// Runs the gates of `circuit` and returns the final state, without measuring.
    ///
    /// # Errors
    ///
    /// [`BackendError::TooManyQubits`] or [`BackendError::QubitOutOfRange`].
    pub fn statevector(&self, circuit: &Circuit) -> Result<Statevector, BackendError> {
        self.check(circuit)?;
        let mut state = Statevector::zero(circuit.num_qubits());
        state.apply_all(circuit.gates());
        Ok(state)
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample(&mut self, distribution: &[f64], width: usize, shots: usize) -> Vec<usize> {
        let mut counts = vec![0; distribution.len()];
        match self.config.sampling {
            Sampling::Expected => {
                let exact = distribution.iter().map(|p| p * shots as f64).collect::<Vec<_>>();
                for (count, x) in counts.iter_mut().zip(&exact) {
                    *count = x.floor() as usize;
                }
                let left = shots.saturating_sub(counts.iter().sum());
                // ties on the remainder go to the smaller bitstring
                let mut order = (0..exact.len()).collect::<Vec<_>>();
                order.sort_by_cached_key(|&k| {
                    (
                        Reverse(OrderedFloat(exact[k] - exact[k].floor())),
                        render_outcome(k, width),
                    )
                });
                for &k in order.iter().take(left) {
                    counts[k] += 1;
                }
            }
            Sampling::Shots => {
                let cumulative: Vec<f64> = distribution
                    .iter()
                    .scan(0.0, |acc, p| {
                        *acc += p;
                        Some(*acc)
                    })
                    .collect();
                let total = cumulative.last().copied().unwrap_or(0.0);
                let last = counts.len() - 1;
                for _ in 0..shots {
                    let r = self.rng.f64() * total;
                    let k = cumulative.partition_point(|&c| c <= r).min(last);
                    counts[k] += 1;
                }
            }
        }
        counts
    }
}

impl ExecutionBackend for StatevectorSimulator {
    fn kind(&self) -> BackendKind {
        BackendKind::Simulate
    }

    fn run(&mut self, circuit: &Circuit, shots: usize) -> Result<Histogram, BackendError> {
        let state = self.statevector(circuit)?;
        let width = circuit.num_clbits();
        let distribution = state.marginal(circuit.measurements(), width);
        let counts = self.sample(&distribution, width, shots);

        let mut histogram = Histogram::new(shots);
        for (outcome, count) in counts.into_iter().enumerate() {
            histogram.record(render_outcome(outcome, width), count);
        }
        trace!(
            qubits = circuit.num_qubits(),
            gates = circuit.gates().len(),
            shots,
            outcomes = histogram.len(),
            "simulated circuit"
        );
        Ok(histogram)
    }
}
