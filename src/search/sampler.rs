//! Sources of the random iteration count drawn on each adaptive attempt.

use std::collections::VecDeque;

/// Draws an iteration count uniformly from `0..upper`.
pub trait IterationSampler {
    /// `upper` is always at least 1.
    fn draw(&mut self, upper: usize) -> usize;
}

impl<S: IterationSampler + ?Sized> IterationSampler for &mut S {
    fn draw(&mut self, upper: usize) -> usize {
        (**self).draw(upper)
    }
}

/// Uniform draws from a `fastrand` generator.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: fastrand::Rng,
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RandomSampler {
    /// A seeded sampler, or an entropy-seeded one for `None`.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed),
        }
    }
}

impl IterationSampler for RandomSampler {
    fn draw(&mut self, upper: usize) -> usize {
        self.rng.usize(0..upper.max(1))
    }
}

/// Replays a fixed sequence of draws.
///
/// Each value is reduced modulo `upper`; once the sequence runs out every draw is 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedSampler {
    draws: VecDeque<usize>,
}

impl ScriptedSampler {
    /// Replays `draws` in order.
    pub fn new<I: IntoIterator<Item = usize>>(draws: I) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Draws not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl IterationSampler for ScriptedSampler {
    fn draw(&mut self, upper: usize) -> usize {
        self.draws.pop_front().map_or(0, |k| k % upper.max(1))
    }
}
