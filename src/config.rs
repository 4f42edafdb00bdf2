//! Search configuration.
//!
//! Values come from the command line; anything out of range is clamped to a
//! usable value with a warning rather than rejected.

use serde::Serialize;
use tracing::warn;

pub use crate::quantum::simulator::{Sampling, SimulatorConfig};

/// Shots per backend run.
pub const DEFAULT_SHOTS: usize = 1024;
/// Growth factor `λ` of the adaptive bound.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.2;
/// The adaptive bound limit is this multiple of `sqrt(N)`.
pub const DEFAULT_BOUND_FACTOR: f64 = 2.0;

/// Settings of one search. Build with the `with_*` methods, then
/// [`SearchConfig::validated`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchConfig {
    /// Shots per backend run.
    pub shots: usize,
    /// Factor `λ` the adaptive bound grows by after a failed attempt.
    pub growth_factor: f64,
    /// The adaptive search stops once its bound passes `bound_factor * sqrt(N)`.
    pub bound_factor: f64,
    /// Hard ceiling on adaptive attempts.
    pub max_attempts: Option<usize>,
    /// Seed for the iteration sampler.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            bound_factor: DEFAULT_BOUND_FACTOR,
            max_attempts: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the shots per backend run.
    #[must_use]
    pub const fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Sets the growth factor of the adaptive bound.
    #[must_use]
    pub const fn with_growth_factor(mut self, growth_factor: f64) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Sets the limit factor of the adaptive bound.
    #[must_use]
    pub const fn with_bound_factor(mut self, bound_factor: f64) -> Self {
        self.bound_factor = bound_factor;
        self
    }

    /// Caps the adaptive attempts; `None` leaves only the bound.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Seeds the iteration sampler.
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns a copy with every field in range.
    ///
    /// - `shots == 0` becomes 1
    /// - a growth factor that is not above 1 (or not finite) falls back to the default
    /// - a bound factor that is not positive (or not finite) falls back to the default
    /// - `max_attempts == Some(0)` becomes `Some(1)`
    #[must_use]
    pub fn validated(self) -> Self {
        let mut config = self;
        if config.shots == 0 {
            warn!("shots must be positive, using 1");
            config.shots = 1;
        }
        if !(config.growth_factor.is_finite() && config.growth_factor > 1.0) {
            warn!(
                growth_factor = config.growth_factor,
                "growth factor must be greater than 1, using {DEFAULT_GROWTH_FACTOR}"
            );
            config.growth_factor = DEFAULT_GROWTH_FACTOR;
        }
        if !(config.bound_factor.is_finite() && config.bound_factor > 0.0) {
            warn!(
                bound_factor = config.bound_factor,
                "bound factor must be positive, using {DEFAULT_BOUND_FACTOR}"
            );
            config.bound_factor = DEFAULT_BOUND_FACTOR;
        }
        if config.max_attempts == Some(0) {
            warn!("max attempts must be positive, using 1");
            config.max_attempts = Some(1);
        }
        config
    }
}
