//! Closed-form iteration counts for a known number of solutions.
//!
//! With `M` marked states out of `N`, the start state sits at angle
//! `θ = asin(sqrt(M/N))` from the unmarked subspace and every round rotates it by
//! `2θ`. After `k` rounds a measurement hits a marked state with probability
//! `sin²((2k + 1)θ)`.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::f64::consts::FRAC_PI_4;

/// `θ = asin(sqrt(M/N))`, or `None` when there is nothing to rotate towards.
#[must_use]
pub fn rotation_angle(solutions: usize, space: usize) -> Option<f64> {
    if solutions == 0 || space == 0 {
        return None;
    }
    let ratio = (solutions as f64 / space as f64).min(1.0);
    Some(ratio.sqrt().asin())
}

/// `max(1, round(π / 4θ − 1/2))`, and `0` when `solutions == 0`.
///
/// ```
/// use sat_oracle::search::iterations::optimal_iterations;
///
/// assert_eq!(optimal_iterations(1, 4), 1);
/// assert_eq!(optimal_iterations(0, 4), 0);
/// ```
#[must_use]
pub fn optimal_iterations(solutions: usize, space: usize) -> usize {
    rotation_angle(solutions, space).map_or(0, |theta| {
        let k = (FRAC_PI_4 / theta - 0.5).round();
        (k as usize).max(1)
    })
}

/// Probability that `iterations` rounds end on a marked state.
#[must_use]
pub fn success_probability(iterations: usize, solutions: usize, space: usize) -> f64 {
    rotation_angle(solutions, space).map_or(0.0, |theta| {
        ((2 * iterations + 1) as f64 * theta).sin().powi(2)
    })
}
