//! The growing bound of the adaptive search.
//!
//! The bound `m` starts at 1 and is multiplied by the growth factor after every
//! failed attempt, much like a geometric restart interval. The schedule is
//! exhausted once `m` passes `limit`, which the search sets to a multiple of
//! `sqrt(N)`.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

/// The bound `m` and its limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthSchedule {
    bound: f64,
    growth: f64,
    limit: f64,
    steps: usize,
}

impl GrowthSchedule {
    /// Starts at `m = 1`.
    #[must_use]
    pub const fn new(growth: f64, limit: f64) -> Self {
        Self {
            bound: 1.0,
            growth,
            limit,
            steps: 0,
        }
    }

    /// `bound_factor * sqrt(space)`.
    #[must_use]
    pub fn for_space(space: usize, growth: f64, bound_factor: f64) -> Self {
        Self::new(growth, bound_factor * (space as f64).sqrt())
    }

    /// Current `m`.
    #[must_use]
    pub const fn bound(&self) -> f64 {
        self.bound
    }

    /// The bound past which the search stops.
    #[must_use]
    pub const fn limit(&self) -> f64 {
        self.limit
    }

    /// Number of times the bound has grown.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Exclusive upper end of the next draw, `floor(m)`, never below 1.
    #[must_use]
    pub fn draw_upper(&self) -> usize {
        (self.bound.floor() as usize).max(1)
    }

    /// `m <- growth * m`.
    pub fn grow(&mut self) {
        self.bound *= self.growth;
        self.steps += 1;
    }

    /// True once `m` has passed the limit.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.bound > self.limit
    }

    /// Attempts left from here, this one included, before the bound passes the
    /// limit. `None` if the bound never grows.
    #[must_use]
    pub fn max_attempts(&self) -> Option<usize> {
        if !(self.growth > 1.0 && self.limit.is_finite()) {
            return None;
        }
        let mut rest = *self;
        let mut attempts = 1;
        loop {
            rest.grow();
            if rest.exhausted() {
                return Some(attempts);
            }
            attempts += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grows_geometrically() {
        let mut s = GrowthSchedule::new(1.2, 4.0);
        let uppers: Vec<_> = (0..8)
            .map(|_| {
                let u = s.draw_upper();
                s.grow();
                u
            })
            .collect();
        // 1, 1.2, 1.44, 1.728, 2.07, 2.49, 2.99, 3.58
        assert_eq!(uppers, vec![1, 1, 1, 1, 2, 2, 2, 3]);
        assert!(s.exhausted());
        assert_eq!(s.steps(), 8);
    }

    #[test]
    fn test_max_attempts() {
        assert_eq!(GrowthSchedule::new(1.2, 4.0).max_attempts(), Some(8));
        assert_eq!(GrowthSchedule::for_space(2, 1.2, 2.0).max_attempts(), Some(6));
        assert_eq!(GrowthSchedule::for_space(64, 1.2, 2.0).max_attempts(), Some(16));
        assert_eq!(GrowthSchedule::new(1.0, 4.0).max_attempts(), None);

        let mut s = GrowthSchedule::new(1.2, 4.0);
        s.grow();
        s.grow();
        assert_eq!(s.max_attempts(), Some(6));
    }

    #[test]
    fn test_limit_from_space() {
        let s = GrowthSchedule::for_space(16, 1.2, 2.0);
        assert!((s.limit() - 8.0).abs() < f64::EPSILON);
        assert!((s.bound() - 1.0).abs() < f64::EPSILON);
        assert!(!s.exhausted());
    }
}
