//! Easing curves and exponential followers.
//!
//! Time-based animations (counters) map elapsed fraction through an
//! [`Easing`]. Frame-based motion (the cursor) uses a [`Follower`], which
//! closes a fixed fraction of the remaining distance every frame.

use serde::Deserialize;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Quartic ease-out: `1 - (1 - t)^4`.
    #[default]
    QuarticOut,
    /// Exponential ease-out: `1 - 2^(-10t)`.
    ExponentialOut,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuarticOut => 1.0 - (1.0 - t).powi(4),
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
        }
    }
}

/// A 2D point that chases a target by a fixed fraction per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Follower {
    /// Current X.
    pub x: f64,
    /// Current Y.
    pub y: f64,
    /// Fraction of the remaining distance closed per step (0-1].
    rate: f64,
}

impl Follower {
    /// Creates a follower at the origin.
    #[must_use]
    pub const fn new(rate: f64) -> Self {
        Self { x: 0.0, y: 0.0, rate }
    }

    /// Returns the current position.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Moves toward the target by `rate` of the remaining distance.
    pub fn step(&mut self, target_x: f64, target_y: f64) {
        self.x += (target_x - self.x) * self.rate;
        self.y += (target_y - self.y) * self.rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quartic_out_endpoints() {
        let easing = Easing::QuarticOut;
        assert!(easing.apply(0.0).abs() < f64::EPSILON);
        assert!((easing.apply(1.0) - 1.0).abs() < f64::EPSILON);
        // 1 - 0.5^4
        assert!((easing.apply(0.5) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_quartic_out_is_monotonic() {
        let easing = Easing::QuarticOut;
        let mut last = 0.0;
        for i in 0..=100 {
            let value = easing.apply(f64::from(i) / 100.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_apply_clamps_input() {
        assert!((Easing::Linear.apply(2.0) - 1.0).abs() < f64::EPSILON);
        assert!(Easing::ExponentialOut.apply(-1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_follower_closes_fraction_of_gap() {
        let mut follower = Follower::new(0.2);
        follower.step(100.0, 50.0);
        assert!((follower.x - 20.0).abs() < 1e-12);
        assert!((follower.y - 10.0).abs() < 1e-12);

        follower.step(100.0, 50.0);
        assert!((follower.x - 36.0).abs() < 1e-12);
    }

    #[test]
    fn test_follower_settles_without_new_input() {
        let mut follower = Follower::new(0.1);
        for _ in 0..500 {
            follower.step(300.0, 200.0);
        }
        assert!((follower.x - 300.0).abs() < 0.01);
        assert!((follower.y - 200.0).abs() < 0.01);
    }
}
