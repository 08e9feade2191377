//! Critically damped smoothing toward a moving target velocity.

use bevy::prelude::*;

/// Smallest accepted time constant; keeps `omega` finite.
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Spring state for [`SmoothDamp::step`]. One per character, persisted between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothDamp {
    /// Rate of change carried over from the previous step
    pub rate: Vec2,
}

impl SmoothDamp {
    /// Move `current` toward `target` with a critically damped spring of time constant
    /// `smooth_time`. Never overshoots the target.
    pub fn step(&mut self, current: Vec2, target: Vec2, smooth_time: f32, dt: f32) -> Vec2 {
        if dt <= 0.0 {
            return current;
        }

        let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
        let omega = 2.0 / smooth_time;
        let x = omega * dt;
        // Pade approximation of exp(-x)
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = current - target;
        let temp = (self.rate + omega * change) * dt;
        self.rate = (self.rate - omega * temp) * decay;
        let mut output = target + (change + temp) * decay;

        if (target - current).dot(output - target) > 0.0 {
            output = target;
            self.rate = Vec2::ZERO;
        }

        output
    }

    pub fn reset(&mut self) {
        self.rate = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_without_overshoot() {
        let mut damp = SmoothDamp::default();
        let target = Vec2::new(10.0, 0.0);
        let mut current = Vec2::ZERO;

        for _ in 0..120 {
            current = damp.step(current, target, 0.05, 1.0 / 60.0);
            assert!(current.x <= target.x + 1e-4);
        }

        assert!((current.x - target.x).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_is_identity() {
        let mut damp = SmoothDamp::default();
        let current = Vec2::new(3.0, -2.0);
        assert_eq!(damp.step(current, Vec2::ZERO, 0.05, 0.0), current);
        assert_eq!(damp.rate, Vec2::ZERO);
    }

    #[test]
    fn test_separate_springs_do_not_share_state() {
        let mut a = SmoothDamp::default();
        let b = SmoothDamp::default();

        a.step(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.05, 1.0 / 60.0);

        assert_ne!(a.rate, Vec2::ZERO);
        assert_eq!(b.rate, Vec2::ZERO);
    }
}
