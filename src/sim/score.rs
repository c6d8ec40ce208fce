//! Clamped score accumulator with one-shot milestone and win detection

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    value: u32,
    target: u32,
    milestone_fired: bool,
    /// Latched once the target is reached, cleared only by `reset`
    won: bool,
}

impl ScoreState {
    pub fn new(target: u32) -> Self {
        Self {
            value: 0,
            target,
            milestone_fired: false,
            won: false,
        }
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Apply a signed delta, clamping at zero. Returns the new value.
    pub fn apply(&mut self, delta: i32) -> u32 {
        self.value = self.value.saturating_add_signed(delta);
        if self.value >= self.target {
            self.won = true;
        }
        self.value
    }

    /// True exactly once: the first call after the score reaches `threshold`
    pub fn check_milestone(&mut self, threshold: u32) -> bool {
        if self.milestone_fired || self.value < threshold {
            return false;
        }
        self.milestone_fired = true;
        true
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Back to zero for a new run
    pub fn reset(&mut self) {
        *self = Self::new(self.target);
    }

    /// Fill fraction toward the target (for HUD meters)
    pub fn progress(&self) -> f32 {
        if self.target == 0 {
            return 1.0;
        }
        (self.value as f32 / self.target as f32).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_penalty_clamps_at_zero() {
        let mut score = ScoreState::new(100);
        score.apply(2);
        assert_eq!(score.apply(-3), 0);
    }

    #[test]
    fn test_milestone_fires_once() {
        let mut score = ScoreState::new(100);
        score.apply(45);
        assert!(!score.check_milestone(50));
        score.apply(6);
        assert!(score.check_milestone(50));
        assert!(!score.check_milestone(50));
        // Dropping below and climbing back does not re-arm it
        score.apply(-10);
        score.apply(10);
        assert!(!score.check_milestone(50));

        score.reset();
        score.apply(50);
        assert!(score.check_milestone(50));
    }

    #[test]
    fn test_win_latches_until_reset() {
        let mut score = ScoreState::new(100);
        score.apply(99);
        assert!(!score.has_won());
        score.apply(5);
        assert!(score.has_won());
        score.apply(-3);
        assert!(score.has_won());
        score.reset();
        assert!(!score.has_won());
        assert_eq!(score.value(), 0);
        assert_eq!(score.target(), 100);
    }

    #[test]
    fn test_progress() {
        let mut score = ScoreState::new(100);
        score.apply(25);
        assert_eq!(score.progress(), 0.25);
        score.apply(200);
        assert_eq!(score.progress(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_never_negative(deltas in proptest::collection::vec(-50i32..50, 0..200)) {
            let mut score = ScoreState::new(100);
            let mut expected: i64 = 0;
            for delta in deltas {
                expected = (expected + delta as i64).max(0);
                prop_assert_eq!(score.apply(delta) as i64, expected);
            }
        }
    }
}
