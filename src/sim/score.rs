//! Scoring, combo, and accuracy bookkeeping
//!
//! A combo is a chain of hits landed within a rolling window of each other.
//! It breaks when the window expires with no hit, never on a fired shot
//! (shots only fire on target, so a "missed shot" cannot happen).

use serde::{Deserialize, Serialize};

use crate::tuning::ComboTuning;

/// Score and combo state for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub total_hits: u32,
    pub total_shots: u32,
    pub total_misses: u32,
    pub birds_escaped: u32,
    /// Counts down from the combo window after each hit; at zero the
    /// combo resets
    pub combo_timer: f32,
}

impl ScoreState {
    /// Record a fired shot
    pub fn register_shot(&mut self) {
        self.total_shots += 1;
    }

    /// Record a bird hit and return the points earned, including the combo
    /// bonus once the chain reaches the minimum length.
    pub fn register_hit(&mut self, base_points: u64, combo: &ComboTuning) -> u64 {
        self.total_hits += 1;

        if self.combo_timer > 0.0 {
            self.combo += 1;
        } else {
            self.combo = 1;
        }
        self.combo_timer = combo.window;
        self.max_combo = self.max_combo.max(self.combo);

        let mut earned = base_points;
        if self.combo >= combo.min_hits {
            earned += u64::from(self.combo) * combo.bonus_per_hit;
        }

        self.score += earned;
        earned
    }

    /// Record a shot that hit nothing. Unreachable in the current design
    /// (fire requires a resolved target) but part of the stats contract.
    pub fn register_miss(&mut self) {
        self.total_misses += 1;
    }

    /// Record a bird escaping off-screen
    pub fn register_escaped(&mut self) {
        self.birds_escaped += 1;
    }

    /// Advance the combo window; breaks the combo when it expires
    pub fn update(&mut self, dt: f32) {
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo_timer = 0.0;
                self.combo = 0;
            }
        }
    }

    /// Hit percentage, rounded; 0 before the first shot
    pub fn accuracy(&self) -> u32 {
        if self.total_shots == 0 {
            return 0;
        }
        (self.total_hits as f32 / self.total_shots as f32 * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo() -> ComboTuning {
        ComboTuning::default()
    }

    #[test]
    fn test_first_hit_starts_combo_at_one() {
        let mut s = ScoreState::default();
        let earned = s.register_hit(20, &combo());
        assert_eq!(s.combo, 1);
        assert_eq!(earned, 20); // no bonus below the threshold
        assert_eq!(s.score, 20);
    }

    #[test]
    fn test_combo_window_boundary() {
        let c = combo();

        // Hit just inside the window extends the chain
        let mut s = ScoreState::default();
        s.register_hit(20, &c);
        s.update(c.window - 0.001);
        s.register_hit(20, &c);
        assert_eq!(s.combo, 2);

        // Hit just past the window restarts at 1
        let mut s = ScoreState::default();
        s.register_hit(20, &c);
        s.update(c.window + 0.001);
        s.register_hit(20, &c);
        assert_eq!(s.combo, 1);
    }

    #[test]
    fn test_combo_breaks_to_zero_on_timeout() {
        let c = combo();
        let mut s = ScoreState::default();
        s.register_hit(20, &c);
        s.register_hit(20, &c);
        s.update(c.window + 0.1);
        assert_eq!(s.combo, 0);
        assert_eq!(s.combo_timer, 0.0);
        assert_eq!(s.max_combo, 2);
    }

    #[test]
    fn test_combo_bonus_at_threshold() {
        let c = combo();
        let mut s = ScoreState::default();
        assert_eq!(s.register_hit(20, &c), 20);
        assert_eq!(s.register_hit(25, &c), 25);
        // Third hit reaches the threshold: base + combo * bonus
        assert_eq!(s.register_hit(30, &c), 30 + 3 * c.bonus_per_hit);
        assert_eq!(s.score, 20 + 25 + 30 + 3 * c.bonus_per_hit);
    }

    #[test]
    fn test_max_combo_survives_break() {
        let c = combo();
        let mut s = ScoreState::default();
        for _ in 0..5 {
            s.register_hit(10, &c);
        }
        s.update(c.window + 0.1);
        s.register_hit(10, &c);
        assert_eq!(s.combo, 1);
        assert_eq!(s.max_combo, 5);
    }

    #[test]
    fn test_accuracy_rounding() {
        let mut s = ScoreState::default();
        assert_eq!(s.accuracy(), 0); // no shots yet

        s.register_shot();
        s.register_shot();
        s.register_shot();
        s.register_hit(10, &combo());
        s.register_hit(10, &combo());
        // 2/3 rounds to 67
        assert_eq!(s.accuracy(), 67);
    }
}
