//! Time-decaying status effects
//!
//! A fixed set of status kinds, each carrying a remaining duration that the
//! owning entity decrements in its own update. No external timers: when a
//! duration reaches zero the modifier simply stops applying.

use serde::{Deserialize, Serialize};

/// Status kinds shared by the Character and hostiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    /// Movement stopped (Character) or heavily slowed (hostile)
    Frozen,
    /// Movement halved
    Slowed,
    /// Attack/health/speed buff from the Empower ability
    Empowered,
    /// Reduced speed and defense (aura debuff)
    Weakened,
}

/// Remaining durations per status kind. Zero means inactive.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusSet {
    frozen: f32,
    slowed: f32,
    empowered: f32,
    weakened: f32,
}

impl StatusSet {
    pub fn apply(&mut self, kind: StatusKind, duration: f32) {
        let slot = self.slot_mut(kind);
        *slot = slot.max(duration);
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.remaining(kind) > 0.0
    }

    pub fn remaining(&self, kind: StatusKind) -> f32 {
        match kind {
            StatusKind::Frozen => self.frozen,
            StatusKind::Slowed => self.slowed,
            StatusKind::Empowered => self.empowered,
            StatusKind::Weakened => self.weakened,
        }
    }

    fn slot_mut(&mut self, kind: StatusKind) -> &mut f32 {
        match kind {
            StatusKind::Frozen => &mut self.frozen,
            StatusKind::Slowed => &mut self.slowed,
            StatusKind::Empowered => &mut self.empowered,
            StatusKind::Weakened => &mut self.weakened,
        }
    }

    /// Decay every duration by `dt`, clamped at zero.
    pub fn tick(&mut self, dt: f32) {
        self.frozen = (self.frozen - dt).max(0.0);
        self.slowed = (self.slowed - dt).max(0.0);
        self.empowered = (self.empowered - dt).max(0.0);
        self.weakened = (self.weakened - dt).max(0.0);
    }

    /// Movement multiplier for the Character. Frozen and slowed are mutually
    /// exclusive here with frozen taking priority.
    pub fn character_speed_factor(&self) -> f32 {
        if self.is_active(StatusKind::Frozen) {
            0.0
        } else if self.is_active(StatusKind::Slowed) {
            0.5
        } else {
            1.0
        }
    }

    /// Movement multiplier for a hostile. Frozen dominates; slow and weaken
    /// stack multiplicatively.
    pub fn hostile_speed_factor(&self) -> f32 {
        if self.is_active(StatusKind::Frozen) {
            return 0.3;
        }
        let mut factor = 1.0;
        if self.is_active(StatusKind::Slowed) {
            factor *= 0.5;
        }
        if self.is_active(StatusKind::Weakened) {
            factor *= 0.7;
        }
        factor
    }

    /// Defense multiplier for a hostile.
    pub fn hostile_defense_factor(&self) -> f32 {
        if self.is_active(StatusKind::Weakened) {
            0.5
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_clamps_at_zero() {
        let mut set = StatusSet::default();
        set.apply(StatusKind::Slowed, 0.5);
        set.tick(0.3);
        assert!((set.remaining(StatusKind::Slowed) - 0.2).abs() < 1e-6);
        set.tick(10.0);
        assert_eq!(set.remaining(StatusKind::Slowed), 0.0);
        assert!(!set.is_active(StatusKind::Slowed));
    }

    #[test]
    fn test_reapply_keeps_longest() {
        let mut set = StatusSet::default();
        set.apply(StatusKind::Frozen, 2.0);
        set.apply(StatusKind::Frozen, 0.5);
        assert!((set.remaining(StatusKind::Frozen) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_frozen_overrides_slowed() {
        let mut set = StatusSet::default();
        set.apply(StatusKind::Slowed, 5.0);
        assert!((set.character_speed_factor() - 0.5).abs() < 1e-6);
        set.apply(StatusKind::Frozen, 1.0);
        assert_eq!(set.character_speed_factor(), 0.0);
    }

    #[test]
    fn test_hostile_factors() {
        let mut set = StatusSet::default();
        set.apply(StatusKind::Weakened, 1.0);
        assert!((set.hostile_speed_factor() - 0.7).abs() < 1e-6);
        assert!((set.hostile_defense_factor() - 0.5).abs() < 1e-6);
        set.apply(StatusKind::Frozen, 1.0);
        assert!((set.hostile_speed_factor() - 0.3).abs() < 1e-6);
    }
}
