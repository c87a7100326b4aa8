//! Short-lived projectiles and hazards
//!
//! Bolts are point+velocity entities removed on first impact, range
//! exhaustion, or leaving the arena. Beams are origin+direction line hazards
//! with a finite duration that damage per tick while overlapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::outside_arena;

/// Which side a projectile damages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    /// Fired by the Character or a companion; collides with hostiles
    Friendly,
    /// Fired by an elite or super-elite; collides with the Character
    Hostile,
}

/// A single-hit bolt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bolt {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub faction: Faction,
    /// Freeze duration applied to a surviving target (frost bolts)
    pub freeze: Option<f32>,
    /// Whether the hit feeds the Character's lifesteal. Attribution only;
    /// the bolt does not own the attacker.
    pub lifesteal: bool,
}

impl Bolt {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Bolts despawn once they leave the arena (plus margin for edge spawns).
    pub fn expired(&self) -> bool {
        outside_arena(self.pos, crate::consts::SPAWN_MARGIN)
    }
}

/// A line hazard: finite-duration beam from a fixed origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub origin: Vec2,
    /// Unit direction at fire time (aimed, then locked)
    pub dir: Vec2,
    pub length: f32,
    pub half_width: f32,
    /// Full beam damage; each overlapping tick applies a fraction of it
    pub damage: f32,
    pub remaining: f32,
}

/// Fraction of a beam's damage applied per overlapping tick.
pub const BEAM_TICK_FRACTION: f32 = 0.05;

impl Beam {
    pub fn advance(&mut self, dt: f32) {
        self.remaining -= dt;
    }

    pub fn expired(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn tick_damage(&self) -> f32 {
        self.damage * BEAM_TICK_FRACTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt(pos: Vec2, vel: Vec2) -> Bolt {
        Bolt {
            id: 1,
            pos,
            vel,
            radius: 15.0,
            damage: 60.0,
            faction: Faction::Friendly,
            freeze: None,
            lifesteal: true,
        }
    }

    #[test]
    fn test_bolt_advance_and_expiry() {
        let mut b = bolt(Vec2::new(600.0, 400.0), Vec2::new(400.0, 0.0));
        b.advance(0.5);
        assert!((b.pos.x - 800.0).abs() < 1e-4);
        assert!(!b.expired());
        b.pos = Vec2::new(1400.0, 400.0);
        assert!(b.expired());
    }

    #[test]
    fn test_beam_lifetime() {
        let mut beam = Beam {
            id: 2,
            origin: Vec2::ZERO,
            dir: Vec2::X,
            length: 3000.0,
            half_width: 20.0,
            damage: 40.0,
            remaining: 0.2,
        };
        assert!((beam.tick_damage() - 2.0).abs() < 1e-6);
        beam.advance(0.1);
        assert!(!beam.expired());
        beam.advance(0.1);
        assert!(beam.expired());
    }
}
