//! Arena Survivors - simulation core for a survival combat arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (combat, hostile behavior, loot, tick loop)
//! - `profile`: Persisted player profile (permanent upgrades, companions, currency)
//!
//! The core is headless: it consumes input intents and profile data, and emits
//! render snapshots and UI events once per tick. Drawing, menus, and input
//! capture live in external collaborators.

pub mod profile;
pub mod sim;

pub use profile::Profile;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz authoritative tick rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Upper bound on a single tick's delta time. Protects timers and
    /// dt-scaled damage after a pause/resume gap.
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Arena dimensions (origin at top-left, like the render surface)
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 800.0;
    /// Hostiles spawn this far outside the arena edge
    pub const SPAWN_MARGIN: f32 = 100.0;

    /// Difficulty ramp: +0.5 every 60 seconds
    pub const DIFFICULTY_STEP: f32 = 0.5;
    pub const DIFFICULTY_INTERVAL: f32 = 60.0;

    /// Hostile spawning
    pub const SPAWN_BASE_INTERVAL: f32 = 0.5;
    pub const ELITE_SPAWN_INTERVAL: f32 = 40.0;
    /// Every Nth elite kill arms the next elite spawn as a super-elite
    pub const SUPER_ELITE_CYCLE: u32 = 3;

    /// Character defaults
    pub const CHARACTER_RADIUS: f32 = 20.0;
    pub const CHARACTER_BASE_HEALTH: f32 = 100.0;
    pub const CHARACTER_BASE_ATTACK: f32 = 10.0;
    pub const CHARACTER_BASE_SPEED: f32 = 200.0;
    /// Aim positions closer than this don't move the Character
    pub const AIM_DEADZONE: f32 = 5.0;

    /// Weapon orbit
    pub const WEAPON_ORBIT_RADIUS: f32 = 60.0;
    pub const WEAPON_ANGULAR_SPEED: f32 = 5.0;
    pub const WEAPON_HIT_TOLERANCE: f32 = 10.0;

    /// Hostiles keep this far from the Character before dealing contact damage
    pub const MELEE_STANDOFF: f32 = 20.0;

    /// Explosive hostiles
    pub const DETONATION_DELAY: f32 = 1.0;
    pub const DETONATION_RADIUS: f32 = 100.0;
}

/// Normalize a vector, special-casing degenerate (near-zero) inputs to the
/// zero vector so position state never absorbs a NaN.
#[inline]
pub fn direction_or_zero(v: Vec2) -> Vec2 {
    if v.length_squared() < 1e-8 {
        Vec2::ZERO
    } else {
        v / v.length()
    }
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// True if a point lies outside the arena plus a margin
#[inline]
pub fn outside_arena(pos: Vec2, margin: f32) -> bool {
    pos.x < -margin
        || pos.x > consts::ARENA_WIDTH + margin
        || pos.y < -margin
        || pos.y > consts::ARENA_HEIGHT + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_or_zero_degenerate() {
        assert_eq!(direction_or_zero(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(direction_or_zero(Vec2::new(1e-6, -1e-6)), Vec2::ZERO);
    }

    #[test]
    fn test_direction_or_zero_unit_length() {
        let d = direction_or_zero(Vec2::new(3.0, 4.0));
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert!((d.x - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_outside_arena() {
        assert!(!outside_arena(Vec2::new(600.0, 400.0), 0.0));
        assert!(outside_arena(Vec2::new(-1.0, 400.0), 0.0));
        assert!(!outside_arena(Vec2::new(-50.0, 400.0), 100.0));
        assert!(outside_arena(Vec2::new(1400.0, 400.0), 100.0));
    }
}
