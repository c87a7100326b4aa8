//! Hostile entities and their per-type behavior
//!
//! Every hostile shares the same approach-and-contact movement; type-specific
//! behavior (beam cycles, detonation, elite volleys, super-elite pattern
//! cycling) is bundled in a behavior table keyed by `HostileKind`. Transitions
//! are time-driven; lethal damage preempts everything except the explosive
//! death sequence.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{direction_or_zero, unit_from_angle};

use super::loot::RewardTier;
use super::projectile::{Beam, Bolt, Faction};
use super::status::{StatusKind, StatusSet};

/// Fixed hostile categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileKind {
    Normal,
    Tank,
    Explosive,
    Laser,
    Slow,
}

pub const ALL_KINDS: [HostileKind; 5] = [
    HostileKind::Normal,
    HostileKind::Tank,
    HostileKind::Explosive,
    HostileKind::Laser,
    HostileKind::Slow,
];

/// Elite kinds eligible for the fixed-timer elite spawn.
pub const ELITE_KINDS: [HostileKind; 4] = [
    HostileKind::Tank,
    HostileKind::Explosive,
    HostileKind::Laser,
    HostileKind::Slow,
];

/// Stat multipliers applied over the level-scaled base stats.
#[derive(Debug, Clone, Copy)]
pub struct StatMods {
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
    pub defense: f32,
}

impl HostileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostileKind::Normal => "normal",
            HostileKind::Tank => "tank",
            HostileKind::Explosive => "explosive",
            HostileKind::Laser => "laser",
            HostileKind::Slow => "slow",
        }
    }

    pub fn mods(&self) -> StatMods {
        match self {
            HostileKind::Normal => StatMods { health: 1.0, damage: 1.0, speed: 1.0, defense: 1.0 },
            HostileKind::Tank => StatMods { health: 3.0, damage: 0.5, speed: 0.4, defense: 1.2 },
            HostileKind::Explosive => StatMods { health: 0.8, damage: 1.5, speed: 0.7, defense: 0.5 },
            HostileKind::Laser => StatMods { health: 0.9, damage: 1.5, speed: 1.1, defense: 0.7 },
            HostileKind::Slow => StatMods { health: 1.2, damage: 1.0, speed: 0.9, defense: 1.5 },
        }
    }
}

/// Elite overlay on top of the kind multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliteRank {
    None,
    Elite,
    SuperElite,
}

impl EliteRank {
    fn mods(&self) -> StatMods {
        match self {
            EliteRank::None => StatMods { health: 1.0, damage: 1.0, speed: 1.0, defense: 1.0 },
            EliteRank::Elite => StatMods { health: 10.0, damage: 2.0, speed: 0.7, defense: 3.0 },
            // x2 health / x2.5 damage beyond the elite overlay
            EliteRank::SuperElite => StatMods { health: 20.0, damage: 5.0, speed: 0.6, defense: 5.0 },
        }
    }

    pub fn reward_tier(&self) -> RewardTier {
        match self {
            EliteRank::None => RewardTier::Normal,
            EliteRank::Elite => RewardTier::Elite,
            EliteRank::SuperElite => RewardTier::SuperElite,
        }
    }
}

/// Super-elite attack patterns, rotated on a fixed 3-second cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPattern {
    BeamVolley,
    RadialBurst,
    ChargeRush,
}

const PATTERN_ORDER: [AttackPattern; 3] = [
    AttackPattern::BeamVolley,
    AttackPattern::RadialBurst,
    AttackPattern::ChargeRush,
];

/// Duration of one super-elite pattern window.
pub const PATTERN_CYCLE: f32 = 3.0;

/// Terminal sequence after lethal damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Terminal {
    /// Still fighting
    Alive,
    /// Explosive death countdown; burst fires exactly once at expiry
    Detonating { remaining: f32 },
    /// Terminal sequence finished, safe to reap
    Inert,
}

/// A spawned enemy entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub kind: HostileKind,
    pub rank: EliteRank,
    pub level: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    pub defense: f32,
    pub statuses: StatusSet,
    pub terminal: Terminal,
    /// Beam cycle: time since last fire (laser kind / super-elite beam pattern)
    beam_timer: f32,
    /// Charge elapsed while winding up a beam; `None` outside the charge phase
    charge: Option<f32>,
    /// Elite ranged volley / super-elite radial burst timer
    volley_timer: f32,
    /// Super-elite pattern rotation
    pattern_index: usize,
    pattern_timer: f32,
    /// Remaining hit-shove window; elites never get one
    knockback_timer: f32,
    knockback_dir: Vec2,
    /// Per-target aura cadence: seconds since this hostile last took aura damage
    pub aura_cooldown: f32,
    /// Per-target weapon-arc cadence: seconds since the orbiting weapon last hit
    pub weapon_hit_timer: f32,
}

/// Minimum seconds between orbiting-weapon hits on the same hostile
pub const WEAPON_HIT_INTERVAL: f32 = 0.5;

/// Laser-kind beam cycle constants
const LASER_COOLDOWN: f32 = 3.0;
const LASER_CHARGE: f32 = 1.0;
const LASER_DURATION: f32 = 0.2;
/// Super-elite beam cycle constants
const SUPER_BEAM_COOLDOWN: f32 = 1.0;
const SUPER_BEAM_CHARGE: f32 = 0.5;
const SUPER_BEAM_DURATION: f32 = 0.4;

const BEAM_LENGTH: f32 = 3000.0;
const BEAM_HALF_WIDTH: f32 = 20.0;

const ELITE_BOLT_SPEED: f32 = 300.0;
const RADIAL_BOLT_SPEED: f32 = 400.0;
const RADIAL_BOLT_COUNT: u32 = 8;

/// Hit shove applied to non-elites
const KNOCKBACK_SPEED: f32 = 300.0;
const KNOCKBACK_DURATION: f32 = 0.15;

/// Side effects of one hostile's update, committed by the orchestrator.
#[derive(Debug, Default)]
pub struct HostileEvents {
    /// Raw contact damage rate (per second) while in melee contact; the
    /// orchestrator resolves defense and scales by dt
    pub contact_damage: f32,
    /// Slow status to apply to the Character on contact
    pub slow_character: Option<f32>,
    /// Bolts to spawn (ids assigned by the orchestrator)
    pub bolts: Vec<Bolt>,
    /// Beams to spawn
    pub beams: Vec<Beam>,
    /// Area burst from a finished detonation: (center, raw damage, radius)
    pub detonation: Option<(Vec2, f32, f32)>,
    /// Hostile is charging a beam (drives the warning cue)
    pub charging: bool,
}

impl Hostile {
    /// Create a hostile with level-scaled stats, kind and rank multipliers,
    /// and the session difficulty adjustment.
    pub fn spawn(
        id: u32,
        kind: HostileKind,
        level: u32,
        rank: EliteRank,
        difficulty: f32,
        pos: Vec2,
    ) -> Self {
        let level = level.max(1);
        let kind_mods = kind.mods();
        let rank_mods = rank.mods();

        let mut health = 50.0 * level as f32 * kind_mods.health * rank_mods.health;
        let mut damage = 10.0 * level as f32 * kind_mods.damage * rank_mods.damage;
        let mut speed = 100.0 * kind_mods.speed * rank_mods.speed;
        let defense = 5.0 * level as f32 * kind_mods.defense * rank_mods.defense;

        // Difficulty ramp scales survivability and threat, lightly touches speed
        health *= 1.0 + difficulty * 0.1;
        damage *= 1.0 + difficulty * 0.1;
        speed *= 1.0 + difficulty * 0.05;

        let radius = match rank {
            EliteRank::None => 20.0,
            EliteRank::Elite => 40.0,
            EliteRank::SuperElite => 60.0,
        };

        Self {
            id,
            kind,
            rank,
            level,
            pos,
            radius,
            health,
            max_health: health,
            damage,
            speed,
            defense,
            statuses: StatusSet::default(),
            terminal: Terminal::Alive,
            beam_timer: 0.0,
            charge: None,
            volley_timer: 0.0,
            pattern_index: 0,
            pattern_timer: 0.0,
            knockback_timer: 0.0,
            knockback_dir: Vec2::ZERO,
            aura_cooldown: f32::MAX,
            weapon_hit_timer: f32::MAX,
        }
    }

    /// Pick a spawn position on a uniformly-chosen arena edge.
    pub fn edge_spawn_position<R: Rng>(rng: &mut R) -> Vec2 {
        let across_x = rng.random_range(SPAWN_MARGIN..ARENA_WIDTH - SPAWN_MARGIN);
        let across_y = rng.random_range(SPAWN_MARGIN..ARENA_HEIGHT - SPAWN_MARGIN);
        match rng.random_range(0..4u32) {
            0 => Vec2::new(across_x, -SPAWN_MARGIN),
            1 => Vec2::new(ARENA_WIDTH + SPAWN_MARGIN, across_y),
            2 => Vec2::new(across_x, ARENA_HEIGHT + SPAWN_MARGIN),
            _ => Vec2::new(-SPAWN_MARGIN, across_y),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Whether the hostile can be removed from the active set this tick.
    pub fn reapable(&self) -> bool {
        match self.terminal {
            Terminal::Alive => self.is_dead(),
            Terminal::Detonating { .. } => false,
            Terminal::Inert => true,
        }
    }

    /// Apply raw damage through defense (status-adjusted), entering the
    /// explosive terminal sequence on lethal damage. Returns the health
    /// actually removed.
    pub fn take_damage(&mut self, raw: f32) -> f32 {
        debug_assert!(
            !matches!(self.terminal, Terminal::Detonating { .. } | Terminal::Inert),
            "damage applied to hostile already in its terminal sequence"
        );
        let effective_defense = self.defense * self.statuses.hostile_defense_factor();
        let actual = super::combat::resolve_damage(raw, effective_defense).min(self.health);
        self.health -= actual;

        if self.is_dead() && self.kind == HostileKind::Explosive {
            self.terminal = Terminal::Detonating { remaining: DETONATION_DELAY };
        }
        actual
    }

    /// Shove a non-elite away from the hit source for a short window.
    pub fn apply_knockback(&mut self, from: Vec2) {
        if self.rank != EliteRank::None {
            return;
        }
        let dir = direction_or_zero(self.pos - from);
        if dir != Vec2::ZERO {
            self.knockback_timer = KNOCKBACK_DURATION;
            self.knockback_dir = dir;
        }
    }

    /// Advance the death sequence of an already-dead hostile.
    pub fn update_terminal(&mut self, dt: f32, events: &mut HostileEvents) {
        debug_assert!(self.is_dead());
        if let Terminal::Detonating { remaining } = self.terminal {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                // Single area burst at 2x base damage, then inert
                events.detonation = Some((self.pos, self.damage * 2.0, DETONATION_RADIUS));
                self.terminal = Terminal::Inert;
            } else {
                self.terminal = Terminal::Detonating { remaining };
            }
        }
    }

    /// Normalized progress of the detonation countdown for the warning cue.
    pub fn detonation_progress(&self) -> Option<f32> {
        match self.terminal {
            Terminal::Detonating { remaining } => {
                Some(1.0 - (remaining / DETONATION_DELAY).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }

    /// One live tick: movement plus the kind/rank special behavior.
    pub fn update(&mut self, dt: f32, character_pos: Vec2, character_radius: f32) -> HostileEvents {
        debug_assert!(!self.is_dead(), "update called on a dead hostile");
        let mut events = HostileEvents::default();

        self.statuses.tick(dt);
        if self.aura_cooldown != f32::MAX {
            self.aura_cooldown += dt;
        }
        if self.weapon_hit_timer != f32::MAX {
            self.weapon_hit_timer += dt;
        }

        // Knockback displacement stacks on top of the normal movement
        if self.knockback_timer > 0.0 {
            self.knockback_timer -= dt;
            self.pos += self.knockback_dir * KNOCKBACK_SPEED * dt;
        }

        if self.rank == EliteRank::SuperElite {
            self.update_super_elite(dt, character_pos, character_radius, &mut events);
        } else {
            self.approach(dt, character_pos, character_radius, 1.0, &mut events);
            match self.kind {
                HostileKind::Laser => self.update_beam_cycle(
                    dt,
                    character_pos,
                    LASER_COOLDOWN,
                    LASER_CHARGE,
                    LASER_DURATION,
                    self.damage * 2.0,
                    &mut events,
                ),
                HostileKind::Slow => {
                    if self.in_contact(character_pos, character_radius) {
                        events.slow_character = Some(2.0);
                    }
                }
                _ => {}
            }
            if self.rank == EliteRank::Elite {
                self.update_aimed_volley(dt, character_pos, &mut events);
            }
        }

        events
    }

    /// Move toward the Character until within the melee standoff; inside it,
    /// deal continuous contact damage instead.
    fn approach(
        &mut self,
        dt: f32,
        character_pos: Vec2,
        character_radius: f32,
        speed_mult: f32,
        events: &mut HostileEvents,
    ) {
        if self.in_contact(character_pos, character_radius) {
            events.contact_damage += self.damage;
            return;
        }
        let dir = direction_or_zero(character_pos - self.pos);
        let speed = self.speed * self.statuses.hostile_speed_factor() * speed_mult;
        self.pos += dir * speed * dt;
    }

    fn in_contact(&self, character_pos: Vec2, character_radius: f32) -> bool {
        self.pos.distance(character_pos) <= self.radius + character_radius + MELEE_STANDOFF
    }

    /// Cooldown -> Charging -> Firing beam cycle shared by the laser kind and
    /// the super-elite beam pattern.
    fn update_beam_cycle(
        &mut self,
        dt: f32,
        character_pos: Vec2,
        cooldown: f32,
        charge_time: f32,
        duration: f32,
        damage: f32,
        events: &mut HostileEvents,
    ) {
        self.beam_timer += dt;
        if self.charge.is_none() && self.beam_timer >= cooldown {
            self.charge = Some(0.0);
        }
        if let Some(elapsed) = self.charge {
            events.charging = true;
            let elapsed = elapsed + dt;
            if elapsed >= charge_time {
                events.beams.push(Beam {
                    id: 0,
                    origin: self.pos,
                    dir: direction_or_zero(character_pos - self.pos),
                    length: BEAM_LENGTH,
                    half_width: BEAM_HALF_WIDTH,
                    damage,
                    remaining: duration,
                });
                self.charge = None;
                self.beam_timer = 0.0;
                events.charging = false;
            } else {
                self.charge = Some(elapsed);
            }
        }
    }

    /// Elite overlay: one aimed bolt per second.
    fn update_aimed_volley(&mut self, dt: f32, character_pos: Vec2, events: &mut HostileEvents) {
        self.volley_timer += dt;
        if self.volley_timer >= 1.0 {
            self.volley_timer = 0.0;
            events.bolts.push(Bolt {
                id: 0,
                pos: self.pos,
                vel: direction_or_zero(character_pos - self.pos) * ELITE_BOLT_SPEED,
                radius: 5.0,
                damage: self.damage,
                faction: Faction::Hostile,
                freeze: None,
                lifesteal: false,
            });
        }
    }

    /// Super-elite: rotate through the fixed pattern order every 3 seconds,
    /// running exactly one pattern at a time.
    fn update_super_elite(
        &mut self,
        dt: f32,
        character_pos: Vec2,
        character_radius: f32,
        events: &mut HostileEvents,
    ) {
        self.pattern_timer += dt;
        if self.pattern_timer >= PATTERN_CYCLE {
            self.pattern_timer = 0.0;
            self.pattern_index = (self.pattern_index + 1) % PATTERN_ORDER.len();
            // A half-wound beam charge does not carry across patterns
            self.charge = None;
        }

        match self.current_pattern() {
            AttackPattern::BeamVolley => {
                self.approach(dt, character_pos, character_radius, 1.0, events);
                self.update_beam_cycle(
                    dt,
                    character_pos,
                    SUPER_BEAM_COOLDOWN,
                    SUPER_BEAM_CHARGE,
                    SUPER_BEAM_DURATION,
                    self.damage * 4.0,
                    events,
                );
            }
            AttackPattern::RadialBurst => {
                self.approach(dt, character_pos, character_radius, 1.0, events);
                self.volley_timer += dt;
                if self.volley_timer >= 0.5 {
                    self.volley_timer = 0.0;
                    for i in 0..RADIAL_BOLT_COUNT {
                        let theta = std::f32::consts::TAU / RADIAL_BOLT_COUNT as f32 * i as f32;
                        events.bolts.push(Bolt {
                            id: 0,
                            pos: self.pos,
                            vel: unit_from_angle(theta) * RADIAL_BOLT_SPEED,
                            radius: 5.0,
                            damage: self.damage,
                            faction: Faction::Hostile,
                            freeze: None,
                            lifesteal: false,
                        });
                    }
                }
            }
            AttackPattern::ChargeRush => {
                self.approach(dt, character_pos, character_radius, 1.5, events);
            }
        }
    }

    /// Beam warning cue for the renderer.
    pub fn is_charging(&self) -> bool {
        self.charge.is_some()
    }

    pub fn current_pattern(&self) -> AttackPattern {
        PATTERN_ORDER[self.pattern_index]
    }

    /// Apply a status from an ability, companion, or aura.
    pub fn apply_status(&mut self, kind: StatusKind, duration: f32) {
        self.statuses.apply(kind, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hostile(kind: HostileKind, rank: EliteRank) -> Hostile {
        Hostile::spawn(1, kind, 1, rank, 0.0, Vec2::new(1000.0, 400.0))
    }

    #[test]
    fn test_kind_stat_multipliers() {
        let tank = hostile(HostileKind::Tank, EliteRank::None);
        assert!((tank.max_health - 150.0).abs() < 1e-3);
        assert!((tank.damage - 5.0).abs() < 1e-3);
        assert!((tank.speed - 40.0).abs() < 1e-3);
        assert!((tank.defense - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_elite_and_super_elite_overlays() {
        let elite = hostile(HostileKind::Normal, EliteRank::Elite);
        assert!((elite.max_health - 500.0).abs() < 1e-3);
        assert!((elite.damage - 20.0).abs() < 1e-3);
        assert!((elite.defense - 15.0).abs() < 1e-3);

        // Super-elite: x2 health / x2.5 damage beyond elite
        let superb = hostile(HostileKind::Normal, EliteRank::SuperElite);
        assert!((superb.max_health - 1000.0).abs() < 1e-3);
        assert!((superb.damage - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_damage_through_defense() {
        // health 50, defense 5, raw 12 -> loses exactly 7, not removed
        let mut h = hostile(HostileKind::Normal, EliteRank::None);
        assert_eq!(h.max_health, 50.0 * (1.0));
        let removed = h.take_damage(12.0);
        assert!((removed - 7.0).abs() < 1e-4);
        assert!((h.health - 43.0).abs() < 1e-4);
        assert!(!h.reapable());
    }

    #[test]
    fn test_health_never_negative() {
        let mut h = hostile(HostileKind::Normal, EliteRank::None);
        h.take_damage(10_000.0);
        assert_eq!(h.health, 0.0);
        assert!(h.reapable());
    }

    #[test]
    fn test_explosive_terminal_sequence() {
        let mut h = hostile(HostileKind::Explosive, EliteRank::None);
        h.take_damage(100_000.0);
        assert!(h.is_dead());
        assert!(!h.reapable(), "explosive lingers through the detonation delay");
        assert!(matches!(h.terminal, Terminal::Detonating { .. }));

        // 0.9s in: still detonating
        let mut events = HostileEvents::default();
        for _ in 0..54 {
            h.update_terminal(1.0 / 60.0, &mut events);
        }
        assert!(!h.reapable());
        assert!(events.detonation.is_none());

        // Past 1s: one burst, then inert
        for _ in 0..10 {
            h.update_terminal(1.0 / 60.0, &mut events);
        }
        let (center, raw, radius) = events.detonation.expect("burst fires at expiry");
        assert_eq!(center, h.pos);
        assert!((radius - DETONATION_RADIUS).abs() < 1e-6);
        assert!((raw - h.damage * 2.0).abs() < 1e-3);
        assert!(h.reapable());

        // Continuing the terminal update never re-fires
        let mut later = HostileEvents::default();
        h.update_terminal(1.0, &mut later);
        assert!(later.detonation.is_none());
    }

    #[test]
    fn test_non_explosive_removed_immediately() {
        let mut h = hostile(HostileKind::Tank, EliteRank::None);
        h.take_damage(100_000.0);
        assert!(h.reapable());
    }

    #[test]
    fn test_approach_stops_at_standoff() {
        let mut h = hostile(HostileKind::Normal, EliteRank::None);
        let target = Vec2::new(600.0, 400.0);
        // Far away: moves, no contact damage
        let ev = h.update(1.0 / 60.0, target, CHARACTER_RADIUS);
        assert_eq!(ev.contact_damage, 0.0);
        assert!(h.pos.x < 1000.0);

        // Inside standoff: holds position, reports its contact damage rate
        h.pos = target + Vec2::new(30.0, 0.0);
        let before = h.pos;
        let ev = h.update(1.0 / 60.0, target, CHARACTER_RADIUS);
        assert_eq!(h.pos, before);
        assert!((ev.contact_damage - h.damage).abs() < 1e-4);
    }

    #[test]
    fn test_slow_kind_applies_slow_on_contact() {
        let mut h = hostile(HostileKind::Slow, EliteRank::None);
        h.pos = Vec2::new(620.0, 400.0);
        let ev = h.update(1.0 / 60.0, Vec2::new(600.0, 400.0), CHARACTER_RADIUS);
        assert_eq!(ev.slow_character, Some(2.0));
    }

    #[test]
    fn test_knockback_shoves_non_elites_only() {
        let target = Vec2::new(600.0, 400.0);

        let mut h = hostile(HostileKind::Normal, EliteRank::None);
        h.pos = Vec2::new(630.0, 400.0);
        h.apply_knockback(target);
        let before = h.pos;
        h.update(1.0 / 60.0, target, CHARACTER_RADIUS);
        assert!(h.pos.x > before.x, "pushed away from the hit source");

        let mut e = hostile(HostileKind::Tank, EliteRank::Elite);
        e.pos = Vec2::new(630.0, 400.0);
        e.apply_knockback(target);
        let before = e.pos;
        e.update(1.0 / 60.0, target, CHARACTER_RADIUS);
        assert_eq!(e.pos, before, "elites ignore knockback");
    }

    #[test]
    fn test_laser_cycle_timing() {
        let mut h = hostile(HostileKind::Laser, EliteRank::None);
        h.pos = Vec2::new(630.0, 400.0); // in standoff so it doesn't wander
        let target = Vec2::new(600.0, 400.0);
        let dt = 1.0 / 60.0;

        let mut fired_at = None;
        let mut first_charge_tick = None;
        for tick in 0..400 {
            let ev = h.update(dt, target, CHARACTER_RADIUS);
            if ev.charging && first_charge_tick.is_none() {
                first_charge_tick = Some(tick);
            }
            if !ev.beams.is_empty() {
                fired_at = Some(tick);
                assert!((ev.beams[0].remaining - 0.2).abs() < 1e-6);
                assert!((ev.beams[0].damage - h.damage * 2.0).abs() < 1e-3);
                break;
            }
        }
        // 3s cooldown then 1s charge at 60Hz
        let charge_start = first_charge_tick.expect("charge phase observed");
        let fire = fired_at.expect("beam fired");
        assert!((179..=181).contains(&charge_start), "charge at ~3s, got {charge_start}");
        assert!((238..=242).contains(&fire), "fire at ~4s, got {fire}");
    }

    #[test]
    fn test_elite_volley_cadence() {
        let mut h = hostile(HostileKind::Tank, EliteRank::Elite);
        h.pos = Vec2::new(660.0, 400.0);
        let target = Vec2::new(600.0, 400.0);
        let dt = 1.0 / 60.0;
        let mut bolts = 0;
        // A few ticks past 2s absorb f32 accumulation drift in the timer
        for _ in 0..124 {
            bolts += h.update(dt, target, CHARACTER_RADIUS).bolts.len();
        }
        assert_eq!(bolts, 2, "one aimed bolt per second");
    }

    #[test]
    fn test_super_elite_pattern_rotation() {
        let mut h = hostile(HostileKind::Laser, EliteRank::SuperElite);
        h.pos = Vec2::new(700.0, 400.0);
        let target = Vec2::new(600.0, 400.0);
        let dt = 1.0 / 60.0;

        // Run a few ticks past each 3s boundary; f32 accumulation can leave
        // the timer a hair short at the exact tick count
        let ticks = (PATTERN_CYCLE / dt) as u32 + 3;
        assert_eq!(h.current_pattern(), AttackPattern::BeamVolley);
        for _ in 0..ticks {
            h.update(dt, target, CHARACTER_RADIUS);
        }
        assert_eq!(h.current_pattern(), AttackPattern::RadialBurst);
        for _ in 0..ticks {
            h.update(dt, target, CHARACTER_RADIUS);
        }
        assert_eq!(h.current_pattern(), AttackPattern::ChargeRush);
        for _ in 0..ticks {
            h.update(dt, target, CHARACTER_RADIUS);
        }
        assert_eq!(h.current_pattern(), AttackPattern::BeamVolley);
    }

    #[test]
    fn test_radial_burst_is_eight_bolts() {
        let mut h = hostile(HostileKind::Normal, EliteRank::SuperElite);
        h.pos = Vec2::new(700.0, 400.0);
        let target = Vec2::new(600.0, 400.0);
        let dt = 1.0 / 60.0;
        // Skip past the beam pattern window, plus drift slack
        for _ in 0..(PATTERN_CYCLE / dt) as u32 + 3 {
            h.update(dt, target, CHARACTER_RADIUS);
        }
        assert_eq!(h.current_pattern(), AttackPattern::RadialBurst);
        let mut burst_sizes = Vec::new();
        for _ in 0..60 {
            let ev = h.update(dt, target, CHARACTER_RADIUS);
            if !ev.bolts.is_empty() {
                burst_sizes.push(ev.bolts.len());
            }
        }
        assert!(!burst_sizes.is_empty());
        assert!(burst_sizes.iter().all(|&n| n == 8));
    }
}
